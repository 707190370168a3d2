//! Error types for the character selection flow.

use thiserror::Error;

/// A shared error type for the whole selection flow.
///
/// Only [`CharselError::Network`] is ever surfaced to the user. Host failures
/// are absorbed at the platform bridge boundary and persisted-data problems are
/// logged, so the remaining variants mostly travel between layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CharselError {
    /// The host platform (or one of its capabilities) is not reachable.
    #[error("Platform capability unavailable: {capability}")]
    PlatformUnavailable { capability: &'static str },

    /// Webhook unreachable or answered with a non-2xx status.
    #[error("Network error{}: {message}", status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Network {
        status: Option<u16>,
        message: String,
    },

    /// A persisted blob could not be parsed.
    #[error("Malformed persisted data under '{key}': {message}")]
    MalformedPersistedData { key: String, message: String },

    /// `confirm()` was invoked while a submission is already in flight.
    #[error("A submission is already in flight")]
    DuplicateSubmission,

    /// `confirm()` was invoked with no character selected.
    #[error("No character is selected")]
    NothingSelected,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A catalog record violates the character invariants.
    #[error("Invalid character '{id}': {reason}")]
    InvalidCharacter { id: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl CharselError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a PlatformUnavailable error
    pub fn unavailable(capability: &'static str) -> Self {
        Self::PlatformUnavailable { capability }
    }

    /// Creates a Network error for a transport failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Network error for an unexpected HTTP status
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Network {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a MalformedPersistedData error
    pub fn malformed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedPersistedData {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidCharacter error
    pub fn invalid_character(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCharacter {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a PlatformUnavailable error
    pub fn is_platform_unavailable(&self) -> bool {
        matches!(self, Self::PlatformUnavailable { .. })
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a refused `confirm()` rather than a delivery failure.
    ///
    /// Refusals never change controller state and are never shown to the user.
    pub fn is_refusal(&self) -> bool {
        matches!(self, Self::DuplicateSubmission | Self::NothingSelected)
    }

    /// Short, user-facing reason kept in `SelectionState::Failed`.
    pub fn reason(&self) -> String {
        match self {
            Self::Network {
                status: Some(status),
                ..
            } => format!("HTTP {}", status),
            Self::Network { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CharselError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CharselError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CharselError>`.
pub type Result<T> = std::result::Result<T, CharselError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display_includes_status() {
        let err = CharselError::http_status(500, "Internal Server Error");
        assert_eq!(
            err.to_string(),
            "Network error (HTTP 500): Internal Server Error"
        );
        assert_eq!(err.reason(), "HTTP 500");
        assert!(err.is_network());
    }

    #[test]
    fn test_transport_error_without_status() {
        let err = CharselError::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert_eq!(err.reason(), "connection refused");
    }

    #[test]
    fn test_refusals() {
        assert!(CharselError::DuplicateSubmission.is_refusal());
        assert!(CharselError::NothingSelected.is_refusal());
        assert!(!CharselError::network("x").is_refusal());
    }

    #[test]
    fn test_from_serde_json() {
        let err: CharselError = serde_json::from_str::<Vec<String>>("not-json")
            .unwrap_err()
            .into();
        assert!(matches!(err, CharselError::Serialization { ref format, .. } if format == "JSON"));
    }
}
