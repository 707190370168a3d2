//! Host-supplied user identity.

use serde::{Deserialize, Serialize};

/// Snapshot of the user info the host injects at startup.
///
/// Obtained once and never refreshed. May be absent entirely in anonymous or
/// preview contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// Premium subscription flag reported by the host. Never forwarded.
    #[serde(default)]
    pub is_premium: bool,
}

impl Identity {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
            last_name: None,
            language_code: None,
            is_premium: false,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    pub fn with_premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_host_user_object() {
        let json = r#"{"id":99281932,"first_name":"Test","last_name":"User",
            "username":"testuser","language_code":"ru","is_premium":true}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, 99281932);
        assert_eq!(identity.username.as_deref(), Some("testuser"));
        assert!(identity.is_premium);
    }

    #[test]
    fn test_minimal_user_object() {
        let identity: Identity = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(identity, Identity::new(1));
    }
}
