//! Application configuration model.
//!
//! Loading lives in the infrastructure layer; this module only defines the
//! shape and defaults.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const DEFAULT_WEBHOOK_URL: &str = "https://shprotto.app.n8n.cloud/webhook/character-selection";
pub const DEFAULT_SOURCE: &str = "miniapp";
pub const DEFAULT_FAVORITES_KEY: &str = "favorite_characters";
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 15;

/// Where the mini-app is running.
///
/// In `Development` the native outbound channel never performs a real send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RuntimeEnvironment {
    Development,
    #[default]
    Production,
}

impl RuntimeEnvironment {
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Webhook endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSettings {
    #[serde(default = "default_webhook_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_webhook_url() -> String {
    DEFAULT_WEBHOOK_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_WEBHOOK_TIMEOUT_SECS
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            url: default_webhook_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: RuntimeEnvironment,
    /// Value of the payload `source` field
    #[serde(default = "default_source")]
    pub source: String,
    /// Storage key of the favorites blob
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
    #[serde(default)]
    pub webhook: WebhookSettings,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_favorites_key() -> String {
    DEFAULT_FAVORITES_KEY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: RuntimeEnvironment::default(),
            source: default_source(),
            favorites_key: default_favorites_key(),
            webhook: WebhookSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.environment, RuntimeEnvironment::Production);
        assert_eq!(config.source, "miniapp");
        assert_eq!(config.favorites_key, "favorite_characters");
        assert_eq!(config.webhook.url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.webhook.timeout_secs, 15);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"environment":"development","webhook":{"timeout_secs":3}}"#)
                .unwrap();
        assert!(config.environment.is_development());
        assert_eq!(config.webhook.timeout_secs, 3);
        assert_eq!(config.webhook.url, DEFAULT_WEBHOOK_URL);
    }

    #[test]
    fn test_environment_parse_is_case_insensitive() {
        assert_eq!(
            "Development".parse::<RuntimeEnvironment>().unwrap(),
            RuntimeEnvironment::Development
        );
    }
}
