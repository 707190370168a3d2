//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` (see [`CharselPaths::config_file`])
//! and applies environment overrides on top.

use std::path::{Path, PathBuf};

use charsel_core::config::{AppConfig, RuntimeEnvironment};
use charsel_core::error::{CharselError, Result};

use crate::paths::CharselPaths;

/// Overrides the webhook endpoint.
pub const ENV_WEBHOOK_URL: &str = "CHARSEL_WEBHOOK_URL";
/// Overrides the runtime environment (`development` / `production`).
pub const ENV_ENVIRONMENT: &str = "CHARSEL_ENV";

#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Explicit config file; the platform default is used when `None`.
    path: Option<PathBuf>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => CharselPaths::config_file(),
        }
    }

    /// Loads the configuration file and applies process environment overrides.
    pub async fn load(&self) -> Result<AppConfig> {
        let path = self.config_path()?;
        let config = Self::load_file(&path).await?;
        Self::apply_overrides(config, |name| std::env::var(name).ok())
    }

    /// Reads a config file. A missing file yields the defaults.
    pub async fn load_file(path: &Path) -> Result<AppConfig> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "[ConfigService] No config at {}, using defaults",
                    path.display()
                );
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            CharselError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Applies `CHARSEL_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_WEBHOOK_URL).filter(|v| !v.trim().is_empty()) {
            config.webhook.url = url;
        }
        if let Some(env) = lookup(ENV_ENVIRONMENT) {
            config.environment = env.trim().parse::<RuntimeEnvironment>().map_err(|_| {
                CharselError::config(format!("Invalid {} value: '{}'", ENV_ENVIRONMENT, env))
            })?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigService::load_file(&temp_dir.path().join("config.toml"))
            .await
            .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "environment = \"development\"\n\n[webhook]\nurl = \"http://localhost:5678/hook\"\n",
        )
        .unwrap();

        let service = ConfigService::with_path(&path);
        assert_eq!(service.config_path().unwrap(), path);

        let config = ConfigService::load_file(&path).await.unwrap();
        assert!(config.environment.is_development());
        assert_eq!(config.webhook.url, "http://localhost:5678/hook");
        assert_eq!(config.webhook.timeout_secs, 15);
        assert_eq!(config.source, "miniapp");
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "environment = [").unwrap();

        let err = ConfigService::load_file(&path).await.unwrap_err();
        assert!(matches!(err, CharselError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigService::apply_overrides(
            AppConfig::default(),
            lookup(&[
                (ENV_WEBHOOK_URL, "http://127.0.0.1:9000/hook"),
                (ENV_ENVIRONMENT, "Development"),
            ]),
        )
        .unwrap();
        assert_eq!(config.webhook.url, "http://127.0.0.1:9000/hook");
        assert!(config.environment.is_development());
    }

    #[test]
    fn test_invalid_env_override_is_rejected() {
        let err = ConfigService::apply_overrides(
            AppConfig::default(),
            lookup(&[(ENV_ENVIRONMENT, "staging")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("CHARSEL_ENV"));
    }
}
