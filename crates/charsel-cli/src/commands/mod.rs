pub mod characters;
pub mod favorites;
pub mod payload;
pub mod pick;

use std::sync::Arc;

use anyhow::{Context, Result};
use charsel_core::config::AppConfig;
use charsel_core::identity::Identity;
use charsel_core::platform::{HostBridge, LoggedDialogs};
use charsel_infrastructure::{CharselPaths, ConfigService, JsonFileStore, TerminalHost};

use crate::SessionArgs;

/// Loads configuration from `--config` or the default location.
pub async fn load_config(session: &SessionArgs) -> Result<AppConfig> {
    let service = match &session.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let config = service.load().await.context("Failed to load configuration")?;
    tracing::debug!(
        "[charsel] Config loaded (environment: {}, webhook: {})",
        config.environment,
        config.webhook.url
    );
    Ok(config)
}

/// Identity built from the command line, if a user id was given.
pub fn identity(session: &SessionArgs) -> Option<Identity> {
    let mut identity = Identity::new(session.user_id?);
    if let Some(username) = &session.username {
        identity = identity.with_username(username);
    }
    if let Some(first_name) = &session.first_name {
        identity = identity.with_first_name(first_name);
    }
    Some(identity)
}

/// Bridge over the terminal with file-backed storage.
pub fn terminal_bridge(
    session: &SessionArgs,
    config: &AppConfig,
) -> Result<Arc<HostBridge<TerminalHost>>> {
    let storage_file =
        CharselPaths::storage_file().context("Failed to resolve the storage location")?;
    let mut host = TerminalHost::stdio().with_store(JsonFileStore::new(storage_file));
    if let Some(identity) = identity(session) {
        host = host.with_identity(identity);
    }
    Ok(Arc::new(HostBridge::new(
        host,
        Arc::new(LoggedDialogs::default()),
        config.environment,
    )))
}
