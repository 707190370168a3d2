pub mod config_service;
pub mod file_store;
pub mod http_webhook;
pub mod paths;
pub mod terminal_host;

pub use crate::config_service::ConfigService;
pub use crate::file_store::JsonFileStore;
pub use crate::http_webhook::HttpWebhookSender;
pub use crate::paths::CharselPaths;
pub use crate::terminal_host::TerminalHost;
