//! Path resolution for charsel files.
//!
//! ```text
//! ~/.config/charsel/           # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/charsel/      # Data directory
//! └── storage.json             # Key/value storage used by the terminal host
//! ```

use std::path::PathBuf;

use charsel_core::error::{CharselError, Result};

const APP_DIR: &str = "charsel";

pub struct CharselPaths;

impl CharselPaths {
    /// Returns the charsel configuration directory (e.g. `~/.config/charsel/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| CharselError::config("Cannot find config directory"))
    }

    /// Returns the charsel data directory (e.g. `~/.local/share/charsel/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| CharselError::config("Cannot find data directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn storage_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("storage.json"))
    }
}
