//! Host platform integration.
//!
//! # Module Structure
//!
//! - `types`: Values exchanged with the host (theme, popups, buttons, haptics)
//! - `bridge`: The fail-soft [`PlatformBridge`] interface
//! - `registry`: Per-button handler bookkeeping
//! - `host`: [`HostBridge`] adapter over a concrete [`HostApi`]
//! - `preview`: [`PreviewBridge`] adapter for contexts without a host

mod bridge;
mod host;
mod preview;
mod registry;
mod types;

// Re-export public API
pub use bridge::PlatformBridge;
pub use host::{HostApi, HostBridge, NativeDialogs};
pub use preview::{LoggedDialogs, PreviewBridge};
pub use registry::ButtonRegistry;
pub use types::{
    button_handler, ButtonAppearance, ButtonConfig, ButtonHandler, ButtonKind, HapticKind,
    PopupButton, PopupButtonType, PopupParams, ThemeParams, POPUP_CANCEL_ID, POPUP_OK_ID,
};
