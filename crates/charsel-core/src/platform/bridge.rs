//! The uniform interface the rest of the flow uses to talk to the host.

use async_trait::async_trait;

use super::types::{
    ButtonAppearance, ButtonConfig, ButtonKind, HapticKind, PopupParams, ThemeParams,
};
use crate::identity::Identity;

/// Host platform operations behind a uniform, fail-soft interface.
///
/// No method returns an error: when the host (or one of its capabilities) is
/// missing, implementations fall back to a native equivalent, a safe default
/// value, or a logged no-op. Callers can therefore treat the host as always
/// present.
#[async_trait]
pub trait PlatformBridge: Send + Sync {
    /// Signals that the initial render is complete. Only the first call
    /// reaches the host.
    fn ready(&self);

    /// Theme color tokens, or `None` when unavailable.
    fn theme(&self) -> Option<ThemeParams>;

    /// User identity injected by the host at launch.
    fn identity(&self) -> Option<Identity>;

    /// Fire-and-forget haptic cue.
    fn haptic(&self, kind: HapticKind);

    async fn alert(&self, message: &str);

    async fn confirm(&self, message: &str) -> bool;

    /// Shows a popup and resolves to the id of the pressed button.
    ///
    /// Without popup support the popup is replaced by a plain confirm and the
    /// answer is mapped back with [`PopupParams::synthesize_answer`].
    async fn popup(&self, params: PopupParams) -> String;

    /// Sends a JSON payload through the host's own outbound channel.
    ///
    /// In development contexts this logs the payload and reports success
    /// without any real call.
    async fn send_native(&self, payload_json: &str) -> bool;

    fn set_primary_button(&self, config: ButtonConfig);

    /// Hides the primary button and detaches its handler.
    fn hide_primary_button(&self);

    fn set_back_button(&self, config: ButtonConfig);

    fn set_settings_button(&self, config: ButtonConfig);

    /// Reads a value from host storage; `None` when missing or unavailable.
    async fn storage_get(&self, key: &str) -> Option<String>;

    /// Writes a value to host storage; `false` when the write did not happen.
    async fn storage_set(&self, key: &str, value: &str) -> bool;

    /// Reports a press of a chrome button and runs its current handler.
    ///
    /// Returns whether a handler ran.
    async fn activate(&self, button: ButtonKind) -> bool;

    /// Current appearance of a chrome button, if it was ever configured.
    fn button(&self, kind: ButtonKind) -> Option<ButtonAppearance>;

    /// Closes the mini-app.
    fn close(&self);
}
