//! Fallback adapter used when no host runtime is present (plain preview).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::bridge::PlatformBridge;
use super::host::NativeDialogs;
use super::registry::ButtonRegistry;
use super::types::{
    ButtonAppearance, ButtonConfig, ButtonKind, HapticKind, PopupParams, ThemeParams,
};
use crate::config::RuntimeEnvironment;
use crate::identity::Identity;

/// Native dialogs that only log, answering confirms with a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct LoggedDialogs {
    confirm_answer: bool,
}

impl LoggedDialogs {
    pub fn new(confirm_answer: bool) -> Self {
        Self { confirm_answer }
    }
}

impl Default for LoggedDialogs {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl NativeDialogs for LoggedDialogs {
    async fn alert(&self, message: &str) {
        tracing::info!("[Preview] alert: {}", message);
    }

    async fn confirm(&self, message: &str) -> bool {
        tracing::info!("[Preview] confirm: {} -> {}", message, self.confirm_answer);
        self.confirm_answer
    }
}

/// [`PlatformBridge`] for contexts without a host.
///
/// Dialogs go to [`NativeDialogs`], storage reads resolve to `None` and writes
/// to `false`, chrome buttons are tracked (so presses can still be simulated)
/// but nothing is rendered.
pub struct PreviewBridge {
    dialogs: Arc<dyn NativeDialogs>,
    environment: RuntimeEnvironment,
    identity: Option<Identity>,
    theme: Option<ThemeParams>,
    buttons: ButtonRegistry,
    ready: AtomicBool,
}

impl PreviewBridge {
    pub fn new(environment: RuntimeEnvironment) -> Self {
        Self {
            dialogs: Arc::new(LoggedDialogs::default()),
            environment,
            identity: None,
            theme: None,
            buttons: ButtonRegistry::new(),
            ready: AtomicBool::new(false),
        }
    }

    /// Preview with the mock user and dark theme used during development.
    pub fn development() -> Self {
        Self::new(RuntimeEnvironment::Development)
            .with_theme(ThemeParams::preview_dark())
            .with_identity(
                Identity::new(99281932)
                    .with_first_name("Test")
                    .with_last_name("User")
                    .with_username("testuser")
                    .with_language_code("ru")
                    .with_premium(true),
            )
    }

    pub fn with_dialogs(mut self, dialogs: Arc<dyn NativeDialogs>) -> Self {
        self.dialogs = dialogs;
        self
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_theme(mut self, theme: ThemeParams) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformBridge for PreviewBridge {
    fn ready(&self) {
        if !self.ready.swap(true, Ordering::SeqCst) {
            tracing::debug!("[Preview] ready");
        }
    }

    fn theme(&self) -> Option<ThemeParams> {
        self.theme.clone()
    }

    fn identity(&self) -> Option<Identity> {
        self.identity.clone()
    }

    fn haptic(&self, kind: HapticKind) {
        tracing::trace!("[Preview] haptic {}", kind);
    }

    async fn alert(&self, message: &str) {
        self.dialogs.alert(message).await;
    }

    async fn confirm(&self, message: &str) -> bool {
        self.dialogs.confirm(message).await
    }

    async fn popup(&self, params: PopupParams) -> String {
        let confirmed = self.dialogs.confirm(&params.confirm_text()).await;
        params.synthesize_answer(confirmed)
    }

    async fn send_native(&self, payload_json: &str) -> bool {
        if self.environment.is_development() {
            tracing::info!("[Preview] Development mode, would send: {}", payload_json);
            true
        } else {
            tracing::warn!("[Preview] Native send not available in this context");
            false
        }
    }

    fn set_primary_button(&self, config: ButtonConfig) {
        let appearance = self.buttons.apply(ButtonKind::Primary, config);
        tracing::debug!("[Preview] primary button: {:?}", appearance);
    }

    fn hide_primary_button(&self) {
        self.buttons.hide(ButtonKind::Primary);
        tracing::debug!("[Preview] primary button hidden");
    }

    fn set_back_button(&self, config: ButtonConfig) {
        let appearance = self.buttons.apply(ButtonKind::Back, config);
        tracing::debug!("[Preview] back button: {:?}", appearance);
    }

    fn set_settings_button(&self, config: ButtonConfig) {
        let appearance = self.buttons.apply(ButtonKind::Settings, config);
        tracing::debug!("[Preview] settings button: {:?}", appearance);
    }

    async fn storage_get(&self, key: &str) -> Option<String> {
        tracing::debug!("[Preview] storage unavailable, '{}' reads as empty", key);
        None
    }

    async fn storage_set(&self, key: &str, _value: &str) -> bool {
        tracing::debug!("[Preview] storage unavailable, '{}' not written", key);
        false
    }

    async fn activate(&self, button: ButtonKind) -> bool {
        self.buttons.dispatch(button).await
    }

    fn button(&self, kind: ButtonKind) -> Option<ButtonAppearance> {
        self.buttons.appearance(kind)
    }

    fn close(&self) {
        tracing::info!("[Preview] Close not available in preview");
    }
}
