//! Adapter that wraps a concrete host runtime.
//!
//! [`HostApi`] describes the raw host primitives: each call may fail, usually
//! with [`CharselError::PlatformUnavailable`]. [`HostBridge`] turns those
//! failures into the fail-soft behavior promised by [`PlatformBridge`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::bridge::PlatformBridge;
use super::registry::ButtonRegistry;
use super::types::{
    ButtonAppearance, ButtonConfig, ButtonKind, HapticKind, PopupParams, ThemeParams,
};
use crate::config::RuntimeEnvironment;
use crate::error::Result;
use crate::identity::Identity;

/// Raw primitives of a host runtime.
#[async_trait]
pub trait HostApi: Send + Sync {
    fn signal_ready(&self) -> Result<()>;

    fn theme_params(&self) -> Result<Option<ThemeParams>>;

    fn init_user(&self) -> Result<Option<Identity>>;

    fn haptic(&self, kind: HapticKind) -> Result<()>;

    async fn show_alert(&self, message: &str) -> Result<()>;

    async fn show_confirm(&self, message: &str) -> Result<bool>;

    async fn show_popup(&self, params: &PopupParams) -> Result<String>;

    fn send_data(&self, data: &str) -> Result<()>;

    fn render_button(&self, kind: ButtonKind, appearance: &ButtonAppearance) -> Result<()>;

    async fn storage_get(&self, key: &str) -> Result<Option<String>>;

    async fn storage_set(&self, key: &str, value: &str) -> Result<bool>;

    fn close(&self) -> Result<()>;
}

/// Dialogs available without the host (the environment's own alert/confirm).
#[async_trait]
pub trait NativeDialogs: Send + Sync {
    async fn alert(&self, message: &str);

    async fn confirm(&self, message: &str) -> bool;
}

/// [`PlatformBridge`] over a concrete host runtime.
pub struct HostBridge<H: HostApi> {
    host: H,
    dialogs: Arc<dyn NativeDialogs>,
    environment: RuntimeEnvironment,
    buttons: ButtonRegistry,
    ready: AtomicBool,
}

impl<H: HostApi> HostBridge<H> {
    pub fn new(host: H, dialogs: Arc<dyn NativeDialogs>, environment: RuntimeEnvironment) -> Self {
        Self {
            host,
            dialogs,
            environment,
            buttons: ButtonRegistry::new(),
            ready: AtomicBool::new(false),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn render(&self, kind: ButtonKind, appearance: &ButtonAppearance) {
        if let Err(e) = self.host.render_button(kind, appearance) {
            tracing::debug!("[HostBridge] Cannot render {} button: {}", kind, e);
        }
    }
}

#[async_trait]
impl<H: HostApi> PlatformBridge for HostBridge<H> {
    fn ready(&self) {
        if self.ready.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.host.signal_ready() {
            tracing::debug!("[HostBridge] Ready signal not delivered: {}", e);
        }
    }

    fn theme(&self) -> Option<ThemeParams> {
        self.host.theme_params().unwrap_or_else(|e| {
            tracing::debug!("[HostBridge] Theme unavailable: {}", e);
            None
        })
    }

    fn identity(&self) -> Option<Identity> {
        self.host.init_user().unwrap_or_else(|e| {
            tracing::info!("[HostBridge] Init data not available: {}", e);
            None
        })
    }

    fn haptic(&self, kind: HapticKind) {
        // Haptics are cosmetic; failures are dropped.
        let _ = self.host.haptic(kind);
    }

    async fn alert(&self, message: &str) {
        if let Err(e) = self.host.show_alert(message).await {
            tracing::debug!("[HostBridge] Host alert failed ({}), using native dialog", e);
            self.dialogs.alert(message).await;
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        match self.host.show_confirm(message).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::debug!("[HostBridge] Host confirm failed ({}), using native dialog", e);
                self.dialogs.confirm(message).await
            }
        }
    }

    async fn popup(&self, params: PopupParams) -> String {
        match self.host.show_popup(&params).await {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!("[HostBridge] Host popup failed ({}), falling back to confirm", e);
                let confirmed = self.dialogs.confirm(&params.confirm_text()).await;
                params.synthesize_answer(confirmed)
            }
        }
    }

    async fn send_native(&self, payload_json: &str) -> bool {
        if self.environment.is_development() {
            tracing::info!("[HostBridge] Development mode, would send: {}", payload_json);
            return true;
        }
        match self.host.send_data(payload_json) {
            Ok(()) => {
                tracing::info!("[HostBridge] Payload sent through native channel");
                true
            }
            Err(e) => {
                tracing::warn!("[HostBridge] Native send failed: {}", e);
                false
            }
        }
    }

    fn set_primary_button(&self, config: ButtonConfig) {
        let appearance = self.buttons.apply(ButtonKind::Primary, config);
        self.render(ButtonKind::Primary, &appearance);
    }

    fn hide_primary_button(&self) {
        let appearance = self.buttons.hide(ButtonKind::Primary);
        self.render(ButtonKind::Primary, &appearance);
    }

    fn set_back_button(&self, config: ButtonConfig) {
        let appearance = self.buttons.apply(ButtonKind::Back, config);
        self.render(ButtonKind::Back, &appearance);
    }

    fn set_settings_button(&self, config: ButtonConfig) {
        let appearance = self.buttons.apply(ButtonKind::Settings, config);
        self.render(ButtonKind::Settings, &appearance);
    }

    async fn storage_get(&self, key: &str) -> Option<String> {
        match self.host.storage_get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("[HostBridge] Storage read of '{}' failed: {}", key, e);
                None
            }
        }
    }

    async fn storage_set(&self, key: &str, value: &str) -> bool {
        match self.host.storage_set(key, value).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("[HostBridge] Storage write of '{}' failed: {}", key, e);
                false
            }
        }
    }

    async fn activate(&self, button: ButtonKind) -> bool {
        self.buttons.dispatch(button).await
    }

    fn button(&self, kind: ButtonKind) -> Option<ButtonAppearance> {
        self.buttons.appearance(kind)
    }

    fn close(&self) {
        if let Err(e) = self.host.close() {
            tracing::info!("[HostBridge] Close not available: {}", e);
        }
    }
}
