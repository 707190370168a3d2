//! Test doubles shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{CharselError, Result};
use crate::identity::Identity;
use crate::platform::{
    ButtonAppearance, ButtonConfig, ButtonKind, ButtonRegistry, HapticKind, PlatformBridge,
    PopupParams, ThemeParams,
};
use crate::submission::{SubmissionPayload, WebhookSender};

/// Observable side effect of a bridge call.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeCall {
    Haptic(HapticKind),
    Alert(String),
    Confirm(String),
    Popup(PopupParams),
    SendNative(String),
}

/// Bridge that records every call and answers from fixed values.
pub struct RecordingBridge {
    pub calls: Mutex<Vec<BridgeCall>>,
    pub theme: Option<ThemeParams>,
    pub popup_answer: String,
    pub native_result: bool,
    pub storage: Mutex<HashMap<String, String>>,
    buttons: ButtonRegistry,
}

impl Default for RecordingBridge {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            theme: None,
            popup_answer: "ok".to_string(),
            native_result: true,
            storage: Mutex::new(HashMap::new()),
            buttons: ButtonRegistry::new(),
        }
    }
}

impl RecordingBridge {
    /// A bridge whose native send reports `result`.
    pub fn with_native_result(mut self, result: bool) -> Self {
        self.native_result = result;
        self
    }

    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn haptics(&self) -> Vec<HapticKind> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BridgeCall::Haptic(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    pub fn native_sends(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BridgeCall::SendNative(json) => Some(json),
                _ => None,
            })
            .collect()
    }

    pub fn popups(&self) -> Vec<PopupParams> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BridgeCall::Popup(params) => Some(params),
                _ => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BridgeCall::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BridgeCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PlatformBridge for RecordingBridge {
    fn ready(&self) {}

    fn theme(&self) -> Option<ThemeParams> {
        self.theme.clone()
    }

    fn identity(&self) -> Option<Identity> {
        None
    }

    fn haptic(&self, kind: HapticKind) {
        self.record(BridgeCall::Haptic(kind));
    }

    async fn alert(&self, message: &str) {
        self.record(BridgeCall::Alert(message.to_string()));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.record(BridgeCall::Confirm(message.to_string()));
        true
    }

    async fn popup(&self, params: PopupParams) -> String {
        self.record(BridgeCall::Popup(params));
        self.popup_answer.clone()
    }

    async fn send_native(&self, payload_json: &str) -> bool {
        self.record(BridgeCall::SendNative(payload_json.to_string()));
        self.native_result
    }

    fn set_primary_button(&self, config: ButtonConfig) {
        self.buttons.apply(ButtonKind::Primary, config);
    }

    fn hide_primary_button(&self) {
        self.buttons.hide(ButtonKind::Primary);
    }

    fn set_back_button(&self, config: ButtonConfig) {
        self.buttons.apply(ButtonKind::Back, config);
    }

    fn set_settings_button(&self, config: ButtonConfig) {
        self.buttons.apply(ButtonKind::Settings, config);
    }

    async fn storage_get(&self, key: &str) -> Option<String> {
        self.storage.lock().unwrap().get(key).cloned()
    }

    async fn storage_set(&self, key: &str, value: &str) -> bool {
        self.storage
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        true
    }

    async fn activate(&self, button: ButtonKind) -> bool {
        self.buttons.dispatch(button).await
    }

    fn button(&self, kind: ButtonKind) -> Option<ButtonAppearance> {
        self.buttons.appearance(kind)
    }

    fn close(&self) {}
}

/// Webhook that answers with a fixed HTTP status, optionally waiting for a
/// release signal first.
pub struct ScriptedWebhook {
    pub status: Mutex<u16>,
    pub delivered: Mutex<Vec<SubmissionPayload>>,
    gate: Option<Notify>,
}

impl ScriptedWebhook {
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Mutex::new(status),
            delivered: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// A webhook that blocks every delivery until [`Self::release`] is called.
    pub fn gated(status: u16) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::with_status(status)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn set_status(&self, status: u16) {
        *self.status.lock().unwrap() = status;
    }

    pub fn deliveries(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl WebhookSender for ScriptedWebhook {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<()> {
        self.delivered.lock().unwrap().push(payload.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let status = *self.status.lock().unwrap();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(CharselError::http_status(status, "scripted failure"))
        }
    }
}
