//! Value types exchanged with the host platform.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Haptic cue kinds understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HapticKind {
    Light,
    Medium,
    Heavy,
    Rigid,
    Soft,
    Success,
    Warning,
    Error,
}

/// Named color tokens published by the host theme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_bg_color: Option<String>,
}

impl ThemeParams {
    /// Dark palette used when previewing outside the host.
    pub fn preview_dark() -> Self {
        Self {
            bg_color: Some("#17212b".to_string()),
            text_color: Some("#f5f5f5".to_string()),
            hint_color: Some("#708499".to_string()),
            button_color: Some("#5288c1".to_string()),
            button_text_color: Some("#ffffff".to_string()),
            secondary_bg_color: Some("#232e3c".to_string()),
        }
    }
}

/// Style of a popup button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PopupButtonType {
    Default,
    Ok,
    Close,
    Cancel,
    Destructive,
}

/// One button of a popup; `{id, type?, text?}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupButton {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PopupButtonType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PopupButton {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: Some(PopupButtonType::Default),
            text: Some(text.into()),
        }
    }

    pub fn cancel(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: Some(PopupButtonType::Cancel),
            text: None,
        }
    }

    pub fn close(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: Some(PopupButtonType::Close),
            text: None,
        }
    }

    pub fn ok(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: Some(PopupButtonType::Ok),
            text: None,
        }
    }

    fn is_dismissal(&self) -> bool {
        matches!(
            self.kind,
            Some(PopupButtonType::Cancel) | Some(PopupButtonType::Close)
        )
    }
}

/// Id reported when a popup is dismissed without a dedicated button.
pub const POPUP_CANCEL_ID: &str = "cancel";
/// Id reported when a synthesized popup is accepted without a dedicated button.
pub const POPUP_OK_ID: &str = "ok";

/// Parameters of a host popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
    #[serde(default)]
    pub buttons: Vec<PopupButton>,
}

impl PopupParams {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            buttons: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_button(mut self, button: PopupButton) -> Self {
        self.buttons.push(button);
        self
    }

    /// Text shown by a plain confirm dialog standing in for this popup.
    pub fn confirm_text(&self) -> String {
        match &self.title {
            Some(title) => format!("{}\n\n{}", title, self.message),
            None => self.message.clone(),
        }
    }

    /// Maps a plain confirm answer onto one of this popup's button ids.
    ///
    /// Accepting picks the first non-dismissal button; declining picks the first
    /// cancel/close button. Missing buttons map to [`POPUP_OK_ID`] /
    /// [`POPUP_CANCEL_ID`].
    pub fn synthesize_answer(&self, confirmed: bool) -> String {
        let found = if confirmed {
            self.buttons.iter().find(|b| !b.is_dismissal())
        } else {
            self.buttons.iter().find(|b| b.is_dismissal())
        };
        match found {
            Some(button) => button.id.clone(),
            None if confirmed => POPUP_OK_ID.to_string(),
            None => POPUP_CANCEL_ID.to_string(),
        }
    }
}

/// Host chrome buttons controlled by the mini-app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ButtonKind {
    Primary,
    Back,
    Settings,
}

/// Activation handler attached to a chrome button.
pub type ButtonHandler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Wraps an async closure into a [`ButtonHandler`].
pub fn button_handler<F, Fut>(f: F) -> ButtonHandler
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move || Box::pin(f()))
}

/// Visual state of a chrome button, as rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonAppearance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub visible: bool,
    pub enabled: bool,
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    pub shine_effect: bool,
}

impl ButtonAppearance {
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Whether a press on this button should reach its handler.
    pub fn is_pressable(&self) -> bool {
        self.visible && self.enabled && !self.loading
    }
}

/// Full configuration of a chrome button.
///
/// Setting `on_activate` replaces the handler previously registered for the
/// same button; leaving it `None` keeps the current one.
#[derive(Clone, Default)]
pub struct ButtonConfig {
    pub text: Option<String>,
    pub visible: bool,
    pub enabled: bool,
    pub loading: bool,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub shine_effect: bool,
    pub on_activate: Option<ButtonHandler>,
}

impl ButtonConfig {
    /// A visible, enabled button.
    pub fn shown() -> Self {
        Self {
            visible: true,
            enabled: true,
            ..Self::default()
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_handler(mut self, handler: ButtonHandler) -> Self {
        self.on_activate = Some(handler);
        self
    }

    pub fn appearance(&self) -> ButtonAppearance {
        ButtonAppearance {
            text: self.text.clone(),
            visible: self.visible,
            enabled: self.enabled,
            loading: self.loading,
            color: self.color.clone(),
            text_color: self.text_color.clone(),
            shine_effect: self.shine_effect,
        }
    }
}

impl fmt::Debug for ButtonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonConfig")
            .field("text", &self.text)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("loading", &self.loading)
            .field("color", &self.color)
            .field("text_color", &self.text_color)
            .field("shine_effect", &self.shine_effect)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn premium_popup() -> PopupParams {
        PopupParams::new("Цена: 100₽")
            .with_title("⭐ Премиум персонаж")
            .with_button(PopupButton::new("buy", "💎 Купить доступ"))
            .with_button(PopupButton::cancel("cancel"))
    }

    #[test]
    fn test_synthesized_answers() {
        let popup = premium_popup();
        assert_eq!(popup.synthesize_answer(true), "buy");
        assert_eq!(popup.synthesize_answer(false), "cancel");
    }

    #[test]
    fn test_synthesized_answers_without_buttons() {
        let popup = PopupParams::new("hello");
        assert_eq!(popup.synthesize_answer(true), POPUP_OK_ID);
        assert_eq!(popup.synthesize_answer(false), POPUP_CANCEL_ID);
    }

    #[test]
    fn test_confirm_text_joins_title() {
        assert_eq!(
            premium_popup().confirm_text(),
            "⭐ Премиум персонаж\n\nЦена: 100₽"
        );
    }

    #[test]
    fn test_popup_button_wire_shape() {
        let json = serde_json::to_value(PopupButton::close("close")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "close", "type": "close"}));
    }

    #[test]
    fn test_haptic_kinds() {
        assert_eq!(HapticKind::Warning.to_string(), "warning");
        assert_eq!("soft".parse::<HapticKind>().unwrap(), HapticKind::Soft);
    }

    #[test]
    fn test_loading_button_is_not_pressable() {
        let mut config = ButtonConfig::shown().with_text("Sending…");
        config.loading = true;
        assert!(!config.appearance().is_pressable());
        assert!(ButtonConfig::shown().appearance().is_pressable());
    }
}
