//! Derivation of host chrome from selection state.
//!
//! [`ButtonSynchronizer::derive`] is a pure function of the state and theme;
//! [`ButtonSynchronizer::apply`] pushes its result through the bridge. The
//! controller runs both after every transition and theme change.

use crate::platform::{ButtonAppearance, ButtonConfig, ButtonHandler, PlatformBridge, ThemeParams};
use crate::selection::SelectionState;

pub const FALLBACK_BUTTON_COLOR: &str = "#FF6B6B";
pub const FALLBACK_BUTTON_TEXT_COLOR: &str = "#ffffff";
pub const SENDING_LABEL: &str = "Sending…";

/// What pressing a chrome button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Confirm,
    Reset,
}

/// Desired state of one chrome button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub appearance: ButtonAppearance,
    pub action: Option<ButtonAction>,
}

/// Desired state of the primary and back buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeLayout {
    pub primary: ButtonSpec,
    pub back: ButtonSpec,
}

pub fn continue_label(character_name: &str) -> String {
    format!("Continue with {}", character_name)
}

pub struct ButtonSynchronizer;

impl ButtonSynchronizer {
    pub fn derive(state: &SelectionState, theme: Option<&ThemeParams>) -> ChromeLayout {
        let color = theme
            .and_then(|t| t.button_color.clone())
            .unwrap_or_else(|| FALLBACK_BUTTON_COLOR.to_string());
        let text_color = theme
            .and_then(|t| t.button_text_color.clone())
            .unwrap_or_else(|| FALLBACK_BUTTON_TEXT_COLOR.to_string());

        let primary = match state {
            SelectionState::Idle => ButtonSpec {
                appearance: ButtonAppearance::hidden(),
                action: None,
            },
            SelectionState::Submitting(_) => ButtonSpec {
                appearance: ButtonAppearance {
                    text: Some(SENDING_LABEL.to_string()),
                    visible: true,
                    enabled: false,
                    loading: true,
                    color: Some(color),
                    text_color: Some(text_color),
                    shine_effect: false,
                },
                action: None,
            },
            SelectionState::Selected(c)
            | SelectionState::Confirmed(c)
            | SelectionState::Failed(c, _) => ButtonSpec {
                appearance: ButtonAppearance {
                    text: Some(continue_label(&c.name)),
                    visible: true,
                    enabled: true,
                    loading: false,
                    color: Some(color),
                    text_color: Some(text_color),
                    shine_effect: true,
                },
                action: Some(ButtonAction::Confirm),
            },
        };

        let has_selection = !state.is_idle();
        let back = ButtonSpec {
            appearance: ButtonAppearance {
                visible: has_selection,
                enabled: has_selection,
                ..ButtonAppearance::default()
            },
            action: Some(ButtonAction::Reset),
        };

        ChromeLayout { primary, back }
    }

    /// Pushes a layout to the host, building handlers with `handler_for`.
    pub fn apply<F>(bridge: &dyn PlatformBridge, layout: &ChromeLayout, handler_for: F)
    where
        F: Fn(ButtonAction) -> ButtonHandler,
    {
        if layout.primary.appearance.visible {
            bridge.set_primary_button(Self::config(&layout.primary, &handler_for));
        } else {
            bridge.hide_primary_button();
        }
        bridge.set_back_button(Self::config(&layout.back, &handler_for));
    }

    fn config<F>(spec: &ButtonSpec, handler_for: &F) -> ButtonConfig
    where
        F: Fn(ButtonAction) -> ButtonHandler,
    {
        let appearance = spec.appearance.clone();
        ButtonConfig {
            text: appearance.text,
            visible: appearance.visible,
            enabled: appearance.enabled,
            loading: appearance.loading,
            color: appearance.color,
            text_color: appearance.text_color,
            shine_effect: appearance.shine_effect,
            on_activate: spec.action.map(handler_for),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterCatalog;
    use crate::platform::{button_handler, ButtonKind};
    use crate::testing::RecordingBridge;
    use std::sync::{Arc, Mutex};

    fn kate_state(make: fn(crate::character::Character) -> SelectionState) -> SelectionState {
        make(CharacterCatalog::builtin().get("kate").cloned().unwrap())
    }

    #[test]
    fn test_idle_hides_primary_and_back() {
        let layout = ButtonSynchronizer::derive(&SelectionState::Idle, None);
        assert!(!layout.primary.appearance.visible);
        assert_eq!(layout.primary.action, None);
        assert!(!layout.back.appearance.visible);
        assert_eq!(layout.back.action, Some(ButtonAction::Reset));
    }

    #[test]
    fn test_selected_uses_theme_colors() {
        let theme = ThemeParams {
            button_color: Some("#5288c1".to_string()),
            button_text_color: Some("#000000".to_string()),
            ..ThemeParams::default()
        };
        let layout =
            ButtonSynchronizer::derive(&kate_state(SelectionState::Selected), Some(&theme));
        let primary = &layout.primary.appearance;
        assert_eq!(primary.text.as_deref(), Some("Continue with Кейт"));
        assert!(primary.visible && primary.enabled && !primary.loading);
        assert_eq!(primary.color.as_deref(), Some("#5288c1"));
        assert_eq!(primary.text_color.as_deref(), Some("#000000"));
        assert_eq!(layout.primary.action, Some(ButtonAction::Confirm));
        assert!(layout.back.appearance.visible);
    }

    #[test]
    fn test_fallback_colors_without_theme() {
        let layout = ButtonSynchronizer::derive(&kate_state(SelectionState::Selected), None);
        assert_eq!(layout.primary.appearance.color.as_deref(), Some(FALLBACK_BUTTON_COLOR));
        assert_eq!(
            layout.primary.appearance.text_color.as_deref(),
            Some(FALLBACK_BUTTON_TEXT_COLOR)
        );
    }

    #[test]
    fn test_submitting_disables_and_shows_loading() {
        let layout = ButtonSynchronizer::derive(&kate_state(SelectionState::Submitting), None);
        let primary = &layout.primary.appearance;
        assert_eq!(primary.text.as_deref(), Some(SENDING_LABEL));
        assert!(primary.visible && !primary.enabled && primary.loading);
        assert_eq!(layout.primary.action, None);
        assert!(layout.back.appearance.visible);
    }

    #[test]
    fn test_confirmed_and_failed_match_selected() {
        let selected = ButtonSynchronizer::derive(&kate_state(SelectionState::Selected), None);
        let confirmed = ButtonSynchronizer::derive(&kate_state(SelectionState::Confirmed), None);
        let failed = ButtonSynchronizer::derive(
            &kate_state(|c| SelectionState::Failed(c, "HTTP 500".to_string())),
            None,
        );
        assert_eq!(selected, confirmed);
        assert_eq!(selected, failed);
    }

    #[tokio::test]
    async fn test_apply_wires_handlers_by_action() {
        let bridge = RecordingBridge::default();
        let pressed = Arc::new(Mutex::new(Vec::new()));
        let layout = ButtonSynchronizer::derive(&kate_state(SelectionState::Selected), None);

        let log = pressed.clone();
        ButtonSynchronizer::apply(&bridge, &layout, move |action| {
            let log = log.clone();
            button_handler(move || {
                let log = log.clone();
                async move {
                    log.lock().unwrap().push(action);
                }
            })
        });

        assert!(bridge.activate(ButtonKind::Primary).await);
        assert!(bridge.activate(ButtonKind::Back).await);
        assert_eq!(
            pressed.lock().unwrap().clone(),
            vec![ButtonAction::Confirm, ButtonAction::Reset]
        );

        let idle = ButtonSynchronizer::derive(&SelectionState::Idle, None);
        ButtonSynchronizer::apply(&bridge, &idle, |_| button_handler(|| async {}));
        assert_eq!(bridge.button(ButtonKind::Primary), Some(ButtonAppearance::hidden()));
        assert!(!bridge.activate(ButtonKind::Back).await);
    }
}
