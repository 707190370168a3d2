//! Integration tests for SelectionScreen over the preview bridge.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use charsel_application::{CardClick, CatalogFilter, SelectionScreen};
use charsel_core::character::CharacterCatalog;
use charsel_core::config::{AppConfig, RuntimeEnvironment};
use charsel_core::error::{CharselError, Result};
use charsel_core::identity::Identity;
use charsel_core::platform::{ButtonKind, LoggedDialogs, PlatformBridge, PreviewBridge};
use charsel_core::selection::SelectionState;
use charsel_core::submission::{SubmissionPayload, WebhookSender};
use tokio::sync::Notify;

/// Webhook mock recording payloads, optionally held until released.
#[derive(Default)]
struct MockWebhook {
    delivered: Mutex<Vec<SubmissionPayload>>,
    gate: Option<Notify>,
}

impl MockWebhook {
    fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::default()
        }
    }

    fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    fn delivered(&self) -> Vec<SubmissionPayload> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookSender for MockWebhook {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<()> {
        self.delivered.lock().unwrap().push(payload.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(())
    }
}

fn regular_user() -> Identity {
    Identity::new(1001).with_first_name("Ivan")
}

fn build_screen(
    bridge: PreviewBridge,
    webhook: Arc<MockWebhook>,
) -> (SelectionScreen, Arc<PreviewBridge>) {
    let bridge = Arc::new(bridge);
    let screen = SelectionScreen::assemble(
        bridge.clone(),
        webhook,
        CharacterCatalog::builtin(),
        &AppConfig::default(),
    );
    (screen, bridge)
}

fn preview(identity: Identity, accept_dialogs: bool) -> PreviewBridge {
    PreviewBridge::new(RuntimeEnvironment::Development)
        .with_identity(identity)
        .with_dialogs(Arc::new(LoggedDialogs::new(accept_dialogs)))
}

#[tokio::test]
async fn test_start_installs_settings_button_and_signals_ready() {
    let (screen, bridge) = build_screen(preview(regular_user(), true), Arc::default());
    screen.start().await;

    assert!(bridge.is_ready());
    assert!(bridge.button(ButtonKind::Settings).unwrap().visible);
    assert!(!bridge.button(ButtonKind::Primary).unwrap().visible);
    assert_eq!(screen.heading(), "Привет, Ivan! 👋");
    assert_eq!(screen.subtitle(), "Нажмите на карточку для выбора");
    assert_eq!(screen.cards().len(), 4);
}

#[tokio::test]
async fn test_anonymous_heading() {
    let bridge = PreviewBridge::new(RuntimeEnvironment::Production);
    let (screen, _) = build_screen(bridge, Arc::default());
    assert_eq!(screen.heading(), "Выберите персонажа 🎭");
}

#[tokio::test]
async fn test_premium_character_requires_premium_identity() {
    let (screen, _) = build_screen(preview(regular_user(), true), Arc::default());
    assert_eq!(
        screen.click_card("sofia").await.unwrap(),
        CardClick::PurchaseRequested
    );
    assert!(screen.state().is_idle());

    let (screen, _) = build_screen(preview(regular_user(), false), Arc::default());
    assert_eq!(screen.click_card("sofia").await.unwrap(), CardClick::Dismissed);
    assert!(screen.state().is_idle());
}

#[tokio::test]
async fn test_premium_identity_selects_premium_character() {
    let (screen, _) = build_screen(PreviewBridge::development(), Arc::default());
    assert_eq!(screen.click_card("sofia").await.unwrap(), CardClick::Selected);
    let cards = screen.cards();
    let sofia = cards.iter().find(|c| c.character.id == "sofia").unwrap();
    assert!(sofia.is_selected);
}

#[tokio::test]
async fn test_unknown_character_is_not_found() {
    let (screen, _) = build_screen(preview(regular_user(), true), Arc::default());
    let err = screen.click_card("nobody").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        screen.toggle_favorite("nobody").await.unwrap_err(),
        CharselError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_settings_button_switches_to_favorites() {
    let (screen, bridge) = build_screen(preview(regular_user(), true), Arc::default());
    screen.start().await;

    assert!(bridge.activate(ButtonKind::Settings).await);
    assert_eq!(screen.filter(), CatalogFilter::Favorites);
    assert!(screen.cards().is_empty());
    assert_eq!(
        screen.empty_hint(),
        Some("У вас пока нет избранных персонажей")
    );

    assert!(screen.toggle_favorite("lisa").await.unwrap());
    let cards = screen.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].character.id, "lisa");
    assert!(cards[0].is_favorite);
    assert_eq!(screen.subtitle(), "Ваши избранные персонажи ❤️");
    assert_eq!(screen.empty_hint(), None);
}

#[tokio::test]
async fn test_settings_close_keeps_filter() {
    let (screen, _) = build_screen(preview(regular_user(), false), Arc::default());
    screen.set_filter(CatalogFilter::Favorites);
    assert_eq!(screen.open_settings().await, CatalogFilter::Favorites);
}

#[tokio::test]
async fn test_select_and_confirm_through_primary_button() {
    let webhook = Arc::new(MockWebhook::default());
    let (screen, bridge) = build_screen(preview(regular_user(), true), webhook.clone());
    screen.start().await;

    assert_eq!(screen.click_card("kate").await.unwrap(), CardClick::Selected);
    assert!(bridge.activate(ButtonKind::Primary).await);

    let kate = screen.catalog().get("kate").cloned().unwrap();
    assert_eq!(screen.state(), SelectionState::Confirmed(kate));
    let delivered = webhook.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].character_id, "kate");
    assert_eq!(delivered[0].user_id, Some(1001));
    assert_eq!(delivered[0].first_name.as_deref(), Some("Ivan"));
    assert_eq!(delivered[0].source, "miniapp");

    assert!(bridge.activate(ButtonKind::Back).await);
    assert!(screen.state().is_idle());
}

#[tokio::test]
async fn test_clicks_while_submitting_are_ignored() {
    let webhook = Arc::new(MockWebhook::gated());
    let (screen, _) = build_screen(preview(regular_user(), true), webhook.clone());
    let screen = Arc::new(screen);
    screen.click_card("anna").await.unwrap();

    let mut states = screen.controller().subscribe();
    let background = screen.clone();
    let pending = tokio::spawn(async move { background.confirm().await });
    states.wait_for(|s| s.is_submitting()).await.unwrap();

    assert_eq!(screen.click_card("lisa").await.unwrap(), CardClick::Busy);

    webhook.release();
    pending.await.unwrap().unwrap();
    assert_eq!(webhook.delivered().len(), 1);
    assert_eq!(
        screen.state().character().map(|c| c.id.as_str()),
        Some("anna")
    );
}
