//! The character selection screen use case.

use std::sync::{Arc, RwLock};

use charsel_core::character::{Character, CharacterCatalog};
use charsel_core::config::AppConfig;
use charsel_core::error::Result;
use charsel_core::favorites::FavoritesStore;
use charsel_core::platform::{
    button_handler, ButtonConfig, HapticKind, PlatformBridge, PopupButton, PopupParams,
};
use charsel_core::selection::{ConfirmOutcome, SelectionController, SelectionState};
use charsel_core::submission::{SubmissionPipeline, WebhookSender};
use strum::Display;

pub const PREMIUM_POPUP_TITLE: &str = "⭐ Премиум персонаж";
pub const SETTINGS_POPUP_TITLE: &str = "⚙️ Настройки";
const BUY_ID: &str = "buy";
const CANCEL_ID: &str = "cancel";
const FAVORITES_ID: &str = "favorites";
const ALL_ID: &str = "all";
const CLOSE_ID: &str = "close";

/// Which part of the catalog the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CatalogFilter {
    #[default]
    All,
    Favorites,
}

/// What a click on a character card led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardClick {
    /// The character is now the selection.
    Selected,
    /// A premium character was clicked and the user asked to buy access.
    PurchaseRequested,
    /// A premium character was clicked and the popup was dismissed.
    Dismissed,
    /// A submission is in flight; the click was ignored.
    Busy,
}

/// View model of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterCard {
    pub character: Character,
    pub is_selected: bool,
    pub is_favorite: bool,
}

/// Coordinates the catalog, favorites and the selection controller for one
/// mini-app session.
pub struct SelectionScreen {
    bridge: Arc<dyn PlatformBridge>,
    catalog: CharacterCatalog,
    favorites: Arc<FavoritesStore>,
    controller: Arc<SelectionController>,
    filter: Arc<RwLock<CatalogFilter>>,
}

impl SelectionScreen {
    pub fn new(
        bridge: Arc<dyn PlatformBridge>,
        catalog: CharacterCatalog,
        favorites: Arc<FavoritesStore>,
        controller: Arc<SelectionController>,
    ) -> Self {
        Self {
            bridge,
            catalog,
            favorites,
            controller,
            filter: Arc::new(RwLock::new(CatalogFilter::All)),
        }
    }

    /// Wires favorites, the submission pipeline and the controller from config.
    ///
    /// The identity is read from the bridge once, at launch.
    pub fn assemble(
        bridge: Arc<dyn PlatformBridge>,
        webhook: Arc<dyn WebhookSender>,
        catalog: CharacterCatalog,
        config: &AppConfig,
    ) -> Self {
        let favorites = Arc::new(FavoritesStore::new(
            bridge.clone(),
            config.favorites_key.clone(),
        ));
        let pipeline = SubmissionPipeline::new(webhook, bridge.clone());
        let controller = SelectionController::new(
            bridge.clone(),
            pipeline,
            bridge.identity(),
            config.source.clone(),
        );
        Self::new(bridge, catalog, favorites, controller)
    }

    /// Loads favorites, installs the settings button and signals readiness.
    pub async fn start(&self) {
        self.favorites.load().await;

        let bridge = self.bridge.clone();
        let filter = self.filter.clone();
        let settings = ButtonConfig::shown().with_handler(button_handler(move || {
            let bridge = bridge.clone();
            let filter = filter.clone();
            async move {
                run_settings_popup(bridge.as_ref(), &filter).await;
            }
        }));
        self.bridge.set_settings_button(settings);
        self.controller.refresh_chrome();
        self.bridge.ready();
        tracing::info!(
            "[SelectionScreen] Ready with {} characters, {} favorites",
            self.catalog.len(),
            self.favorites.len()
        );
    }

    pub fn controller(&self) -> &Arc<SelectionController> {
        &self.controller
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn catalog(&self) -> &CharacterCatalog {
        &self.catalog
    }

    pub fn state(&self) -> SelectionState {
        self.controller.state()
    }

    /// Handles a click on the card of `character_id`.
    ///
    /// Premium characters require a premium identity; otherwise a purchase
    /// popup is shown instead of selecting.
    pub async fn click_card(&self, character_id: &str) -> Result<CardClick> {
        let character = self.catalog.require(character_id)?.clone();
        if self.controller.state().is_submitting() {
            tracing::debug!(
                "[SelectionScreen] Ignoring click on '{}' while submitting",
                character_id
            );
            return Ok(CardClick::Busy);
        }

        let has_premium = self.controller.identity().is_some_and(|i| i.is_premium);
        if character.is_premium && !has_premium {
            self.bridge.haptic(HapticKind::Medium);
            let answer = self.bridge.popup(premium_popup(&character)).await;
            if answer == BUY_ID {
                tracing::info!("[SelectionScreen] Opening payment for '{}'", character.id);
                return Ok(CardClick::PurchaseRequested);
            }
            return Ok(CardClick::Dismissed);
        }

        self.controller.select(character);
        Ok(CardClick::Selected)
    }

    /// Toggles the favorite mark of `character_id`; returns the new membership.
    pub async fn toggle_favorite(&self, character_id: &str) -> Result<bool> {
        let character = self.catalog.require(character_id)?;
        Ok(self.favorites.toggle(&character.id).await)
    }

    pub async fn confirm(&self) -> Result<ConfirmOutcome> {
        self.controller.confirm().await
    }

    pub fn reset(&self) {
        self.controller.reset();
    }

    /// Shows the settings popup directly, as the settings button does.
    pub async fn open_settings(&self) -> CatalogFilter {
        run_settings_popup(self.bridge.as_ref(), &self.filter).await
    }

    pub fn filter(&self) -> CatalogFilter {
        *self.filter.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_filter(&self, filter: CatalogFilter) {
        *self.filter.write().unwrap_or_else(|e| e.into_inner()) = filter;
    }

    /// Cards for the filtered catalog, in catalog order.
    pub fn cards(&self) -> Vec<CharacterCard> {
        let characters = match self.filter() {
            CatalogFilter::All => self.catalog.all().to_vec(),
            CatalogFilter::Favorites => self.favorites.list(self.catalog.all()),
        };
        let state = self.controller.state();
        characters
            .into_iter()
            .map(|character| CharacterCard {
                is_selected: state.is_selected_id(&character.id),
                is_favorite: self.favorites.is_favorite(&character.id),
                character,
            })
            .collect()
    }

    pub fn heading(&self) -> String {
        match self
            .controller
            .identity()
            .and_then(|i| i.first_name.as_deref())
        {
            Some(first_name) => format!("Привет, {}! 👋", first_name),
            None => "Выберите персонажа 🎭".to_string(),
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self.filter() {
            CatalogFilter::All => "Нажмите на карточку для выбора",
            CatalogFilter::Favorites => "Ваши избранные персонажи ❤️",
        }
    }

    /// Hint shown when the favorites view is empty.
    pub fn empty_hint(&self) -> Option<&'static str> {
        if self.filter() == CatalogFilter::Favorites && self.favorites.is_empty() {
            Some("У вас пока нет избранных персонажей")
        } else {
            None
        }
    }

    pub fn close(&self) {
        self.bridge.close();
    }
}

async fn run_settings_popup(
    bridge: &dyn PlatformBridge,
    filter: &RwLock<CatalogFilter>,
) -> CatalogFilter {
    bridge.haptic(HapticKind::Light);
    let answer = bridge.popup(settings_popup()).await;
    let mut current = filter.write().unwrap_or_else(|e| e.into_inner());
    match answer.as_str() {
        FAVORITES_ID => *current = CatalogFilter::Favorites,
        ALL_ID => *current = CatalogFilter::All,
        _ => {}
    }
    tracing::debug!("[SelectionScreen] Settings answered '{}', filter: {}", answer, *current);
    *current
}

fn premium_popup(character: &Character) -> PopupParams {
    let price = character
        .price
        .map(|p| format!("\nЦена: {}₽", p))
        .unwrap_or_default();
    PopupParams::new(format!(
        "{} доступен только для Premium подписчиков.{}",
        character.name, price
    ))
    .with_title(PREMIUM_POPUP_TITLE)
    .with_button(PopupButton::new(BUY_ID, "💎 Купить доступ"))
    .with_button(PopupButton::cancel(CANCEL_ID))
}

fn settings_popup() -> PopupParams {
    PopupParams::new("Выберите действие")
        .with_title(SETTINGS_POPUP_TITLE)
        .with_button(PopupButton::new(FAVORITES_ID, "❤️ Избранное"))
        .with_button(PopupButton::new(ALL_ID, "📋 Все персонажи"))
        .with_button(PopupButton::close(CLOSE_ID))
}
