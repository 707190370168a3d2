//! The selection state machine.
//!
//! ```text
//! Idle ──select(c)──▶ Selected(c) ──confirm()──▶ Submitting(c) ──ok──▶ Confirmed(c)
//!                        ▲  ▲                          │
//!                        │  └──────select(c2)──────────┤──err──▶ Failed(c, reason)
//!                        └─────────────confirm() (retry)──────────────┘
//! any ──reset()──▶ Idle
//! ```
//!
//! Every `select`, `reset` and `confirm` starts a new episode. A submission
//! result is applied only if its episode is still current, so results that
//! arrive after a reset or a re-selection are discarded.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::sync::watch;

use super::state::SelectionState;
use crate::buttons::{ButtonAction, ButtonSynchronizer};
use crate::character::Character;
use crate::error::{CharselError, Result};
use crate::identity::Identity;
use crate::platform::{
    button_handler, ButtonHandler, HapticKind, PlatformBridge, PopupButton, PopupParams,
};
use crate::submission::{SubmissionPayload, SubmissionPipeline, SubmissionReceipt};

pub const SUCCESS_POPUP_TITLE: &str = "✅ Успешно!";
pub const FAILURE_ALERT: &str = "❌ Не удалось отправить выбор. Попробуйте ещё раз.";

/// Result of a `confirm()` that went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The submission succeeded and the controller is `Confirmed`.
    Confirmed(SubmissionReceipt),
    /// The controller moved on while the submission was in flight; its result
    /// was discarded.
    Superseded,
}

struct Inner {
    state: SelectionState,
    episode: u64,
}

/// Owner of the [`SelectionState`]; the only caller of the submission pipeline.
pub struct SelectionController {
    bridge: Arc<dyn PlatformBridge>,
    pipeline: SubmissionPipeline,
    identity: Option<Identity>,
    source: String,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<SelectionState>,
    this: Weak<SelectionController>,
}

impl SelectionController {
    /// Creates an idle controller and applies the initial chrome.
    pub fn new(
        bridge: Arc<dyn PlatformBridge>,
        pipeline: SubmissionPipeline,
        identity: Option<Identity>,
        source: impl Into<String>,
    ) -> Arc<Self> {
        let (state_tx, _) = watch::channel(SelectionState::Idle);
        let controller = Arc::new_cyclic(|this| Self {
            bridge,
            pipeline,
            identity,
            source: source.into(),
            inner: Mutex::new(Inner {
                state: SelectionState::Idle,
                episode: 0,
            }),
            state_tx,
            this: this.clone(),
        });
        controller.refresh_chrome();
        controller
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> SelectionState {
        self.lock().state.clone()
    }

    pub fn selected(&self) -> Option<Character> {
        self.lock().state.character().cloned()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Receiver notified after every transition.
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.state_tx.subscribe()
    }

    /// Selects `character` from any state, discarding the previous subject.
    pub fn select(&self, character: Character) {
        self.bridge.haptic(HapticKind::Medium);
        {
            let mut inner = self.lock();
            tracing::debug!(
                "[SelectionController] {} -> selected({})",
                inner.state,
                character.id
            );
            inner.episode += 1;
            inner.state = SelectionState::Selected(character);
        }
        self.publish();
    }

    /// Returns to `Idle` from any state.
    pub fn reset(&self) {
        self.bridge.haptic(HapticKind::Light);
        {
            let mut inner = self.lock();
            tracing::debug!("[SelectionController] {} -> idle", inner.state);
            inner.episode += 1;
            inner.state = SelectionState::Idle;
        }
        self.publish();
    }

    /// Submits the current selection.
    ///
    /// Refused with [`CharselError::NothingSelected`] when idle and with
    /// [`CharselError::DuplicateSubmission`] while a submission is in flight;
    /// refusals leave the state untouched. A delivery failure moves the
    /// controller to `Failed`, alerts the user and is returned as the error.
    pub async fn confirm(&self) -> Result<ConfirmOutcome> {
        let (character, episode) = {
            let mut inner = self.lock();
            let character = match &inner.state {
                SelectionState::Idle => {
                    tracing::debug!("[SelectionController] confirm() ignored, nothing selected");
                    return Err(CharselError::NothingSelected);
                }
                SelectionState::Submitting(c) => {
                    tracing::debug!(
                        "[SelectionController] confirm() ignored, '{}' already submitting",
                        c.id
                    );
                    return Err(CharselError::DuplicateSubmission);
                }
                SelectionState::Selected(c)
                | SelectionState::Confirmed(c)
                | SelectionState::Failed(c, _) => c.clone(),
            };
            inner.episode += 1;
            inner.state = SelectionState::Submitting(character.clone());
            (character, inner.episode)
        };
        self.publish();
        self.bridge.haptic(HapticKind::Success);

        let payload = SubmissionPayload::new(&character, self.identity.as_ref(), &self.source);
        let result = self.pipeline.submit(&payload).await;

        let applied = {
            let mut inner = self.lock();
            let still_current = inner.episode == episode
                && matches!(&inner.state, SelectionState::Submitting(c) if c.id == character.id);
            if still_current {
                inner.state = match &result {
                    Ok(_) => SelectionState::Confirmed(character.clone()),
                    Err(e) => SelectionState::Failed(character.clone(), e.reason()),
                };
            }
            still_current
        };

        if !applied {
            tracing::info!(
                "[SelectionController] Discarding stale submission result for '{}'",
                character.id
            );
            return Ok(ConfirmOutcome::Superseded);
        }
        self.publish();

        match result {
            Ok(receipt) => {
                self.bridge.popup(success_popup(&character)).await;
                Ok(ConfirmOutcome::Confirmed(receipt))
            }
            Err(e) => {
                self.bridge.haptic(HapticKind::Error);
                self.bridge.alert(FAILURE_ALERT).await;
                Err(e)
            }
        }
    }

    /// Re-applies the chrome for the current state, e.g. after a theme change.
    pub fn refresh_chrome(&self) {
        let state = self.state();
        let theme = self.bridge.theme();
        let layout = ButtonSynchronizer::derive(&state, theme.as_ref());
        ButtonSynchronizer::apply(self.bridge.as_ref(), &layout, |action| {
            self.handler_for(action)
        });
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state());
        self.refresh_chrome();
    }

    fn handler_for(&self, action: ButtonAction) -> ButtonHandler {
        let this = self.this.clone();
        button_handler(move || {
            let this = this.clone();
            async move {
                let Some(controller) = this.upgrade() else {
                    return;
                };
                match action {
                    ButtonAction::Confirm => {
                        if let Err(e) = controller.confirm().await
                            && !e.is_refusal()
                        {
                            tracing::debug!(
                                "[SelectionController] Confirm from button failed: {}",
                                e
                            );
                        }
                    }
                    ButtonAction::Reset => controller.reset(),
                }
            }
        })
    }
}

fn success_popup(character: &Character) -> PopupParams {
    PopupParams::new(format!(
        "Вы выбрали {} {}! Скоро {} напишет вам в чате.",
        character.emoji, character.name, character.name
    ))
    .with_title(SUCCESS_POPUP_TITLE)
    .with_button(PopupButton::ok("ok"))
}
