//! Per-button handler bookkeeping shared by the bridge adapters.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::types::{ButtonAppearance, ButtonConfig, ButtonHandler, ButtonKind};

#[derive(Default)]
struct ButtonSlot {
    appearance: ButtonAppearance,
    handler: Option<ButtonHandler>,
}

/// Tracks the current appearance and the single activation handler of each
/// chrome button.
#[derive(Default)]
pub struct ButtonRegistry {
    slots: Mutex<HashMap<ButtonKind, ButtonSlot>>,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<ButtonKind, ButtonSlot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Applies a configuration and returns the appearance to render.
    ///
    /// A new handler detaches the old one before it is attached, so a button
    /// never holds two handlers.
    pub fn apply(&self, kind: ButtonKind, config: ButtonConfig) -> ButtonAppearance {
        let appearance = config.appearance();
        let mut slots = self.slots();
        let slot = slots.entry(kind).or_default();
        if let Some(handler) = config.on_activate {
            slot.handler.take();
            slot.handler = Some(handler);
        }
        slot.appearance = appearance.clone();
        appearance
    }

    /// Hides a button and detaches its handler.
    pub fn hide(&self, kind: ButtonKind) -> ButtonAppearance {
        let mut slots = self.slots();
        let slot = slots.entry(kind).or_default();
        slot.handler = None;
        slot.appearance = ButtonAppearance::hidden();
        slot.appearance.clone()
    }

    pub fn appearance(&self, kind: ButtonKind) -> Option<ButtonAppearance> {
        self.slots().get(&kind).map(|slot| slot.appearance.clone())
    }

    pub fn has_handler(&self, kind: ButtonKind) -> bool {
        self.slots()
            .get(&kind)
            .is_some_and(|slot| slot.handler.is_some())
    }

    /// Runs the handler of a pressed button.
    ///
    /// Returns `false` when the button is hidden, disabled, loading or has no
    /// handler. The lock is released before the handler runs so handlers may
    /// reconfigure buttons.
    pub async fn dispatch(&self, kind: ButtonKind) -> bool {
        let handler = {
            let slots = self.slots();
            match slots.get(&kind) {
                Some(slot) if slot.appearance.is_pressable() => slot.handler.clone(),
                _ => None,
            }
        };
        match handler {
            Some(handler) => {
                handler().await;
                true
            }
            None => {
                tracing::debug!("[ButtonRegistry] Ignoring press on inactive {} button", kind);
                false
            }
        }
    }
}
