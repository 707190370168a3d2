//! Selection state types.

use strum::Display;

use crate::character::Character;

/// Where the user is in the select → confirm → submit flow.
///
/// Every non-idle state refers to the character the user chose.
#[derive(Debug, Clone, PartialEq, Default, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SelectionState {
    /// No character chosen.
    #[default]
    Idle,
    /// Chosen, not yet submitted.
    Selected(Character),
    /// Submission in flight.
    Submitting(Character),
    /// Last submission succeeded.
    Confirmed(Character),
    /// Last submission failed; the character stays selected for a retry.
    Failed(Character, String),
}

impl SelectionState {
    /// The character this state refers to, if any.
    pub fn character(&self) -> Option<&Character> {
        match self {
            Self::Idle => None,
            Self::Selected(c) | Self::Submitting(c) | Self::Confirmed(c) | Self::Failed(c, _) => {
                Some(c)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    /// Failure reason of the last submission.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(_, reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_selected_id(&self, character_id: &str) -> bool {
        self.character().is_some_and(|c| c.id == character_id)
    }
}
