//! Selection state machine.
//!
//! # Module Structure
//!
//! - `state`: [`SelectionState`]
//! - `controller`: [`SelectionController`], the only owner of the state

mod controller;
mod state;

// Re-export public API
pub use controller::{ConfirmOutcome, SelectionController};
pub use state::SelectionState;
