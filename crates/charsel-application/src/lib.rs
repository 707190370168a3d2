//! Application layer for CHARSEL.
//!
//! Page-level logic of the character picker on top of the core selection
//! flow: premium gate, catalog filter, favorites and card view models.

pub mod selection_screen;

pub use selection_screen::{CardClick, CatalogFilter, CharacterCard, SelectionScreen};
