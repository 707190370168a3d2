//! Character domain module.
//!
//! # Module Structure
//!
//! - `model`: Character value type and personality enumeration
//! - `catalog`: Immutable catalog of the characters offered to the user
//!
//! # Usage
//!
//! ```ignore
//! use charsel_core::character::{Character, CharacterCatalog, Personality};
//! ```

mod catalog;
mod model;

// Re-export public API
pub use catalog::CharacterCatalog;
pub use model::{Character, Personality};
