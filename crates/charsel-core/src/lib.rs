pub mod buttons;
pub mod character;
pub mod config;
pub mod error;
pub mod favorites;
pub mod identity;
pub mod platform;
pub mod selection;
pub mod submission;

#[cfg(test)]
mod testing;

// Re-export common error type
pub use error::{CharselError, Result};
