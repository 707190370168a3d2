//! Character domain model.
//!
//! Characters are immutable values owned by the catalog. Every other part of
//! the flow only reads them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{CharselError, Result};

/// Personality archetype of a character.
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Personality {
    Creative,
    Professional,
    Friendly,
    Mysterious,
}

/// A character the user can pick.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Unique identifier within the catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Avatar emoji
    pub emoji: String,
    pub description: String,
    /// Age in years, always positive
    pub age: u32,
    /// Free-form mood label
    pub mood: String,
    pub personality: Personality,
    /// Optional avatar image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether the character requires a premium subscription
    #[serde(default)]
    pub is_premium: bool,
    /// Price shown for premium characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Character {
    /// Checks the record invariants: non-empty id, positive age, and a positive
    /// price for premium characters.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CharselError::invalid_character(&self.id, "id must not be empty"));
        }
        if self.age == 0 {
            return Err(CharselError::invalid_character(&self.id, "age must be positive"));
        }
        match self.price {
            Some(price) if price <= 0.0 || !price.is_finite() => Err(
                CharselError::invalid_character(&self.id, "price must be a positive number"),
            ),
            None if self.is_premium => Err(CharselError::invalid_character(
                &self.id,
                "premium characters require a price",
            )),
            _ => Ok(()),
        }
    }
}
