use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::character::{Character, Personality};
use crate::error::Result;
use crate::identity::Identity;

pub const ACTION_CHARACTER_SELECTED: &str = "character_selected";

/// Payload describing one selection, sent identically to every channel.
///
/// Built fresh for each attempt; the timestamp is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub action: String,
    pub character_id: String,
    pub character_name: String,
    pub character_emoji: String,
    pub character_personality: Personality,
    pub character_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// ISO-8601 UTC timestamp with millisecond precision
    pub timestamp: String,
    pub source: String,
}

impl SubmissionPayload {
    pub fn new(character: &Character, identity: Option<&Identity>, source: &str) -> Self {
        Self::at(character, identity, source, Utc::now())
    }

    /// Builds a payload stamped with `now`.
    pub fn at(
        character: &Character,
        identity: Option<&Identity>,
        source: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            action: ACTION_CHARACTER_SELECTED.to_string(),
            character_id: character.id.clone(),
            character_name: character.name.clone(),
            character_emoji: character.emoji.clone(),
            character_personality: character.personality,
            character_description: character.description.clone(),
            user_id: identity.map(|i| i.id),
            username: identity.and_then(|i| i.username.clone()),
            first_name: identity.and_then(|i| i.first_name.clone()),
            last_name: identity.and_then(|i| i.last_name.clone()),
            language_code: identity.and_then(|i| i.language_code.clone()),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            source: source.to_string(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
