//! Static character catalog.

use super::model::{Character, Personality};
use crate::error::{CharselError, Result};

/// Immutable, ordered collection of the characters offered to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterCatalog {
    characters: Vec<Character>,
}

impl CharacterCatalog {
    /// Builds a catalog after validating every record and rejecting duplicate ids.
    pub fn new(characters: Vec<Character>) -> Result<Self> {
        for (index, character) in characters.iter().enumerate() {
            character.validate()?;
            if characters[..index].iter().any(|c| c.id == character.id) {
                return Err(CharselError::invalid_character(
                    &character.id,
                    "duplicate id",
                ));
            }
        }
        Ok(Self { characters })
    }

    /// Parses a JSON array of character records.
    pub fn from_json(json: &str) -> Result<Self> {
        let characters: Vec<Character> = serde_json::from_str(json)?;
        Self::new(characters)
    }

    /// The characters shipped with the mini-app.
    pub fn builtin() -> Self {
        Self {
            characters: vec![
                Character {
                    id: "anna".to_string(),
                    name: "Анна".to_string(),
                    emoji: "👩‍🦰".to_string(),
                    description: "Творческая и артистичная личность. Любит искусство, музыку и глубокие беседы о жизни.".to_string(),
                    age: 25,
                    mood: "Вдохновлённая".to_string(),
                    personality: Personality::Creative,
                    image_url: None,
                    is_premium: false,
                    price: None,
                },
                Character {
                    id: "kate".to_string(),
                    name: "Кейт".to_string(),
                    emoji: "👩‍💼".to_string(),
                    description: "Деловая и целеустремлённая. Предпочитает прямое общение и практичный подход к делам.".to_string(),
                    age: 28,
                    mood: "Энергичная".to_string(),
                    personality: Personality::Professional,
                    image_url: None,
                    is_premium: false,
                    price: None,
                },
                Character {
                    id: "lisa".to_string(),
                    name: "Лиза".to_string(),
                    emoji: "👩‍🎨".to_string(),
                    description: "Дружелюбная и открытая. Всегда готова поддержать и развеселить.".to_string(),
                    age: 24,
                    mood: "Весёлая".to_string(),
                    personality: Personality::Friendly,
                    image_url: None,
                    is_premium: false,
                    price: None,
                },
                Character {
                    id: "sofia".to_string(),
                    name: "София".to_string(),
                    emoji: "👩‍🎤".to_string(),
                    description: "Загадочная и интригующая. Любит философские беседы и ночные разговоры.".to_string(),
                    age: 26,
                    mood: "Задумчивая".to_string(),
                    personality: Personality::Mysterious,
                    image_url: None,
                    is_premium: true,
                    price: Some(100.0),
                },
            ],
        }
    }

    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    /// Looks up a character by id.
    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Looks up a character by id, failing with `NotFound`.
    pub fn require(&self, id: &str) -> Result<&Character> {
        self.get(id)
            .ok_or_else(|| CharselError::not_found("character", id))
    }

    /// Characters available without a premium subscription.
    pub fn free(&self) -> Vec<&Character> {
        self.characters.iter().filter(|c| !c.is_premium).collect()
    }

    pub fn premium(&self) -> Vec<&Character> {
        self.characters.iter().filter(|c| c.is_premium).collect()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl Default for CharacterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
