use anyhow::Result;
use charsel_core::character::CharacterCatalog;
use charsel_core::favorites::FavoritesStore;
use colored::Colorize;

use super::{load_config, terminal_bridge};
use crate::SessionArgs;

pub async fn run(session: &SessionArgs) -> Result<()> {
    let config = load_config(session).await?;
    let favorites = FavoritesStore::new(terminal_bridge(session, &config)?, config.favorites_key);
    favorites.load().await;

    let catalog = CharacterCatalog::builtin();
    println!("{}", "=== Characters ===".bright_magenta().bold());
    for character in catalog.all() {
        let heart = if favorites.is_favorite(&character.id) {
            "❤️"
        } else {
            "🤍"
        };
        let mut line = format!(
            "{} {} {:<8} {} ({}, {} лет, {})",
            heart,
            character.emoji,
            character.id.cyan(),
            character.name.bold(),
            character.personality,
            character.age,
            character.mood
        );
        if let (true, Some(price)) = (character.is_premium, character.price) {
            line.push_str(&format!(" {}", format!("⭐ PREMIUM {}₽", price).yellow()));
        }
        println!("{}", line);
        println!("    {}", character.description.dimmed());
    }
    Ok(())
}
