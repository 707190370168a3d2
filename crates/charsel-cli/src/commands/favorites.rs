use anyhow::Result;
use charsel_core::character::CharacterCatalog;
use charsel_core::favorites::FavoritesStore;
use colored::Colorize;

use super::{load_config, terminal_bridge};
use crate::SessionArgs;

async fn open(session: &SessionArgs) -> Result<FavoritesStore> {
    let config = load_config(session).await?;
    let favorites = FavoritesStore::new(terminal_bridge(session, &config)?, config.favorites_key);
    favorites.load().await;
    Ok(favorites)
}

pub async fn list(session: &SessionArgs) -> Result<()> {
    let favorites = open(session).await?;
    let catalog = CharacterCatalog::builtin();
    let listed = favorites.list(catalog.all());
    if listed.is_empty() {
        println!("{}", "У вас пока нет избранных персонажей".dimmed());
        return Ok(());
    }
    for character in listed {
        println!("❤️ {} {} {}", character.emoji, character.id.cyan(), character.name.bold());
    }
    Ok(())
}

pub async fn toggle(session: &SessionArgs, id: &str) -> Result<()> {
    let catalog = CharacterCatalog::builtin();
    let character = catalog.require(id)?;
    let favorites = open(session).await?;
    if favorites.toggle(&character.id).await {
        println!("{} {}", "❤️ Added to favorites:".green(), character.name.bold());
    } else {
        println!("{} {}", "🤍 Removed from favorites:".yellow(), character.name.bold());
    }
    Ok(())
}
