use std::sync::Arc;

use anyhow::{bail, Result};
use charsel_application::{CardClick, SelectionScreen};
use charsel_core::character::CharacterCatalog;
use charsel_core::platform::{PlatformBridge, PreviewBridge};
use charsel_core::selection::ConfirmOutcome;
use charsel_infrastructure::HttpWebhookSender;
use colored::Colorize;

use super::{identity, load_config, terminal_bridge};
use crate::SessionArgs;

pub async fn run(session: &SessionArgs, id: &str, preview: bool) -> Result<()> {
    let config = load_config(session).await?;

    let bridge: Arc<dyn PlatformBridge> = if preview {
        let bridge = match identity(session) {
            Some(identity) => PreviewBridge::new(config.environment).with_identity(identity),
            None if config.environment.is_development() => PreviewBridge::development(),
            None => PreviewBridge::new(config.environment),
        };
        Arc::new(bridge)
    } else {
        terminal_bridge(session, &config)?
    };

    let webhook = Arc::new(HttpWebhookSender::from_settings(&config.webhook));
    let screen =
        SelectionScreen::assemble(bridge, webhook, CharacterCatalog::builtin(), &config);
    screen.start().await;
    println!("{}", screen.heading().bold());

    match screen.click_card(id).await? {
        CardClick::Selected => {}
        CardClick::PurchaseRequested => {
            println!("{}", "💎 Premium access is required for this character.".yellow());
            return Ok(());
        }
        CardClick::Dismissed | CardClick::Busy => return Ok(()),
    }

    match screen.confirm().await {
        Ok(ConfirmOutcome::Confirmed(receipt)) => {
            println!("{}", "✅ Selection delivered".green().bold());
            if !receipt.native_delivered {
                println!("{}", "(native channel did not accept the payload)".dimmed());
            }
            Ok(())
        }
        Ok(ConfirmOutcome::Superseded) => Ok(()),
        Err(e) => {
            let state = screen.state();
            let reason = state.failure().map(str::to_string).unwrap_or_else(|| e.to_string());
            eprintln!("{} {}", "❌".red(), reason);
            bail!("Selection was not delivered: {}", e)
        }
    }
}
