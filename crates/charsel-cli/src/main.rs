use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "charsel")]
#[command(about = "CHARSEL - pick a chat character and hand the choice to the bot backend", long_about = None)]
struct Cli {
    #[command(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Numeric id of the user the selection is made for
    #[arg(long, global = true)]
    pub user_id: Option<i64>,

    #[arg(long, global = true, requires = "user_id")]
    pub username: Option<String>,

    #[arg(long, global = true, requires = "user_id")]
    pub first_name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available characters
    Characters,
    /// Select a character and submit the choice
    Pick {
        /// Character id
        id: String,
        /// Run without the terminal host (no storage, no native channel)
        #[arg(long)]
        preview: bool,
    },
    /// Manage favorite characters
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Print the submission payload for a character without sending it
    Payload {
        /// Character id
        id: String,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorite characters
    List,
    /// Add or remove a character from favorites
    Toggle {
        /// Character id
        id: String,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("charsel=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let session = cli.session;

    match cli.command {
        Commands::Characters => commands::characters::run(&session).await?,
        Commands::Pick { id, preview } => commands::pick::run(&session, &id, preview).await?,
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(&session).await?,
            FavoritesAction::Toggle { id } => commands::favorites::toggle(&session, &id).await?,
        },
        Commands::Payload { id } => commands::payload::run(&session, &id).await?,
    }

    Ok(())
}
