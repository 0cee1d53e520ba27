use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Angor crowdfunding transaction indexer
#[derive(Parser)]
#[command(name = "angor-indexer")]
#[command(about = "Angor crowdfunding transaction indexer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Derive the project identifier of a founder public key
    Derive(commands::derive::DeriveCommand),
    /// Decode a raw creation or investment transaction offline
    Decode(commands::decode::DecodeCommand),
    /// Fetch and index a single transaction
    IndexTx(commands::index_tx::IndexTxCommand),
    /// Fetch and index a range of blocks
    IndexBlocks(commands::index_blocks::IndexBlocksCommand),
    /// Compute statistics for a project
    Stats(commands::stats::StatsCommand),
    /// List indexed projects
    Projects(commands::projects::ProjectsCommand),
}

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Derive(command) => command.run(),
        Commands::Decode(command) => command.run(),
        Commands::IndexTx(command) => command.run().await,
        Commands::IndexBlocks(command) => command.run().await,
        Commands::Stats(command) => command.run().await,
        Commands::Projects(command) => command.run(),
    }
}
