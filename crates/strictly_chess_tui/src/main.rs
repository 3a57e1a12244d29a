//! Strictly Chess - terminal chess against a friend or a random mover.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use strictly_chess::ShakmatyEngine;
use strictly_chess_tui::{ChessConfig, Cli, init_logging, run};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ChessConfig::from_file(&cli.config)?;

    let log_file = cli.log_file.clone().unwrap_or_else(|| config.log_file().clone());
    init_logging(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    info!(config = %cli.config.display(), log_file = %log_file.display(), "Strictly Chess starting");

    // Reject an unusable custom position before touching the terminal.
    if let Some(fen) = &cli.fen {
        ShakmatyEngine::from_fen(fen)?;
    }

    run(config, cli.seed, cli.fen).await
}
