//! Command-line interface for strictly_chess.

use std::path::PathBuf;

use clap::Parser;

use crate::DEFAULT_CONFIG_FILE;

/// Strictly Chess - play a friend or a random mover in the terminal
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "strictly_chess")]
#[command(about = "Terminal chess against a friend or a random mover", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML preferences file (missing file means defaults)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Seed for the random mover, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start every new game from this FEN position instead of the standard one
    #[arg(long)]
    pub fen: Option<String>,

    /// Log file path (overrides the config file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
