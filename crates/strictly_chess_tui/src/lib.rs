//! Terminal front end for Strictly Chess
//!
//! Drives the [`strictly_chess`] orchestration core from a keyboard: a board
//! cursor stands in for touch input, Enter/Space is a tap, and the AI's
//! settling delay runs on a `tokio` timer.
//!
//! # Architecture
//!
//! - **Lobby**: screen objects plus the [`LobbyController`] event loop, which
//!   feeds every screen change through the core's [`strictly_chess::Navigator`]
//! - **TUI**: terminal setup, logging, board rendering, cursor movement
//! - **Config**: TOML preferences and CLI flags
//! - **Audio**: terminal-bell cues

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod audio;
mod cli;
mod config;
mod lobby;
mod tui;

// Crate-level exports - Audio cues
pub use audio::{BellCuePlayer, CuePlayer, SilentCuePlayer, play_cue};

// Crate-level exports - CLI and configuration
pub use cli::Cli;
pub use config::{ChessConfig, ConfigError, DEFAULT_CONFIG_FILE};

// Crate-level exports - Lobby
pub use lobby::{
    AppEvent, GameHost, LobbyController, LobbySettings, Screen, ScreenTransition,
    spawn_reply_timer,
};

// Crate-level exports - Terminal
pub use tui::{Cursor, init_logging, move_cursor, run};
