//! Terminal setup, logging and the top-level run function.

mod board;
mod input;

pub(crate) use board::center_rect;
pub use board::draw_game;
pub use input::{Cursor, move_cursor};

use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use strictly_chess::{GameController, RandomMover, ShakmatyEngine};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::EnvFilter;

use crate::{BellCuePlayer, ChessConfig, GameHost, LobbyController};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,strictly_chess=debug,strictly_chess_tui=debug";

/// Sends tracing output to `path` so it does not corrupt the terminal.
///
/// # Errors
///
/// Fails if the log file cannot be created.
pub fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs `restore` when dropped, so every exit from [`run`] after raw mode is
/// enabled puts the terminal back.
struct TerminalGuard<F: FnMut() -> io::Result<()>> {
    restore: F,
}

impl<F: FnMut() -> io::Result<()>> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut() -> io::Result<()>> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        debug!("Restoring terminal");
        if let Err(e) = (self.restore)() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Runs the lobby until the player quits.
///
/// The terminal is restored even when the lobby fails.
#[instrument(skip(config))]
pub async fn run(config: ChessConfig, seed: Option<u64>, fen: Option<String>) -> Result<()> {
    info!("Starting Strictly Chess TUI");

    let policy = match seed {
        Some(seed) => RandomMover::seeded(seed),
        None => RandomMover::from_entropy(),
    };
    let game = GameController::new(ShakmatyEngine::new(), policy, config.ai_delay());
    let host = GameHost::new(game, fen);
    let mut lobby = LobbyController::new(host, &config, Box::new(BellCuePlayer::stdout()));

    enable_raw_mode()?;
    let guard = TerminalGuard::new(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = lobby.run(&mut terminal).await;
    drop(guard);

    if let Err(err) = &res {
        error!(error = ?err, "Lobby error");
    }
    res
}
