//! Error types for the chess core.

use derive_more::{Display, Error};
use tracing::instrument;

/// General chess error with caller location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Chess error: {} at {}:{}", message, file, line)]
pub struct ChessError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ChessError {
    /// Creates a new chess error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Why the rules engine refused to execute a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineRejection {
    /// The move is not among the legal moves of the current position.
    #[display("Illegal move {}", _0)]
    Illegal(#[error(not(source))] crate::Move),
    /// The game has already ended, no moves remain.
    #[display("No moves remain in this position")]
    GameOver,
}
