//! Strictly Chess - game orchestration for a two-sided chess board
//!
//! The rules of chess live behind the [`RulesEngine`] trait (backed by
//! `shakmaty`). This crate adds everything around them: turning taps into
//! moves, alternating turns, a random computer opponent, end-of-game
//! detection and the screen-level navigation state machine.
//!
//! # Architecture
//!
//! - **Selection**: two-tap select/commit state machine
//! - **Controller**: owns the engine and session, sequences human and AI turns
//! - **Policy**: how the computer picks a move (uniform random)
//! - **Termination**: checkmate, stalemate and other draws
//! - **Navigation**: menu/game/pause/settings screens and lifecycle hooks
//!
//! # Example
//!
//! ```no_run
//! use strictly_chess::{GameController, GameMode, RandomMover, DEFAULT_REPLY_DELAY};
//!
//! let mut game = GameController::standard(RandomMover::from_entropy(), DEFAULT_REPLY_DELAY);
//! game.start_game(GameMode::single_player());
//!
//! // e2 then e4, using grid coordinates (row 0 is rank 8)
//! game.tap(6, 4);
//! game.tap(4, 4);
//!
//! if let Some(reply) = game.pending_reply() {
//!     // Wait reply.delay, then:
//!     game.fire_reply(reply.token);
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod controller;
mod engine;
mod error;
mod navigation;
mod policy;
mod selection;
mod session;
mod termination;
mod types;

// Crate-level exports - Board vocabulary
pub use types::{
    BoardSnapshot, Color, CoordError, GameMode, LastMove, Move, Piece, PieceKind, Square,
};

// Crate-level exports - Errors
pub use error::{ChessError, EngineRejection};

// Crate-level exports - Rules engine
pub use engine::{RulesEngine, ShakmatyEngine};

// Crate-level exports - Selection state machine
pub use selection::{Selection, SelectionStep};

// Crate-level exports - Termination
pub use termination::{Termination, detect};

// Crate-level exports - AI policy
pub use policy::{MovePolicy, RandomMover};

// Crate-level exports - Session and controller
pub use controller::{DEFAULT_REPLY_DELAY, GameController, TapOutcome};
pub use session::{AudioCue, GameEvent, PendingReply, ReplyToken, Session};

// Crate-level exports - Navigation
pub use navigation::{NavEvent, NavOutcome, Navigator, ScreenId, SessionLifecycle};
