//! Per-game session state and the events the controller reports.

use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{Color, GameMode, Move, Termination};

/// One game instance: its mode, pause flag and final result.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Session {
    /// Who plays whom.
    mode: GameMode,
    /// Whether play is suspended behind the pause menu.
    paused: bool,
    /// Set once the game ends; never cleared within a session.
    termination: Option<Termination>,
}

impl Session {
    /// Creates a fresh, unpaused session.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        info!(mode = mode.label(), "Creating new session");
        Self {
            mode,
            paused: false,
            termination: None,
        }
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.termination.is_some()
    }

    /// Message describing how the game ended.
    pub fn termination_message(&self) -> Option<String> {
        self.termination.as_ref().map(Termination::message)
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub(crate) fn finish(&mut self, termination: Termination) {
        if self.termination.is_none() {
            self.termination = Some(termination);
        }
    }
}

/// Identifies one scheduled AI reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyToken(pub(crate) u64);

/// An AI reply waiting for its settling delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct PendingReply {
    /// Token to hand back to [`crate::GameController::fire_reply`].
    pub token: ReplyToken,
    /// How long to wait before firing.
    pub delay: Duration,
}

/// Sound cue requested by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// A piece moved.
    Move,
    /// The side to move is in check.
    Check,
    /// The game ended (win or draw).
    GameEnd,
}

/// Notifications for the UI, drained after each controller call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A session began.
    SessionStarted(GameMode),
    /// A move was executed.
    MovePlayed {
        /// The move.
        mv: Move,
        /// Side that made it.
        side: Color,
        /// Whether the AI made it.
        by_ai: bool,
    },
    /// Play a sound, if sound is enabled.
    Cue(AudioCue),
    /// The game ended.
    GameOver(Termination),
    /// The AI will reply after the delay.
    ReplyScheduled(PendingReply),
    /// A pending AI reply was invalidated.
    ReplyCancelled(ReplyToken),
    /// One ply was taken back.
    Undone(Move),
    /// The session was replaced by a fresh one.
    Restarted,
    /// The session was discarded.
    SessionEnded,
}
