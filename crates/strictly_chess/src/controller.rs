//! Turn and session controller.
//!
//! Sequences human taps and AI replies against the rules engine. The
//! controller owns the engine outright; everything else sees only the board
//! snapshot it refreshes after each mutation.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::selection::SelectionStep;
use crate::session::{AudioCue, GameEvent, PendingReply, ReplyToken, Session};
use crate::termination::{self, Termination};
use crate::{
    BoardSnapshot, Color, GameMode, LastMove, Move, MovePolicy, RandomMover, RulesEngine,
    Selection, ShakmatyEngine, Square,
};

/// Nominal settling delay before the AI replies.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

/// Result of a tap on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tap had no effect (no session, paused, finished, wrong turn,
    /// off-board, or empty/enemy square).
    Ignored,
    /// A piece was selected.
    Selected(Square),
    /// The selection was dropped.
    Cleared,
    /// A move was executed.
    Moved(Move),
    /// The engine refused the move; nothing changed.
    Rejected(Move),
}

/// Owns the active session and drives turns.
#[derive(Debug)]
pub struct GameController<E = ShakmatyEngine, P = RandomMover> {
    engine: E,
    policy: P,
    session: Option<Session>,
    selection: Selection,
    history: Vec<LastMove>,
    snapshot: BoardSnapshot,
    reply_delay: Duration,
    pending: Option<PendingReply>,
    next_token: u64,
    events: Vec<GameEvent>,
}

impl<E: RulesEngine, P: MovePolicy> GameController<E, P> {
    /// Creates a controller with no active session.
    #[instrument(skip(engine, policy))]
    pub fn new(engine: E, policy: P, reply_delay: Duration) -> Self {
        info!(policy = policy.name(), ?reply_delay, "Creating GameController");
        let snapshot = engine.snapshot();
        Self {
            engine,
            policy,
            session: None,
            selection: Selection::Idle,
            history: Vec::new(),
            snapshot,
            reply_delay,
            pending: None,
            next_token: 0,
            events: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Read-only view for the renderer
    // ─────────────────────────────────────────────────────────────

    /// The active session, if a game is running.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Board as of the last mutation.
    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The most recent move, for highlighting.
    pub fn last_move(&self) -> Option<LastMove> {
        self.history.last().copied()
    }

    /// Every move of this session, oldest first.
    pub fn history(&self) -> &[LastMove] {
        &self.history
    }

    /// The side to move.
    pub fn side_to_move(&self) -> Color {
        self.engine.side_to_move()
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.engine.is_in_check()
    }

    /// Read access to the rules engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Message describing how the game ended, if it has.
    pub fn termination_message(&self) -> Option<String> {
        self.session.as_ref().and_then(Session::termination_message)
    }

    /// Whether the active game has ended.
    pub fn is_over(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_over)
    }

    /// Whether the AI is waiting to reply.
    pub fn pending_reply(&self) -> Option<PendingReply> {
        self.pending
    }

    /// Settling delay applied before each AI reply.
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ─────────────────────────────────────────────────────────────
    //  Session lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Starts a session from the position `engine` holds.
    #[instrument(skip(self, engine))]
    pub fn start_from(&mut self, engine: E, mode: GameMode) {
        self.cancel_reply();
        self.engine = engine;
        self.begin(mode);
    }

    fn begin(&mut self, mode: GameMode) {
        let mut session = Session::new(mode);
        self.selection.clear();
        self.history.clear();
        self.snapshot = self.engine.snapshot();
        self.events.push(GameEvent::SessionStarted(mode));
        if let Some(result) = termination::detect(&self.engine) {
            info!(message = %result.message(), "Session starts in a finished position");
            session.finish(result);
            self.events.push(GameEvent::GameOver(result));
        }
        self.session = Some(session);
        self.schedule_reply_if_due();
    }

    /// Suspends play. A pending AI reply is invalidated.
    #[instrument(skip(self))]
    pub fn pause(&mut self) {
        let Some(session) = self.session.as_mut() else {
            warn!("Pause requested with no active session");
            return;
        };
        session.set_paused(true);
        self.selection.clear();
        self.cancel_reply();
        info!("Session paused");
    }

    /// Resumes play, rescheduling the AI if it was due to move.
    #[instrument(skip(self))]
    pub fn resume(&mut self) {
        let Some(session) = self.session.as_mut() else {
            warn!("Resume requested with no active session");
            return;
        };
        session.set_paused(false);
        info!("Session resumed");
        self.schedule_reply_if_due();
    }

    /// Discards the session.
    #[instrument(skip(self))]
    pub fn exit_to_menu(&mut self) {
        self.cancel_reply();
        self.selection.clear();
        self.history.clear();
        if self.session.take().is_some() {
            info!("Session discarded");
            self.events.push(GameEvent::SessionEnded);
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Input
    // ─────────────────────────────────────────────────────────────

    /// Handles a tap on grid position `(row, col)`, row 0 being rank 8.
    #[instrument(skip(self))]
    pub fn tap(&mut self, row: usize, col: usize) -> TapOutcome {
        let Some(session) = self.session.as_ref() else {
            debug!("Tap with no session");
            return TapOutcome::Ignored;
        };
        if session.is_over() || *session.paused() {
            debug!("Tap while finished or paused ignored");
            return TapOutcome::Ignored;
        }
        let side = self.engine.side_to_move();
        if !session.mode().human_controls(side) {
            debug!(side = %side, "Tap during AI turn ignored");
            return TapOutcome::Ignored;
        }
        let square = match Square::from_grid(row, col) {
            Ok(square) => square,
            Err(e) => {
                warn!(error = %e, "Tap outside the board");
                return TapOutcome::Ignored;
            }
        };

        match self.selection.tap(square, &self.engine) {
            SelectionStep::Selected(square) => TapOutcome::Selected(square),
            SelectionStep::Cleared => TapOutcome::Cleared,
            SelectionStep::Ignored => TapOutcome::Ignored,
            SelectionStep::Commit(mv) => {
                self.selection.clear();
                match self.engine.execute(mv) {
                    Ok(()) => {
                        self.after_move(mv, side, false);
                        TapOutcome::Moved(mv)
                    }
                    Err(e) => {
                        warn!(error = %e, "Engine rejected a selected target");
                        TapOutcome::Rejected(mv)
                    }
                }
            }
        }
    }

    /// Takes back exactly one ply.
    ///
    /// The AI is not asked to move again, even if it is now its turn. Returns
    /// `false` when there is no session, the game is over, or nothing was
    /// played.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if session.is_over() || *session.paused() {
            debug!("Undo while finished or paused ignored");
            return false;
        }
        if self.history.is_empty() || !self.engine.undo_last() {
            debug!("Nothing to undo");
            return false;
        }
        self.cancel_reply();
        self.selection.clear();
        if let Some(undone) = self.history.pop() {
            self.events
                .push(GameEvent::Undone(Move::simple(undone.from, undone.to)));
        }
        self.snapshot = self.engine.snapshot();
        info!(ply = self.history.len(), "Move undone");
        true
    }

    // ─────────────────────────────────────────────────────────────
    //  AI reply
    // ─────────────────────────────────────────────────────────────

    /// Plays the AI reply identified by `token`.
    ///
    /// Stale tokens (invalidated by pause, undo, restart or exit) are ignored.
    /// Returns whether a move was executed.
    #[instrument(skip(self))]
    pub fn fire_reply(&mut self, token: ReplyToken) -> bool {
        if self.pending.map(|p| p.token) != Some(token) {
            debug!(?token, "Stale AI reply ignored");
            return false;
        }
        self.pending = None;

        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let side = self.engine.side_to_move();
        if session.is_over() || *session.paused() || session.mode().human_controls(side) {
            warn!("AI reply fired when it was not the AI's turn");
            return false;
        }

        let moves = self.engine.legal_moves(None);
        let Some(mv) = self.policy.choose(&moves) else {
            debug!("AI has no legal moves");
            return false;
        };
        match self.engine.execute(mv) {
            Ok(()) => {
                self.after_move(mv, side, true);
                true
            }
            Err(e) => {
                warn!(error = %e, "Engine rejected the AI move");
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn after_move(&mut self, mv: Move, side: Color, by_ai: bool) {
        info!(mv = %mv, side = %side, by_ai, "Move played");
        self.history.push(LastMove::from(mv));
        self.selection.clear();
        self.snapshot = self.engine.snapshot();
        self.events.push(GameEvent::MovePlayed { mv, side, by_ai });
        self.events.push(GameEvent::Cue(AudioCue::Move));
        if self.engine.is_in_check() {
            self.events.push(GameEvent::Cue(AudioCue::Check));
        }

        match termination::detect(&self.engine) {
            Some(result) => self.finish(result),
            None => self.schedule_reply_if_due(),
        }
    }

    fn finish(&mut self, result: Termination) {
        if let Some(session) = self.session.as_mut() {
            info!(message = %result.message(), "Game over");
            session.finish(result);
            self.events.push(GameEvent::Cue(AudioCue::GameEnd));
            self.events.push(GameEvent::GameOver(result));
        }
    }

    fn schedule_reply_if_due(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let ai_to_move = session.mode().ai_side() == Some(self.engine.side_to_move());
        if !ai_to_move || session.is_over() || *session.paused() || self.pending.is_some() {
            return;
        }
        self.next_token += 1;
        let reply = PendingReply::new(ReplyToken(self.next_token), self.reply_delay);
        debug!(token = ?reply.token, "AI reply scheduled");
        self.pending = Some(reply);
        self.events.push(GameEvent::ReplyScheduled(reply));
    }

    fn cancel_reply(&mut self) {
        if let Some(reply) = self.pending.take() {
            debug!(token = ?reply.token, "AI reply cancelled");
            self.events.push(GameEvent::ReplyCancelled(reply.token));
        }
    }
}

impl<E: RulesEngine + Default, P: MovePolicy> GameController<E, P> {
    /// Starts a session at the standard starting position.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, mode: GameMode) {
        self.start_from(E::default(), mode);
    }

    /// Replaces the session with a fresh one in the same mode.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        let Some(mode) = self.session.as_ref().map(|s| *s.mode()) else {
            warn!("Restart requested with no active session");
            return;
        };
        self.cancel_reply();
        self.engine = E::default();
        self.begin(mode);
        self.events.push(GameEvent::Restarted);
        info!("Session restarted");
    }
}

impl GameController<ShakmatyEngine, RandomMover> {
    /// Standard controller: `shakmaty` rules and a random opponent.
    pub fn standard(policy: RandomMover, reply_delay: Duration) -> Self {
        Self::new(ShakmatyEngine::new(), policy, reply_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(name: &str) -> (usize, usize) {
        name.parse::<Square>().unwrap().to_grid()
    }

    fn tap(ctrl: &mut GameController, name: &str) -> TapOutcome {
        let (row, col) = grid(name);
        ctrl.tap(row, col)
    }

    fn controller() -> GameController {
        GameController::standard(RandomMover::seeded(3), DEFAULT_REPLY_DELAY)
    }

    #[test]
    fn test_taps_ignored_without_session() {
        let mut ctrl = controller();
        assert_eq!(tap(&mut ctrl, "e2"), TapOutcome::Ignored);
    }

    #[test]
    fn test_off_board_tap_ignored() {
        let mut ctrl = controller();
        ctrl.start_game(GameMode::TwoPlayer);
        assert_eq!(ctrl.tap(8, 3), TapOutcome::Ignored);
    }

    #[test]
    fn test_two_player_alternates() {
        let mut ctrl = controller();
        ctrl.start_game(GameMode::TwoPlayer);
        tap(&mut ctrl, "e2");
        assert!(matches!(tap(&mut ctrl, "e4"), TapOutcome::Moved(_)));
        assert_eq!(ctrl.side_to_move(), Color::Black);
        assert_eq!(ctrl.pending_reply(), None);
        assert_eq!(tap(&mut ctrl, "e7"), TapOutcome::Selected("e7".parse().unwrap()));
    }

    #[test]
    fn test_paused_session_ignores_taps() {
        let mut ctrl = controller();
        ctrl.start_game(GameMode::TwoPlayer);
        ctrl.pause();
        assert_eq!(tap(&mut ctrl, "e2"), TapOutcome::Ignored);
        ctrl.resume();
        assert!(matches!(tap(&mut ctrl, "e2"), TapOutcome::Selected(_)));
    }

    #[test]
    fn test_move_events_and_cues() {
        let mut ctrl = controller();
        ctrl.start_game(GameMode::TwoPlayer);
        ctrl.drain_events();
        tap(&mut ctrl, "e2");
        tap(&mut ctrl, "e4");
        let events = ctrl.drain_events();
        assert!(events.contains(&GameEvent::Cue(AudioCue::Move)));
        assert!(!events.contains(&GameEvent::Cue(AudioCue::Check)));
        assert!(ctrl.drain_events().is_empty());
    }

    #[test]
    fn test_undo_with_empty_history_is_noop() {
        let mut ctrl = controller();
        ctrl.start_game(GameMode::TwoPlayer);
        assert!(!ctrl.undo());
    }

    #[test]
    fn test_restart_without_session_is_noop() {
        let mut ctrl = controller();
        ctrl.restart();
        assert!(ctrl.session().is_none());
    }

    #[test]
    fn test_human_black_waits_for_ai_opening() {
        let mut ctrl = controller();
        ctrl.start_game(GameMode::SinglePlayer {
            human: Color::Black,
        });
        let reply = ctrl.pending_reply().expect("AI opens as White");
        assert_eq!(tap(&mut ctrl, "e7"), TapOutcome::Ignored);
        assert!(ctrl.fire_reply(reply.token));
        assert_eq!(ctrl.side_to_move(), Color::Black);
        assert!(matches!(tap(&mut ctrl, "e7"), TapOutcome::Selected(_)));
    }
}
