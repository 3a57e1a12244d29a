//! Tap-driven selection state machine.
//!
//! `Idle` means nothing is selected. `Selected` carries the square and the
//! engine's legal moves from it, so the highlighted targets are always exactly
//! what the engine allows. Turn guarding happens in the controller before a
//! tap ever reaches this machine.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::{Move, PieceKind, RulesEngine, Square};

/// Current selection on the board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No square selected.
    #[default]
    Idle,
    /// A friendly piece is selected.
    Selected {
        /// The selected square.
        square: Square,
        /// Legal moves starting at `square`, as reported by the engine.
        moves: Vec<Move>,
    },
}

/// What a tap did to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStep {
    /// A piece of the side to move was selected.
    Selected(Square),
    /// The selection was dropped (same square, or a non-target square).
    Cleared,
    /// The tap did nothing (empty or enemy square with nothing selected).
    Ignored,
    /// The tap completed a move; the caller must execute it.
    Commit(Move),
}

impl Selection {
    /// The selected square, if any.
    pub fn square(&self) -> Option<Square> {
        match self {
            Selection::Idle => None,
            Selection::Selected { square, .. } => Some(*square),
        }
    }

    /// Destination squares of the selected piece; empty when idle.
    pub fn legal_targets(&self) -> BTreeSet<Square> {
        match self {
            Selection::Idle => BTreeSet::new(),
            Selection::Selected { moves, .. } => moves.iter().map(|m| m.to).collect(),
        }
    }

    /// Whether `square` is a destination of the selected piece.
    pub fn is_target(&self, square: Square) -> bool {
        match self {
            Selection::Idle => false,
            Selection::Selected { moves, .. } => moves.iter().any(|m| m.to == square),
        }
    }

    /// Drops any selection.
    pub fn clear(&mut self) {
        *self = Selection::Idle;
    }

    /// Applies a tap on `square`.
    ///
    /// When a move is committed the selection is left in place; the caller
    /// clears it once the engine has answered.
    #[instrument(skip(self, engine), fields(selected = ?self.square()))]
    pub fn tap<E: RulesEngine>(&mut self, square: Square, engine: &E) -> SelectionStep {
        match self {
            Selection::Idle => {
                let side = engine.side_to_move();
                match engine.piece_at(square) {
                    Some(piece) if piece.color == side => {
                        let moves = engine.legal_moves(Some(square));
                        debug!(%square, targets = moves.len(), "Selected piece");
                        *self = Selection::Selected { square, moves };
                        SelectionStep::Selected(square)
                    }
                    _ => {
                        debug!(%square, "Tap on empty or enemy square ignored");
                        SelectionStep::Ignored
                    }
                }
            }
            Selection::Selected {
                square: selected,
                moves,
            } => {
                if *selected == square {
                    debug!(%square, "Selection toggled off");
                    self.clear();
                    return SelectionStep::Cleared;
                }
                match pick_move(moves, square) {
                    Some(mv) => SelectionStep::Commit(mv),
                    None => {
                        debug!(%square, "Tap on non-target square, deselecting");
                        self.clear();
                        SelectionStep::Cleared
                    }
                }
            }
        }
    }
}

/// Picks the move landing on `to`, preferring a queen promotion when the
/// destination has several candidate moves.
fn pick_move(moves: &[Move], to: Square) -> Option<Move> {
    let mut candidates = moves.iter().filter(|m| m.to == to);
    let first = *candidates.next()?;
    if first.promotion.is_none() {
        return Some(first);
    }
    Some(
        std::iter::once(first)
            .chain(candidates.copied())
            .find(|m| m.promotion == Some(PieceKind::Queen))
            .unwrap_or(first),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShakmatyEngine;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_idle_has_no_targets() {
        let selection = Selection::Idle;
        assert_eq!(selection.square(), None);
        assert!(selection.legal_targets().is_empty());
    }

    #[test]
    fn test_select_friendly_piece() {
        let engine = ShakmatyEngine::new();
        let mut selection = Selection::Idle;
        let step = selection.tap(sq("e2"), &engine);
        assert_eq!(step, SelectionStep::Selected(sq("e2")));
        let targets: Vec<_> = selection.legal_targets().into_iter().collect();
        assert_eq!(targets, vec![sq("e3"), sq("e4")]);
    }

    #[test]
    fn test_enemy_and_empty_squares_ignored() {
        let engine = ShakmatyEngine::new();
        let mut selection = Selection::Idle;
        assert_eq!(selection.tap(sq("e7"), &engine), SelectionStep::Ignored);
        assert_eq!(selection.tap(sq("e4"), &engine), SelectionStep::Ignored);
        assert_eq!(selection, Selection::Idle);
    }

    #[test]
    fn test_same_square_toggles_off() {
        let engine = ShakmatyEngine::new();
        let mut selection = Selection::Idle;
        selection.tap(sq("g1"), &engine);
        assert_eq!(selection.tap(sq("g1"), &engine), SelectionStep::Cleared);
        assert_eq!(selection, Selection::Idle);
    }

    #[test]
    fn test_non_target_deselects_without_reselecting() {
        let engine = ShakmatyEngine::new();
        let mut selection = Selection::Idle;
        selection.tap(sq("g1"), &engine);
        assert_eq!(selection.tap(sq("d2"), &engine), SelectionStep::Cleared);
        assert_eq!(selection.square(), None);
    }

    #[test]
    fn test_target_commits_move() {
        let engine = ShakmatyEngine::new();
        let mut selection = Selection::Idle;
        selection.tap(sq("e2"), &engine);
        assert_eq!(
            selection.tap(sq("e4"), &engine),
            SelectionStep::Commit(Move::simple(sq("e2"), sq("e4")))
        );
    }

    #[test]
    fn test_promotion_target_commits_queen() {
        let engine = ShakmatyEngine::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let mut selection = Selection::Idle;
        selection.tap(sq("a7"), &engine);
        assert_eq!(selection.legal_targets().len(), 1);
        assert_eq!(
            selection.tap(sq("a8"), &engine),
            SelectionStep::Commit(Move::new(sq("a7"), sq("a8"), Some(PieceKind::Queen)))
        );
    }

    #[test]
    fn test_pinned_piece_has_no_targets() {
        // The e2 knight is pinned against the king by the e8 rook.
        let engine = ShakmatyEngine::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let mut selection = Selection::Idle;
        assert_eq!(
            selection.tap(sq("e2"), &engine),
            SelectionStep::Selected(sq("e2"))
        );
        assert!(selection.legal_targets().is_empty());
    }
}
