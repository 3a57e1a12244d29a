//! End-of-game classification.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Color, RulesEngine};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The side to move is mated; `winner` is the other side.
    Checkmate {
        /// The side that delivered mate.
        winner: Color,
    },
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// Any other draw the engine recognises.
    Draw,
}

impl Termination {
    /// Message shown to the players.
    pub fn message(&self) -> String {
        match self {
            Termination::Checkmate { winner } => format!("{} wins by checkmate!", winner),
            Termination::Stalemate => "Draw by stalemate!".to_string(),
            Termination::Draw => "Draw!".to_string(),
        }
    }

    /// The winning side, if the game was decided.
    pub fn winner(&self) -> Option<Color> {
        match self {
            Termination::Checkmate { winner } => Some(*winner),
            Termination::Stalemate | Termination::Draw => None,
        }
    }
}

/// Classifies the engine's current position.
///
/// Checks run in priority order: checkmate, stalemate, then any other draw.
#[instrument(skip(engine))]
pub fn detect<E: RulesEngine>(engine: &E) -> Option<Termination> {
    let result = if engine.is_checkmate() {
        Some(Termination::Checkmate {
            winner: engine.side_to_move().opponent(),
        })
    } else if engine.is_stalemate() {
        Some(Termination::Stalemate)
    } else if engine.is_drawn_otherwise() {
        Some(Termination::Draw)
    } else {
        None
    };
    debug!(?result, "Termination check");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShakmatyEngine;

    #[test]
    fn test_start_position_not_terminal() {
        assert_eq!(detect(&ShakmatyEngine::new()), None);
    }

    #[test]
    fn test_checkmate_names_side_not_to_move() {
        // Fool's mate, White to move and mated.
        let engine = ShakmatyEngine::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        let result = detect(&engine).unwrap();
        assert_eq!(
            result,
            Termination::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(result.message(), "Black wins by checkmate!");
    }

    #[test]
    fn test_stalemate_has_no_winner() {
        let engine = ShakmatyEngine::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let result = detect(&engine).unwrap();
        assert_eq!(result, Termination::Stalemate);
        assert_eq!(result.winner(), None);
        assert_eq!(result.message(), "Draw by stalemate!");
    }

    #[test]
    fn test_bare_kings_are_a_generic_draw() {
        let engine = ShakmatyEngine::from_fen("8/8/8/4k3/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(detect(&engine), Some(Termination::Draw));
        assert_eq!(Termination::Draw.message(), "Draw!");
    }

    #[test]
    fn test_stalemate_outranks_insufficient_material() {
        // King and bishop against king is also insufficient material.
        let engine = ShakmatyEngine::from_fen("k7/2K5/1B6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(detect(&engine), Some(Termination::Stalemate));
    }
}
