//! Move selection for the computer-controlled side.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::Move;

/// Chooses one move out of the legal moves of the side to move.
pub trait MovePolicy {
    /// Returns the chosen move, or `None` when `moves` is empty.
    fn choose(&mut self, moves: &[Move]) -> Option<Move>;

    /// Display name used in logs and the UI.
    fn name(&self) -> &str;
}

/// Picks uniformly at random; no evaluation or search.
#[derive(Debug, Clone)]
pub struct RandomMover<R = StdRng> {
    name: String,
    rng: R,
}

impl RandomMover<StdRng> {
    /// Creates a random mover seeded from system entropy.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a reproducible random mover.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMover<R> {
    /// Creates a random mover drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            name: "Random Mover".to_string(),
            rng,
        }
    }
}

impl<R: Rng> MovePolicy for RandomMover<R> {
    #[instrument(skip(self, moves), fields(candidates = moves.len()))]
    fn choose(&mut self, moves: &[Move]) -> Option<Move> {
        let choice = moves.choose(&mut self.rng).copied();
        debug!(ai = %self.name, choice = ?choice, "AI chose move");
        choice
    }

    fn name(&self) -> &str {
        &self.name
    }
}
