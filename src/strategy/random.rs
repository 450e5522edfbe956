//! Uniform-random legal play

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    board::{BoardState, Player},
    error::{Error, Result},
    strategy::Strategy,
};

/// Baseline strategy: uniform choice among the legal moves
pub struct RandomStrategy {
    mark: Player,
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(mark: Player) -> Self {
        Self {
            mark,
            rng: StdRng::seed_from_u64(rand::random()),
        }
    }

    /// Create with a deterministic seed
    pub fn with_seed(mark: Player, seed: u64) -> Self {
        Self {
            mark,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn mark(&self) -> Player {
        self.mark
    }

    fn make_move(&mut self, board: &BoardState, _last_reward: f64, _is_test: bool) -> Result<usize> {
        board
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
