//! Decision strategies
//!
//! Every strategy is constructed bound to a mark for its lifetime and is
//! driven uniformly by the turn engine through the [`Strategy`] trait. The
//! shared legal-move filtering lives on [`BoardState`], not in any strategy
//! base state.

pub mod heuristic;
pub mod human;
pub mod learning;
pub mod minimax;
pub mod random;

pub use heuristic::HeuristicStrategy;
pub use human::HumanStrategy;
pub use learning::LearningStrategy;
pub use minimax::MinimaxStrategy;
pub use random::RandomStrategy;

use crate::{
    board::{BoardState, Player},
    error::Result,
};

/// A decision-maker bound to one mark.
pub trait Strategy {
    /// The mark this strategy plays
    fn mark(&self) -> Player;

    /// Produce a move for `board`.
    ///
    /// `last_reward` is the reward credited for this player's previous move
    /// (0.0 before the first move). `is_test` selects greedy play for
    /// learned policies; other strategies ignore it. Only the human
    /// strategy may block here.
    fn make_move(&mut self, board: &BoardState, last_reward: f64, is_test: bool) -> Result<usize>;

    /// Called once after the game ends with this player's final reward.
    /// Non-learning strategies use the default no-op.
    fn final_reward(&mut self, _reward: f64) {}

    /// Clear per-game state. Learned tables survive across games.
    fn reset(&mut self) {}

    /// Name for telemetry and match reports
    fn name(&self) -> &str;

    /// Enable downcasting to concrete strategies, e.g. to extract a
    /// learned table after training
    fn as_any(&self) -> &dyn std::any::Any;
}
