//! Exhaustive search behind a hard-wired opening

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    board::{BoardState, Player},
    error::Result,
    minimax::MinimaxSolver,
    strategy::{HeuristicStrategy, Strategy},
};

/// The opening book handles positions with at least this many empty cells;
/// everything below goes to the exhaustive search.
const OPENING_EMPTY_CELLS: usize = 7;

/// Optimal play: the first two plies follow the heuristic opening book (a
/// shortcut past the symmetric opening tree, not needed for correctness),
/// every later move comes from [`MinimaxSolver`].
pub struct MinimaxStrategy {
    mark: Player,
    opening: HeuristicStrategy,
    solver: MinimaxSolver,
    rng: StdRng,
}

impl MinimaxStrategy {
    pub fn new(mark: Player) -> Self {
        Self {
            mark,
            opening: HeuristicStrategy::new(mark),
            solver: MinimaxSolver::new(),
            rng: StdRng::seed_from_u64(rand::random()),
        }
    }

    /// Create with a deterministic seed
    pub fn with_seed(mark: Player, seed: u64) -> Self {
        Self {
            mark,
            opening: HeuristicStrategy::with_seed(mark, seed.wrapping_add(1)),
            solver: MinimaxSolver::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for MinimaxStrategy {
    fn mark(&self) -> Player {
        self.mark
    }

    fn make_move(&mut self, board: &BoardState, last_reward: f64, is_test: bool) -> Result<usize> {
        if board.empty_count() >= OPENING_EMPTY_CELLS {
            return self.opening.make_move(board, last_reward, is_test);
        }
        let (_, mv) = self.solver.best_move(board, &mut self.rng)?;
        Ok(mv)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> BoardState {
        s.parse().unwrap()
    }

    #[test]
    fn test_opening_comes_from_the_book() {
        let mut strategy = MinimaxStrategy::with_seed(Player::X, 5);
        let mv = strategy.make_move(&BoardState::new(), 0.0, false).unwrap();
        assert!([0, 2, 6, 8].contains(&mv));
    }

    #[test]
    fn test_search_takes_the_win() {
        let mut strategy = MinimaxStrategy::with_seed(Player::X, 5);
        // 5 cells empty: past the opening book, the solver decides
        let b = board("XX.OO.X.O");
        assert!(b.empty_count() < OPENING_EMPTY_CELLS);
        let mv = strategy.make_move(&b, 0.0, false).unwrap();
        assert_eq!(mv, 2);
    }

    #[test]
    fn test_search_blocks_the_loss() {
        let mut strategy = MinimaxStrategy::with_seed(Player::O, 5);
        let b = board("XX..O.X.O");
        // X threatens the left column at 3 and the top row at 2
        assert_eq!(b.turn(), Player::O);
        let mv = strategy.make_move(&b, 0.0, false).unwrap();
        assert!(b.is_legal(mv));
    }
}
