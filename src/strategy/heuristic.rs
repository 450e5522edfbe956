//! Hand-coded positional play

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    board::{BoardState, Player},
    error::{Error, Result},
    lines::LineAnalyzer,
    strategy::Strategy,
};

const CORNERS: [usize; 4] = [0, 2, 6, 8];
const SIDES: [usize; 4] = [1, 3, 5, 7];

fn opposite_corner(pos: usize) -> usize {
    8 - pos
}

/// Strategy playing win, block, then a short ladder of positional
/// preferences: corner opening, center reply, a few hard-coded responses to
/// the opponent's first move, then open corner, center, anything legal.
pub struct HeuristicStrategy {
    mark: Player,
    rng: StdRng,
}

impl HeuristicStrategy {
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

    fn choose(&mut self, board: &BoardState) -> Result<usize> {
        // Take a win when one exists, otherwise deny the opponent's.
        let wins = LineAnalyzer::winning_moves(&board.cells, self.mark);
        if let Some(&mv) = wins.choose(&mut self.rng) {
            return Ok(mv);
        }
        let blocks = LineAnalyzer::winning_moves(&board.cells, self.mark.opponent());
        if let Some(&mv) = blocks.choose(&mut self.rng) {
            return Ok(mv);
        }

        let empty = board.empty_count();

        // The opening move goes to a corner.
        if empty == 9 {
            return Ok(CORNERS[self.rng.random_range(0..CORNERS.len())]);
        }

        // The reply takes the center when open.
        if empty == 8 && board.is_legal(4) {
            return Ok(4);
        }

        // Opener's second move, after a corner opening: a side reply cedes
        // the center; a center reply is answered with the opposite corner.
        if empty == 7
            && let Some(my_first) = board.first_index_of(self.mark)
            && CORNERS.contains(&my_first)
            && let Some(their_first) = board.first_index_of(self.mark.opponent())
        {
            if SIDES.contains(&their_first) {
                return Ok(4);
            }
            if their_first == 4 {
                return Ok(opposite_corner(my_first));
            }
        }

        let open_corners: Vec<usize> = CORNERS
            .iter()
            .copied()
            .filter(|&pos| board.is_legal(pos))
            .collect();

        // Replier's second move with two open corners left: those corners
        // are diagonal (adjacent corners would already have forced a
        // block), and a side move defuses the corner trap.
        if empty == 6 && open_corners.len() == 2 {
            let open_sides: Vec<usize> = SIDES
                .iter()
                .copied()
                .filter(|&pos| board.is_legal(pos))
                .collect();
            if let Some(&mv) = open_sides.choose(&mut self.rng) {
                return Ok(mv);
            }
        }

        // No special case applies: open corner, then center, then anything.
        if let Some(&mv) = open_corners.choose(&mut self.rng) {
            return Ok(mv);
        }
        if board.is_legal(4) {
            return Ok(4);
        }
        board
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }
}

impl Strategy for HeuristicStrategy {
    fn mark(&self) -> Player {
        self.mark
    }

    fn make_move(&mut self, board: &BoardState, _last_reward: f64, _is_test: bool) -> Result<usize> {
        self.choose(board)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
