//! Exhaustive adversarial search

use std::collections::HashMap;

use rand::{Rng, seq::IndexedRandom};

use crate::{
    board::{BoardState, Player},
    error::{Error, Result},
};

/// Full-depth minimax over board states.
///
/// The solver carries no game state of its own, only a value cache keyed by
/// canonical board encodings. Caching values (never moves) through the
/// canonical key means a cache hit reached from a different orientation
/// needs no inverse move mapping, and cuts the branching by up to 8x.
#[derive(Debug, Clone, Default)]
pub struct MinimaxSolver {
    cache: HashMap<String, i32>,
}

impl MinimaxSolver {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Terminal score from X's perspective: +1 X won, -1 O won, 0 full
    /// board with no winner. `None` while the game is undecided.
    pub fn evaluate(board: &BoardState) -> Option<i32> {
        match board.winner() {
            Some(Player::X) => Some(1),
            Some(Player::O) => Some(-1),
            None if board.is_full() => Some(0),
            None => None,
        }
    }

    /// Minimax value of a position, memoized by canonical key.
    ///
    /// The search recurses from the canonical image; the value is
    /// orientation-invariant, so all 8 orientations share one cache entry.
    pub fn value(&mut self, board: &BoardState) -> i32 {
        let canonical = board.canonical();
        if let Some(&value) = self.cache.get(&canonical.key) {
            return value;
        }

        let value = match Self::evaluate(board) {
            Some(score) => score,
            None => {
                let board = canonical.board;
                let mover = board.turn();
                let mut best = match mover {
                    Player::X => i32::MIN,
                    Player::O => i32::MAX,
                };
                for mv in board.legal_moves() {
                    if let Ok(child) = board.play(mv) {
                        let child_value = self.value(&child);
                        best = match mover {
                            Player::X => best.max(child_value),
                            Player::O => best.min(child_value),
                        };
                    }
                }
                best
            }
        };

        self.cache.insert(canonical.key, value);
        value
    }

    /// Best move for the player to move, with its minimax value.
    ///
    /// X maximizes, O minimizes. Ties between equally good moves are broken
    /// by uniform-random choice among ALL optimal moves, not first-found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] when called on a terminal position.
    pub fn best_move<R: Rng + ?Sized>(
        &mut self,
        board: &BoardState,
        rng: &mut R,
    ) -> Result<(i32, usize)> {
        if Self::evaluate(board).is_some() {
            return Err(Error::GameOver);
        }

        let mover = board.turn();
        let mut best_value = match mover {
            Player::X => i32::MIN,
            Player::O => i32::MAX,
        };
        let mut best_moves: Vec<usize> = Vec::new();

        for mv in board.legal_moves() {
            if let Ok(child) = board.play(mv) {
                let value = self.value(&child);
                let improves = match mover {
                    Player::X => value > best_value,
                    Player::O => value < best_value,
                };
                if improves {
                    best_value = value;
                    best_moves.clear();
                    best_moves.push(mv);
                } else if value == best_value {
                    best_moves.push(mv);
                }
            }
        }

        let choice = best_moves
            .choose(rng)
            .copied()
            .ok_or(Error::NoValidMoves)?;
        Ok((best_value, choice))
    }
}
