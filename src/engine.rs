//! Turn-based game state machine

use serde::{Deserialize, Serialize};

use crate::{
    board::{BoardState, Player},
    error::Result,
    strategy::Strategy,
};

/// Reward constants, one crate-wide convention.
///
/// A legal move that keeps the game going earns the positive `STEP` reward;
/// wins and losses (including forfeits) use the +-100 magnitudes; a tie
/// pays nothing to either side.
pub mod rewards {
    /// Delivered to the winner, and to the opponent of a forfeiting player
    pub const WIN: f64 = 100.0;
    /// Delivered to the loser, and to a forfeiting player
    pub const LOSS: f64 = -100.0;
    /// Both players' reward in a tie
    pub const TIE: f64 = 0.0;
    /// Earned by a legal move that extends the game
    pub const STEP: f64 = 1.0;
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win(Player),
    Tie,
    /// The named player produced an illegal move and loses immediately
    Forfeit(Player),
}

impl GameResult {
    /// The mark collecting the win reward, if any
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win(player) => Some(*player),
            GameResult::Tie => None,
            GameResult::Forfeit(player) => Some(player.opponent()),
        }
    }
}

/// Record of one completed game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub result: GameResult,
    pub final_board: BoardState,
    pub moves: Vec<usize>,
    pub x_reward: f64,
    pub o_reward: f64,
}

/// The state machine driving one game between two strategies.
///
/// States are `ToMove(X)`, `ToMove(O)` (carried by the derived board turn)
/// and the terminal [`GameResult`]. Each transition asks the active
/// strategy for a move given the current board and its cached reward,
/// validates it, applies it, and checks for termination. An illegal move
/// ends the game at once with the offender penalized and the opponent
/// rewarded; conforming strategies never take that path.
pub struct TurnEngine<'a> {
    x: &'a mut dyn Strategy,
    o: &'a mut dyn Strategy,
}

impl<'a> TurnEngine<'a> {
    pub fn new(x: &'a mut dyn Strategy, o: &'a mut dyn Strategy) -> Self {
        Self { x, o }
    }

    /// Play one game from the empty board. X always moves first.
    ///
    /// On reaching a terminal state both strategies receive `final_reward`
    /// with their last recorded reward.
    pub fn play(&mut self, is_test: bool) -> Result<MatchRecord> {
        self.x.reset();
        self.o.reset();

        let mut board = BoardState::new();
        let mut moves = Vec::new();
        let mut x_reward = 0.0;
        let mut o_reward = 0.0;

        let result = loop {
            let mover = board.turn();
            let cached = match mover {
                Player::X => x_reward,
                Player::O => o_reward,
            };
            let strategy: &mut dyn Strategy = match mover {
                Player::X => &mut *self.x,
                Player::O => &mut *self.o,
            };

            let mv = strategy.make_move(&board, cached, is_test)?;

            if !board.is_legal(mv) {
                match mover {
                    Player::X => {
                        x_reward = rewards::LOSS;
                        o_reward = rewards::WIN;
                    }
                    Player::O => {
                        o_reward = rewards::LOSS;
                        x_reward = rewards::WIN;
                    }
                }
                break GameResult::Forfeit(mover);
            }

            board = board.apply(mv, mover)?;
            moves.push(mv);

            if let Some(winner) = board.winner() {
                match winner {
                    Player::X => {
                        x_reward = rewards::WIN;
                        o_reward = rewards::LOSS;
                    }
                    Player::O => {
                        o_reward = rewards::WIN;
                        x_reward = rewards::LOSS;
                    }
                }
                break GameResult::Win(winner);
            }

            if board.is_full() {
                x_reward = rewards::TIE;
                o_reward = rewards::TIE;
                break GameResult::Tie;
            }

            match mover {
                Player::X => x_reward = rewards::STEP,
                Player::O => o_reward = rewards::STEP,
            }
        };

        self.x.final_reward(x_reward);
        self.o.final_reward(o_reward);

        Ok(MatchRecord {
            result,
            final_board: board,
            moves,
            x_reward,
            o_reward,
        })
    }
}
