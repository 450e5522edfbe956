//! Manual play over stdin

use std::io::{self, BufRead, Write};

use crate::{
    board::{BoardState, Player},
    error::{Error, Result},
    render::format_board,
    strategy::Strategy,
};

/// Interactive strategy: renders the board, prompts for a cell index, and
/// reprompts until the input names a legal move. This is the only strategy
/// that may block indefinitely.
pub struct HumanStrategy {
    mark: Player,
}

impl HumanStrategy {
    pub fn new(mark: Player) -> Self {
        Self { mark }
    }
}

impl Strategy for HumanStrategy {
    fn mark(&self) -> Player {
        self.mark
    }

    fn make_move(&mut self, board: &BoardState, _last_reward: f64, _is_test: bool) -> Result<usize> {
        println!("\n{}", format_board(board));

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("{} to move (0-8) > ", self.mark);
            io::stdout().flush().map_err(|source| Error::Io {
                operation: "flush move prompt".to_string(),
                source,
            })?;

            let line = match lines.next() {
                Some(line) => line.map_err(|source| Error::Io {
                    operation: "read move input".to_string(),
                    source,
                })?,
                None => return Err(Error::InputClosed),
            };

            match line.trim().parse::<usize>() {
                Ok(mv) if board.is_legal(mv) => return Ok(mv),
                _ => println!("enter the index of an open cell (0-8)"),
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
