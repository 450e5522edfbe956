//! Winning line analysis

use crate::board::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Find the mark occupying a complete line, if any.
    ///
    /// Lines are checked in `WINNING_LINES` order, so when several lines are
    /// complete at once the same one is reported every time.
    pub fn winner_on(cells: &[Cell; 9]) -> Option<Player> {
        for line in &WINNING_LINES {
            match cells[line[0]] {
                Cell::Empty => continue,
                mark => {
                    if cells[line[1]] == mark && cells[line[2]] == mark {
                        return match mark {
                            Cell::X => Some(Player::X),
                            Cell::O => Some(Player::O),
                            Cell::Empty => None,
                        };
                    }
                }
            }
        }
        None
    }

    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// All positions that would immediately complete three-in-a-row for the
    /// player, in ascending order.
    pub fn winning_moves(cells: &[Cell; 9], player: Player) -> Vec<usize> {
        let mut moves: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(cells, player, line))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    /// Find the winning move position in a specific line, if one exists
    fn winning_move_in_line(cells: &[Cell; 9], player: Player, line: &[usize; 3]) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        // More than one empty cell, not a winning move
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None, // Opponent piece in line
            }
        }

        if count == 2 { empty_pos } else { None }
    }
}
