//! Textual board projection

use crate::board::BoardState;

/// Render a board as a 3x3 grid between dashed separators.
///
/// Purely a read-only projection for display; never part of engine state.
pub fn format_board(board: &BoardState) -> String {
    let mut out = String::from("-------\n");
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| board.get(row * 3 + col).to_char().to_string())
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }
    out.push_str("-------");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_board() {
        let board: BoardState = "XOX.O.X..".parse().unwrap();
        let rendered = format_board(&board);
        assert_eq!(rendered, "-------\nX  O  X\n.  O  .\nX  .  .\n-------");
    }
}
