//! Symmetry reduction: canonical board orientations
//!
//! The 3x3 board admits 8 symmetries (4 rotations x 2 flip states). Every
//! board is collapsed to the lexicographically smallest of its 8 images,
//! which shrinks the state space seen by learning and search by up to 8x.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;

/// Gather permutation for a 90-degree clockwise rotation: the cell
/// originally at `ROTATE_PATTERN[i]` ends up at index `i`.
pub const ROTATE_PATTERN: [usize; 9] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// Gather permutation for a horizontal flip about the center column.
pub const FLIP_PATTERN: [usize; 9] = [2, 1, 0, 5, 4, 3, 8, 7, 6];

/// Apply a gather pattern `times` times.
fn permute<T: Copy>(cells: [T; 9], pattern: &[usize; 9], times: u8) -> [T; 9] {
    let mut out = cells;
    for _ in 0..times {
        let prev = out;
        for (i, &src) in pattern.iter().enumerate() {
            out[i] = prev[src];
        }
    }
    out
}

/// One of the 8 board symmetries: `rotations` quarter-turns clockwise,
/// then `flips` horizontal flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transform {
    /// Quarter-turns clockwise, in [0, 4)
    pub rotations: u8,
    /// Horizontal flips, in [0, 2)
    pub flips: u8,
}

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        Transform {
            rotations: 0,
            flips: 0,
        }
    }

    /// All 8 transforms in fixed (rotations, flips) order
    pub fn all() -> [Transform; 8] {
        let mut transforms = [Transform::identity(); 8];
        let mut idx = 0;
        for rotations in 0..4 {
            for flips in 0..2 {
                transforms[idx] = Transform { rotations, flips };
                idx += 1;
            }
        }
        transforms
    }

    fn apply_cells<T: Copy>(&self, cells: [T; 9]) -> [T; 9] {
        let rotated = permute(cells, &ROTATE_PATTERN, self.rotations);
        permute(rotated, &FLIP_PATTERN, self.flips)
    }

    /// Invert: unflip first (the flip is self-inverse), then complete the
    /// rotation cycle with `4 - rotations` further quarter-turns.
    fn restore_cells<T: Copy>(&self, cells: [T; 9]) -> [T; 9] {
        let unflipped = permute(cells, &FLIP_PATTERN, self.flips);
        permute(unflipped, &ROTATE_PATTERN, 4 - self.rotations)
    }

    /// Apply the transform to a board
    pub fn apply(&self, board: &BoardState) -> BoardState {
        BoardState {
            cells: self.apply_cells(board.cells),
        }
    }

    /// Undo the transform
    pub fn restore(&self, board: &BoardState) -> BoardState {
        BoardState {
            cells: self.restore_cells(board.cells),
        }
    }

    /// Map a move index into the transformed frame.
    ///
    /// A marker board with only that cell set travels through the same cell
    /// permutation as `apply`, and the marker index is read back. Sharing
    /// the permutation helper with board transformation is what keeps move
    /// mapping and board mapping consistent; a separate index formula could
    /// silently drift.
    pub fn apply_move(&self, mv: usize) -> usize {
        let mut marker = [false; 9];
        marker[mv] = true;
        let transformed = self.apply_cells(marker);
        locate_marker(&transformed)
    }

    /// Map a transformed-frame move index back to the original frame via
    /// the marker board run through `restore`.
    pub fn restore_move(&self, mv: usize) -> usize {
        let mut marker = [false; 9];
        marker[mv] = true;
        let restored = self.restore_cells(marker);
        locate_marker(&restored)
    }
}

fn locate_marker(marker: &[bool; 9]) -> usize {
    marker
        .iter()
        .position(|&m| m)
        .expect("permutation preserves the marker cell")
}

/// The canonical orientation of a board: the lexicographically smallest of
/// its 8 symmetry images, the transform that produced it, and the cached
/// string encoding used as a table key.
///
/// Computing this evaluates all 8 images, so callers that need both the
/// key and move mappings should compute it once and reuse it.
#[derive(Debug, Clone)]
pub struct CanonicalForm {
    pub board: BoardState,
    pub transform: Transform,
    pub key: String,
}

impl CanonicalForm {
    /// Map a move from the original frame into the canonical frame
    pub fn to_canonical(&self, mv: usize) -> usize {
        self.transform.apply_move(mv)
    }

    /// Map a canonical-frame move back to the original frame
    pub fn from_canonical(&self, mv: usize) -> usize {
        self.transform.restore_move(mv)
    }
}

impl BoardState {
    /// Compute the canonical form of this board.
    ///
    /// Ties between transforms producing the same minimal image resolve to
    /// the first in `Transform::all()` order, so the result is stable and
    /// idempotent: canonicalizing a canonical board yields the identity
    /// transform.
    pub fn canonical(&self) -> CanonicalForm {
        let mut best = CanonicalForm {
            board: *self,
            transform: Transform::identity(),
            key: self.encode(),
        };

        for transform in Transform::all() {
            let image = transform.apply(self);
            let key = image.encode();
            if key < best.key {
                best = CanonicalForm {
                    board: image,
                    transform,
                    key,
                };
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_boards() -> Vec<BoardState> {
        ["XOO.X.OX.", "X.OOXXO..", "..OXXOO.X", "X........", ".........", "XOXXOXOXO"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_rotation_has_order_four() {
        for board in sample_boards() {
            let t = Transform {
                rotations: 1,
                flips: 0,
            };
            let mut rotated = board;
            for _ in 0..4 {
                rotated = t.apply(&rotated);
            }
            assert_eq!(rotated, board);
        }
    }

    #[test]
    fn test_flip_is_involution() {
        let t = Transform {
            rotations: 0,
            flips: 1,
        };
        for board in sample_boards() {
            assert_eq!(t.apply(&t.apply(&board)), board);
        }
    }

    #[test]
    fn test_restore_inverts_apply() {
        for board in sample_boards() {
            for transform in Transform::all() {
                let image = transform.apply(&board);
                assert_eq!(
                    transform.restore(&image),
                    board,
                    "restore failed for {transform:?}"
                );
            }
        }
    }

    #[test]
    fn test_move_mapping_round_trips() {
        for transform in Transform::all() {
            for mv in 0..9 {
                let mapped = transform.apply_move(mv);
                assert_eq!(transform.restore_move(mapped), mv);
            }
        }
    }

    #[test]
    fn test_move_mapping_matches_board_mapping() {
        // Placing a mark then transforming must equal transforming then
        // placing at the mapped index.
        let board: BoardState = "....X..O.".parse().unwrap();
        for transform in Transform::all() {
            for mv in board.legal_moves() {
                let played_then_mapped = transform.apply(&board.play(mv).unwrap());
                let mapped_then_played = transform
                    .apply(&board)
                    .play(transform.apply_move(mv))
                    .unwrap();
                assert_eq!(played_then_mapped, mapped_then_played);
            }
        }
    }

    #[test]
    fn test_representative_is_symmetry_invariant() {
        for board in sample_boards() {
            let canonical = board.canonical();
            for transform in Transform::all() {
                let image = transform.apply(&board);
                assert_eq!(image.canonical().key, canonical.key);
            }
        }
    }

    #[test]
    fn test_representative_is_idempotent() {
        for board in sample_boards() {
            let canonical = board.canonical();
            let again = canonical.board.canonical();
            assert_eq!(again.board, canonical.board);
            assert_eq!(again.transform, Transform::identity());
        }
    }

    #[test]
    fn test_corner_opening_canonicalizes() {
        // All four corner openings share one canonical form.
        let corners: Vec<String> = [0usize, 2, 6, 8]
            .iter()
            .map(|&pos| BoardState::new().play(pos).unwrap().canonical().key)
            .collect();
        assert!(corners.iter().all(|k| k == &corners[0]));

        // An X in a corner canonicalizes to the image with the smallest
        // encoding, which puts the mark at the last corner.
        assert_eq!(corners[0], "........X");
    }

    #[test]
    fn test_canonical_move_round_trip_through_form() {
        let board = BoardState::new().play(0).unwrap();
        let canonical = board.canonical();
        for mv in board.legal_moves() {
            let canonical_mv = canonical.to_canonical(mv);
            assert_eq!(canonical.from_canonical(canonical_mv), mv);
        }
    }
}
