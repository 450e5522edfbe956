//! Property checks for symmetry reduction over realistic board samples

use oxo::{BoardState, Player, RandomStrategy, Strategy, Transform};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

/// Collect every intermediate board from a handful of random playouts.
fn sampled_boards(seed: u64, games: usize) -> Vec<BoardState> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut boards = vec![BoardState::new()];

    for _ in 0..games {
        let mut board = BoardState::new();
        while !board.is_terminal() {
            let mv = *board.legal_moves().choose(&mut rng).unwrap();
            board = board.play(mv).unwrap();
            boards.push(board);
        }
    }

    boards
}

#[test]
fn restore_inverts_transform_for_all_group_elements() {
    for board in sampled_boards(5, 30) {
        for transform in Transform::all() {
            let image = transform.apply(&board);
            assert_eq!(transform.restore(&image), board);
        }
    }
}

#[test]
fn representative_is_invariant_across_orientations() {
    for board in sampled_boards(6, 30) {
        let canonical_key = board.canonical().key;
        for transform in Transform::all() {
            let image = transform.apply(&board);
            assert_eq!(image.canonical().key, canonical_key);
        }
    }
}

#[test]
fn representative_is_idempotent() {
    for board in sampled_boards(7, 20) {
        let canonical = board.canonical();
        let again = canonical.board.canonical();
        assert_eq!(again.board, canonical.board);
        assert_eq!(again.transform, Transform::identity());
    }
}

#[test]
fn move_mapping_round_trips_through_canonical_frame() {
    for board in sampled_boards(8, 20) {
        let canonical = board.canonical();
        for mv in board.legal_moves() {
            let canonical_mv = canonical.to_canonical(mv);
            assert_eq!(canonical.from_canonical(canonical_mv), mv);
            // The mapped move lands on an open cell of the canonical board.
            assert!(canonical.board.is_legal(canonical_mv));
        }
    }
}

#[test]
fn canonicalization_commutes_with_play() {
    // Playing a move then canonicalizing reaches the same state set as
    // canonicalizing first and playing the mapped move.
    for board in sampled_boards(9, 15) {
        if board.is_terminal() {
            continue;
        }
        let canonical = board.canonical();
        for mv in board.legal_moves() {
            let played = board.play(mv).unwrap().canonical().key;
            let mapped = canonical
                .board
                .play(canonical.to_canonical(mv))
                .unwrap()
                .canonical()
                .key;
            assert_eq!(played, mapped);
        }
    }
}

#[test]
fn canonical_states_stay_below_the_orbit_bound() {
    // A long random sweep touches far fewer canonical states than raw
    // states: the orbit of each board has up to 8 members.
    use std::collections::HashSet;

    let mut raw = HashSet::new();
    let mut canonical = HashSet::new();
    let mut x = RandomStrategy::with_seed(Player::X, 21);
    let mut o = RandomStrategy::with_seed(Player::O, 22);

    for _ in 0..300 {
        let mut board = BoardState::new();
        while !board.is_terminal() {
            let mv = match board.turn() {
                Player::X => x.make_move(&board, 0.0, false).unwrap(),
                Player::O => o.make_move(&board, 0.0, false).unwrap(),
            };
            board = board.play(mv).unwrap();
            raw.insert(board.encode());
            canonical.insert(board.canonical().key);
        }
    }

    assert!(canonical.len() < raw.len());
    // Known bound: tic-tac-toe has 765 canonical states (including the
    // empty board, which this sweep never revisits).
    assert!(canonical.len() <= 765);
}
