use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn test_initial_state() {
    let state = State::new();
    assert_eq!(state.board, [0; 9]);
    assert_eq!(state.current_player, 1);
    assert_eq!(state.winner, 0);
    assert!(!state.is_done());
}

#[test]
fn test_legal_moves() {
    let game = TicTacToe::new();
    let state = game.initial_state();
    let legal = game.legal_moves(&state);
    assert_eq!(legal[&Player::First], (0..9).collect::<Vec<_>>());
    assert!(legal[&Player::Second].is_empty());

    // After one move
    let state = state.make_move(4); // Center
    let legal = game.legal_moves(&state);
    assert_eq!(legal[&Player::Second].len(), 8);
    assert!(!legal[&Player::Second].contains(&4));
    assert!(legal[&Player::First].is_empty());
}

#[test]
fn test_make_move() {
    let state = State::new();
    let new_state = state.make_move(4); // X places in center

    assert_eq!(new_state.board[4], 1);
    assert_eq!(new_state.current_player, 2); // Now O's turn
    assert!(!new_state.is_done());
}

#[test]
fn test_invalid_move() {
    let state = State::new();
    let state_with_move = state.make_move(4);

    // Try to place in same position
    let invalid_state = state_with_move.make_move(4);
    assert_eq!(invalid_state, state_with_move); // Should be unchanged
}

#[test]
fn test_apply_reads_the_mover() {
    let game = TicTacToe::new();
    let state = game.initial_state();

    let next = game.apply(&state, &JointAction::single(Player::First, 0));
    assert_eq!(next.board[0], 1);
    assert_eq!(game.to_move(&next), Player::Second);

    // A move attributed to the waiting player is a pass
    let unchanged = game.apply(&state, &JointAction::single(Player::Second, 0));
    assert_eq!(unchanged, state);
}

#[test]
fn test_winning_game() {
    let game = TicTacToe::new();
    let mut state = State::new();

    // X wins with top row
    for position in [0, 3, 1, 4, 2] {
        state = state.make_move(position);
    }

    assert_eq!(state.winner, 1);
    assert!(state.is_done());
    assert!(game.legal_moves(&state).is_empty());
    assert_eq!(game.outcome(&state), Some(Outcome::Winner(Player::First)));
    assert!(game.is_terminal(&state));
}

#[test]
fn test_draw_game() {
    // Board: X O X / O X O / O X O
    let state = State::from_board([1, 2, 1, 2, 1, 2, 2, 1, 2]);

    assert_eq!(state.winner, 3);
    assert!(state.is_done());
    assert_eq!(TicTacToe::new().outcome(&state), Some(Outcome::Draw));
}

#[test]
fn test_all_winning_lines() {
    for line in LINES {
        let mut board = [0u8; 9];
        for cell in line {
            board[cell] = 2;
        }
        assert_eq!(State::check_winner(&board), 2, "line {:?}", line);
    }
}

#[test]
fn test_from_board_derives_turn() {
    let x_to_move = State::from_board([1, 2, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(x_to_move.current_player, 1);

    let o_to_move = State::from_board([1, 2, 1, 0, 0, 0, 0, 0, 0]);
    assert_eq!(o_to_move.current_player, 2);
    assert_eq!(o_to_move.winner, 0);
}

#[test]
fn test_encoding_is_base_three() {
    let state = State::from_board([1, 0, 0, 0, 0, 0, 0, 0, 2]);
    assert_eq!(state.encode(), 1 + 2 * 3u32.pow(8));
    assert_eq!(State::new().encode(), 0);
}

#[test]
fn test_plain_hash_distinguishes_symmetric_boards() {
    let game = TicTacToe::new();
    let corner = State::new().make_move(0);
    let other_corner = State::new().make_move(8);

    assert_ne!(game.hash_state(&corner), game.hash_state(&other_corner));
}

#[test]
fn test_symmetric_hash_merges_rotations_and_mirrors() {
    let game = TicTacToe::with_symmetry();

    let corners: Vec<u32> = [0, 2, 6, 8]
        .iter()
        .map(|&cell| game.hash_state(&State::new().make_move(cell)))
        .collect();
    assert!(corners.windows(2).all(|pair| pair[0] == pair[1]));

    let edges: Vec<u32> = [1, 3, 5, 7]
        .iter()
        .map(|&cell| game.hash_state(&State::new().make_move(cell)))
        .collect();
    assert!(edges.windows(2).all(|pair| pair[0] == pair[1]));

    let center = game.hash_state(&State::new().make_move(4));
    assert_ne!(corners[0], edges[0]);
    assert_ne!(corners[0], center);
}

#[test]
fn test_symmetric_hash_keeps_distinct_positions_apart() {
    let game = TicTacToe::with_symmetry();

    // X corner + O adjacent edge vs X corner + O opposite corner
    let adjacent = State::from_board([1, 2, 0, 0, 0, 0, 0, 0, 0]);
    let opposite = State::from_board([1, 0, 0, 0, 0, 0, 0, 0, 2]);

    assert_ne!(game.hash_state(&adjacent), game.hash_state(&opposite));
}

#[test]
fn test_lines_heuristic() {
    let game = TicTacToe::new();
    let heuristic = game.heuristic("lines").expect("lines is registered");

    let empty = heuristic(&game, &State::new());
    assert_eq!(empty[&Player::First], 0.0);
    assert_eq!(empty[&Player::Second], 0.0);

    // X in the center touches four open lines
    let center = heuristic(&game, &State::new().make_move(4));
    assert_eq!(center[&Player::First], 4.0);
    assert_eq!(center[&Player::Second], 0.0);

    // X: 0, 1  O: 4 -> top row holds two X marks
    let state = State::from_board([1, 1, 0, 0, 2, 0, 0, 0, 0]);
    let valuation = heuristic(&game, &state);
    // X: top row (10) + left column (1); both diagonals and the middle
    // column are blocked. O: middle row + anti-diagonal.
    assert_eq!(valuation[&Player::First], 11.0);
    assert_eq!(valuation[&Player::Second], 2.0);
}

#[test]
fn test_unknown_names() {
    let game = TicTacToe::new();
    assert!(game.heuristic("missing").is_none());
    assert!(game.portfolio("anything").is_none());
    assert_eq!(game.heuristic_names(), &["lines"]);
}

// =========================================================================
// Fuzz-style tests with random seeds/actions
// =========================================================================

/// Play many random games and verify invariants hold
#[test]
fn test_random_games_invariants() {
    use rand::seq::SliceRandom;

    let game = TicTacToe::new();
    for seed in 0..50 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut state = game.initial_state();
        let mut move_count = 0;

        while !game.is_terminal(&state) {
            let mover = game.to_move(&state);
            let legal = game.legal_moves(&state);
            let moves = &legal[&mover];
            assert!(
                !moves.is_empty(),
                "Non-done game must have legal moves (seed={}, moves={})",
                seed,
                move_count
            );

            let &position = moves.choose(&mut rng).expect("non-empty");
            let next = game.apply(&state, &JointAction::single(mover, position));
            move_count += 1;

            if !game.is_terminal(&next) {
                assert_ne!(
                    game.to_move(&next),
                    mover,
                    "Player should switch after move (seed={})",
                    seed
                );
            }
            state = next;
        }

        assert!(move_count <= 9, "at most nine moves (seed={})", seed);
        assert!(game.legal_moves(&state).is_empty());
        if let Some(Outcome::Winner(player)) = game.outcome(&state) {
            assert_eq!(
                player.cell(),
                state.current_player,
                "winner is the last mover (seed={})",
                seed
            );
        }
    }
}
