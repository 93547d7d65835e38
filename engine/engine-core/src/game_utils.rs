//! Shared utilities for two-player board game implementations
//!
//! Tic-tac-toe and connect-four keep their boards as cell arrays and their
//! winner as a small status code. These helpers translate between that
//! compact form and the engine-facing types.

use crate::game::Outcome;
use crate::joint::LegalMoves;

/// One of the two seats in an alternating two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Both seats in turn order.
    pub const BOTH: [Player; 2] = [Player::First, Player::Second];

    /// The other seat.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Cell marker used on boards: 1 for the first seat, 2 for the second.
    #[inline]
    pub fn cell(self) -> u8 {
        match self {
            Player::First => 1,
            Player::Second => 2,
        }
    }

    /// Inverse of [`Player::cell`]. Empty cells (0) and anything else give `None`.
    #[inline]
    pub fn from_cell(cell: u8) -> Option<Player> {
        match cell {
            1 => Some(Player::First),
            2 => Some(Player::Second),
            _ => None,
        }
    }
}

/// Winner status code stored in board states.
///
/// * `0` - game ongoing
/// * `1` - first seat won
/// * `2` - second seat won
/// * `3` - draw
pub mod status {
    pub const ONGOING: u8 = 0;
    pub const DRAW: u8 = 3;
}

/// Translate a status code into an [`Outcome`].
///
/// # Example
/// ```
/// use engine_core::game_utils::{outcome_from_status, Player};
/// use engine_core::Outcome;
///
/// assert_eq!(outcome_from_status(0), None);
/// assert_eq!(outcome_from_status(2), Some(Outcome::Winner(Player::Second)));
/// assert_eq!(outcome_from_status(3), Some(Outcome::Draw));
/// ```
#[inline]
pub fn outcome_from_status(winner: u8) -> Option<Outcome<Player>> {
    match winner {
        status::ONGOING => None,
        status::DRAW => Some(Outcome::Draw),
        cell => Player::from_cell(cell).map(Outcome::Winner),
    }
}

/// Legal moves for an alternating game: the player to move gets `moves`,
/// the opponent is listed with no moves and so passes.
pub fn alternating_moves<M>(to_move: Player, moves: Vec<M>) -> LegalMoves<Player, M> {
    LegalMoves::from([(to_move, moves), (to_move.opponent(), Vec::new())])
}

/// Count the stones of each seat within a window of cells.
///
/// Returns `(first, second)`.
#[inline]
pub fn count_window(cells: impl IntoIterator<Item = u8>) -> (u32, u32) {
    cells.into_iter().fold((0, 0), |(first, second), cell| {
        match Player::from_cell(cell) {
            Some(Player::First) => (first + 1, second),
            Some(Player::Second) => (first, second + 1),
            None => (first, second),
        }
    })
}

/// Score of a line window that only one seat occupies.
///
/// Mixed windows are dead and score nothing. A window holding `n` stones
/// of a single seat contributes `weight(n)` to that seat.
pub fn window_score(cells: impl IntoIterator<Item = u8>, weight: fn(u32) -> f64) -> (f64, f64) {
    match count_window(cells) {
        (0, 0) => (0.0, 0.0),
        (first, 0) => (weight(first), 0.0),
        (0, second) => (0.0, weight(second)),
        _ => (0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::First.opponent(), Player::Second);
        assert_eq!(Player::Second.opponent(), Player::First);
    }

    #[test]
    fn test_cell_round_trip() {
        for player in Player::BOTH {
            assert_eq!(Player::from_cell(player.cell()), Some(player));
        }
        assert_eq!(Player::from_cell(0), None);
        assert_eq!(Player::from_cell(7), None);
    }

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(outcome_from_status(0), None);
        assert_eq!(outcome_from_status(1), Some(Outcome::Winner(Player::First)));
        assert_eq!(outcome_from_status(2), Some(Outcome::Winner(Player::Second)));
        assert_eq!(outcome_from_status(3), Some(Outcome::Draw));
        // Unknown codes are treated as ongoing
        assert_eq!(outcome_from_status(9), None);
    }

    #[test]
    fn test_alternating_moves() {
        let moves = alternating_moves(Player::Second, vec![4u8, 5]);
        assert_eq!(moves[&Player::Second], vec![4, 5]);
        assert!(moves[&Player::First].is_empty());
    }

    #[test]
    fn test_count_window() {
        assert_eq!(count_window([1, 0, 1, 2]), (2, 1));
        assert_eq!(count_window([0, 0, 0]), (0, 0));
    }

    #[test]
    fn test_window_score() {
        let weight = |n: u32| (n * n) as f64;

        assert_eq!(window_score([1, 1, 0, 0], weight), (4.0, 0.0));
        assert_eq!(window_score([0, 2, 2, 2], weight), (0.0, 9.0));
        assert_eq!(window_score([1, 2, 0, 0], weight), (0.0, 0.0));
        assert_eq!(window_score([0, 0, 0, 0], weight), (0.0, 0.0));
    }
}
