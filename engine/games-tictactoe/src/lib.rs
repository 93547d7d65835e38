//! TicTacToe game model for the search engine
//!
//! This crate is the smallest complete implementation of the engine-core
//! [`Game`] trait and the usual first target for checking a search
//! configuration.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, JointAction};
//! use engine_core::game_utils::Player;
//! use games_tictactoe::TicTacToe;
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state();
//! assert_eq!(game.to_move(&state), Player::First);
//!
//! let next = game.apply(&state, &JointAction::single(Player::First, 4));
//! assert_eq!(game.to_move(&next), Player::Second);
//! ```

use engine_core::game_utils::{alternating_moves, outcome_from_status, status, window_score, Player};
use engine_core::{Game, Heuristic, JointAction, LegalMoves, Outcome, Valuation};

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Cell permutations for the eight board symmetries.
///
/// Entry `i` of a permutation names the source cell that lands on cell `i`.
const SYMMETRIES: [[usize; 9]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8], // identity
    [6, 3, 0, 7, 4, 1, 8, 5, 2], // rotate 90
    [8, 7, 6, 5, 4, 3, 2, 1, 0], // rotate 180
    [2, 5, 8, 1, 4, 7, 0, 3, 6], // rotate 270
    [2, 1, 0, 5, 4, 3, 8, 7, 6], // mirror columns
    [6, 7, 8, 3, 4, 5, 0, 1, 2], // mirror rows
    [0, 3, 6, 1, 4, 7, 2, 5, 8], // main diagonal
    [8, 5, 2, 7, 4, 1, 6, 3, 0], // anti diagonal
];

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: 1, // X goes first
            winner: status::ONGOING,
        }
    }

    /// Build a state from a board, deriving the side to move and winner.
    ///
    /// X always moves first, so X is to move whenever both sides have
    /// placed the same number of marks.
    pub fn from_board(board: [u8; 9]) -> Self {
        let (x, o) = board.iter().fold((0, 0), |(x, o), &cell| match cell {
            1 => (x + 1, o),
            2 => (x, o + 1),
            _ => (x, o),
        });
        Self {
            board,
            current_player: if x > o { 2 } else { 1 },
            winner: Self::check_winner(&board),
        }
    }

    /// The board cells: 0=empty, 1=X, 2=O
    pub fn board(&self) -> &[u8; 9] {
        &self.board
    }

    /// Winner status code (see [`engine_core::game_utils::status`])
    pub fn winner(&self) -> u8 {
        self.winner
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != status::ONGOING
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> State {
        if self.is_done() || position >= 9 || self.board[position as usize] != 0 {
            return *self; // Invalid move, return unchanged state
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player;

        // Check for winner
        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == status::ONGOING {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        new_state
    }

    /// Base-3 encoding of the board, cell 0 least significant.
    pub fn encode(&self) -> u32 {
        encode_cells(self.board)
    }

    /// Smallest encoding over the eight board symmetries.
    pub fn canonical_encoding(&self) -> u32 {
        SYMMETRIES
            .iter()
            .map(|perm| encode_cells(perm.map(|src| self.board[src])))
            .min()
            .unwrap_or_else(|| self.encode())
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
            return status::DRAW;
        }

        status::ONGOING
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_cells(cells: [u8; 9]) -> u32 {
    cells
        .iter()
        .rev()
        .fold(0u32, |acc, &cell| acc * 3 + cell as u32)
}

/// TicTacToe game model
///
/// States are keyed by their base-3 board encoding. With
/// [`TicTacToe::with_symmetry`] rotated and mirrored boards share one key,
/// which shrinks the searched graph roughly eightfold.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe {
    symmetric: bool,
}

impl TicTacToe {
    /// Create a new TicTacToe game
    pub fn new() -> Self {
        Self { symmetric: false }
    }

    /// Treat symmetric boards as the same state.
    pub fn with_symmetry() -> Self {
        Self { symmetric: true }
    }

    /// The player whose turn it is.
    pub fn to_move(&self, state: &State) -> Player {
        Player::from_cell(state.current_player).unwrap_or(Player::First)
    }
}

impl Game for TicTacToe {
    type State = State;
    type Actor = Player;
    type Move = u8;
    type Hash = u32;

    fn actors(&self) -> Vec<Player> {
        Player::BOTH.to_vec()
    }

    fn initial_state(&self) -> State {
        State::new()
    }

    fn legal_moves(&self, state: &State) -> LegalMoves<Player, u8> {
        if state.is_done() {
            return LegalMoves::new();
        }
        alternating_moves(self.to_move(state), state.legal_moves())
    }

    fn apply(&self, state: &State, action: &JointAction<Player, u8>) -> State {
        match action.get(self.to_move(state)) {
            Some(&position) => state.make_move(position),
            None => *state,
        }
    }

    fn outcome(&self, state: &State) -> Option<Outcome<Player>> {
        outcome_from_status(state.winner)
    }

    fn hash_state(&self, state: &State) -> u32 {
        if self.symmetric {
            state.canonical_encoding()
        } else {
            state.encode()
        }
    }

    fn heuristic(&self, name: &str) -> Option<Heuristic<Self>> {
        match name {
            "lines" => Some(open_lines),
            _ => None,
        }
    }

    fn heuristic_names(&self) -> &'static [&'static str] {
        &["lines"]
    }
}

/// Lines still winnable by exactly one side, weighted by how full they are.
///
/// A single mark in an open line is worth 1, two marks are worth 10.
fn open_lines(_game: &TicTacToe, state: &State) -> Valuation<Player> {
    let (x, o) = LINES.iter().fold((0.0, 0.0), |(x, o), line| {
        let (first, second) = window_score(line.map(|cell| state.board[cell]), line_weight);
        (x + first, o + second)
    });
    Valuation::from([(Player::First, x), (Player::Second, o)])
}

fn line_weight(marks: u32) -> f64 {
    10f64.powi(marks as i32 - 1)
}

#[cfg(test)]
mod tests;
