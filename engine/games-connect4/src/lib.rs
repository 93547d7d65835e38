//! Connect 4 game model for the search engine
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Named strategies
//!
//! * heuristic `windows`: open four-cell windows weighted by fill
//! * portfolio `central`: only the columns next to the middle, while any is open

use engine_core::game_utils::{alternating_moves, outcome_from_status, status, window_score, Player};
use engine_core::{Game, Heuristic, JointAction, LegalMoves, Outcome, Portfolio, Valuation};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Direction vectors: horizontal, vertical, diagonal /, diagonal \
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Connect4 game state
///
/// Represents the complete state of a Connect4 game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=Red (player 1), 2=Yellow (player 2)
    /// Stored in row-major order with row 0 at the bottom
    board: [u8; BOARD_SIZE],
    /// Current player: 1=Red, 2=Yellow
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=Red, 2=Yellow, 3=draw
    winner: u8,
    /// Height of each column (0-6 means number of pieces in column)
    column_heights: [u8; COLS],
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: 1, // Red goes first
            winner: status::ONGOING,
            column_heights: [0; COLS],
        }
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != status::ONGOING
    }

    /// Winner status code (see [`engine_core::game_utils::status`])
    pub fn winner(&self) -> u8 {
        self.winner
    }

    /// Disc at `(col, row)`: 0=empty, 1=Red, 2=Yellow
    pub fn cell(&self, col: usize, row: usize) -> u8 {
        self.board[Self::pos(col, row)]
    }

    /// Get legal moves (columns that are not full)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..COLS as u8)
            .filter(|&col| self.column_heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Drop a piece in the given column and return the new state
    pub fn drop_piece(&self, column: u8) -> State {
        let col = column as usize;

        // Check if move is valid
        if self.is_done() || col >= COLS || self.column_heights[col] >= ROWS as u8 {
            return self.clone(); // Invalid move, return unchanged state
        }

        let mut new_state = self.clone();
        let row = self.column_heights[col] as usize;

        // Place the piece
        new_state.board[Self::pos(col, row)] = self.current_player;
        new_state.column_heights[col] += 1;

        // Check for winner
        new_state.winner = new_state.check_winner_at(col, row);

        // Switch player if game not over
        if new_state.winner == status::ONGOING {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        new_state
    }

    /// Check if the piece at (col, row) creates a winning line
    fn check_winner_at(&self, col: usize, row: usize) -> u8 {
        let player = self.board[Self::pos(col, row)];
        if player == 0 {
            return status::ONGOING;
        }

        for (dc, dr) in DIRECTIONS {
            let count = 1
                + self.run_length(col, row, dc, dr, player)
                + self.run_length(col, row, -dc, -dr, player);

            if count >= 4 {
                return player;
            }
        }

        // Check for draw (board full but no winner)
        if self.column_heights.iter().all(|&h| h >= ROWS as u8) {
            return status::DRAW;
        }

        status::ONGOING
    }

    /// Consecutive `player` discs starting one step from `(col, row)`.
    fn run_length(&self, col: usize, row: usize, dc: i32, dr: i32, player: u8) -> usize {
        let (mut c, mut r) = (col as i32 + dc, row as i32 + dr);
        let mut count = 0;
        while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
            if self.board[Self::pos(c as usize, r as usize)] != player {
                break;
            }
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }

    /// Every four-cell window on the board, as cell contents.
    fn windows(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        (0..COLS as i32).flat_map(move |col| {
            (0..ROWS as i32).flat_map(move |row| {
                DIRECTIONS.into_iter().filter_map(move |(dc, dr)| {
                    let (end_c, end_r) = (col + 3 * dc, row + 3 * dr);
                    if !(0..COLS as i32).contains(&end_c) || !(0..ROWS as i32).contains(&end_r) {
                        return None;
                    }
                    let window: [u8; 4] = std::array::from_fn(|i| {
                        let i = i as i32;
                        self.board[Self::pos((col + i * dc) as usize, (row + i * dr) as usize)]
                    });
                    Some(window)
                })
            })
        })
    }

    /// Two 64-bit disc masks packed into one key: Red low, Yellow high.
    pub fn key(&self) -> u128 {
        let (red, yellow) = self
            .board
            .iter()
            .enumerate()
            .fold((0u64, 0u64), |(red, yellow), (idx, &cell)| match cell {
                1 => (red | 1 << idx, yellow),
                2 => (red, yellow | 1 << idx),
                _ => (red, yellow),
            });
        red as u128 | (yellow as u128) << 64
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Connect4 game model
#[derive(Debug, Clone, Copy, Default)]
pub struct Connect4;

impl Connect4 {
    /// Create a new Connect4 game
    pub fn new() -> Self {
        Self
    }

    /// The player whose turn it is.
    pub fn to_move(&self, state: &State) -> Player {
        Player::from_cell(state.current_player).unwrap_or(Player::First)
    }
}

impl Game for Connect4 {
    type State = State;
    type Actor = Player;
    type Move = u8;
    type Hash = u128;

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
            Some(&column) => state.drop_piece(column),
            None => state.clone(),
        }
    }

    fn outcome(&self, state: &State) -> Option<Outcome<Player>> {
        outcome_from_status(state.winner)
    }

    fn hash_state(&self, state: &State) -> u128 {
        state.key()
    }

    fn heuristic(&self, name: &str) -> Option<Heuristic<Self>> {
        match name {
            "windows" => Some(open_windows),
            _ => None,
        }
    }

    fn heuristic_names(&self) -> &'static [&'static str] {
        &["windows"]
    }

    fn portfolio(&self, name: &str) -> Option<Portfolio<Self>> {
        match name {
            "central" => Some(central_columns),
            _ => None,
        }
    }

    fn portfolio_names(&self) -> &'static [&'static str] {
        &["central"]
    }
}

/// Sum of window scores per player; a window with `n` discs of one color
/// is worth `4^(n-1)`.
fn open_windows(_game: &Connect4, state: &State) -> Valuation<Player> {
    let (red, yellow) = state.windows().fold((0.0, 0.0), |(red, yellow), window| {
        let (first, second) = window_score(window, window_weight);
        (red + first, yellow + second)
    });
    Valuation::from([(Player::First, red), (Player::Second, yellow)])
}

fn window_weight(discs: u32) -> f64 {
    4f64.powi(discs as i32 - 1)
}

/// Columns 2 to 4 while any of them is open, otherwise everything.
fn central_columns(_game: &Connect4, _state: &State, _actor: Player, moves: &[u8]) -> Vec<u8> {
    let center = COLS as u8 / 2;
    let central: Vec<u8> = moves
        .iter()
        .copied()
        .filter(|&col| col.abs_diff(center) <= 1)
        .collect();

    if central.is_empty() {
        moves.to_vec()
    } else {
        central
    }
}
