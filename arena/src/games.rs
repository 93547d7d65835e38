//! Games the arena knows how to play.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    TicTacToe,
    /// Tic-tac-toe with symmetric positions merged into one node
    TicTacToeSymmetric,
    Connect4,
    Maze,
    Tricks,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::TicTacToe,
        GameKind::TicTacToeSymmetric,
        GameKind::Connect4,
        GameKind::Maze,
        GameKind::Tricks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::TicTacToeSymmetric => "tictactoe-sym",
            GameKind::Connect4 => "connect4",
            GameKind::Maze => "maze",
            GameKind::Tricks => "tricks",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| {
                let available: Vec<&str> = GameKind::ALL.iter().map(|k| k.name()).collect();
                anyhow!(
                    "unknown game '{}' (available: {})",
                    name,
                    available.join(", ")
                )
            })
    }
}
