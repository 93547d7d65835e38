//! Core traits and types for the game-tree search engine
//!
//! This crate provides the contract every game implements:
//! - `Game`: typed state-transition trait consumed by the search
//! - `JointAction`: one choice (or a pass) per deciding actor
//! - `Outcome` / `Valuation`: terminal classification and per-actor scores
//! - `game_utils`: helpers shared by the two-player board games

pub mod game;
pub mod game_utils;
pub mod joint;

// Re-export main types for convenience
pub use game::{
    neutral_valuation, Game, Heuristic, Outcome, Portfolio, Priority, Valuation, Value,
};
pub use joint::{JointAction, LegalMoves};
