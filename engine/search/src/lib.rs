//! Generic game-tree search over a transposition graph.
//!
//! This crate provides a game-agnostic search engine that works with any
//! game implementing the `engine-core` [`Game`](engine_core::Game) trait,
//! including games where several actors move simultaneously.
//!
//! # Overview
//!
//! Unlike a classic tree search, states are deduplicated by their canonical
//! hash, so the explored structure is a directed graph that may contain
//! transpositions and cycles. Each build iteration consists of four phases:
//!
//! 1. **Scheduling**: Take pending nodes from the expansion queue (FIFO,
//!    LIFO, whole-queue batches, or best-first by a named priority)
//! 2. **Expansion**: Generate joint actions (full product or portfolio
//!    filtered) and apply them through the game
//! 3. **Evaluation**: Value each newly discovered state once, aggregated into
//!    the searching actor's scalar
//! 4. **Resolution**: Minimax-resolve the expanded node and propagate value
//!    changes to its parents until nothing changes
//!
//! # Usage
//!
//! ```rust,ignore
//! use games_tictactoe::TicTacToe;
//! use engine_core::Game;
//! use search::{Decision, Search, SearchConfig};
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state();
//! let config: SearchConfig = "limit_type=plies,limit=2,eval_func=lines".parse()?;
//!
//! let mut search = Search::builder(&game, config)
//!     .with_stats()
//!     .build(state, game.to_move(&state))?;
//!
//! if let Decision::Move(Some(cell)) = search.run()? {
//!     println!("Best cell: {cell}");
//! }
//! println!("Root value: {}", search.root_value());
//! ```
//!
//! # Configuration
//!
//! The [`SearchConfig`] struct holds one choice per strategy axis:
//!
//! - `expansion`: when to stop (disabled, exhaustive, node limit, step limit)
//! - `frontier`: expansion order
//! - `generation`: how joint actions are produced
//! - `evaluation`: outcome classifier, named heuristic, or rollouts
//! - `aggregation`: zero-sum or leader-relative
//! - `selection`: best move, random move, or all optimal paths
//!
//! Configurations also parse from spec strings such as `"sota"` or
//! `"limit_type=nodes,limit=500,eval=rollout,rollouts=4"`.
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                           Search                            |
//! +-------------------------------------------------------------+
//! |  +-------------------+  +---------------+  +-------------+  |
//! |  | TranspositionStore|  |ExpansionQueue |  |  Evaluator  |  |
//! |  |  (arena + index)  |  |  (frontier)   |  | + Aggregate |  |
//! |  +---------+---------+  +-------+-------+  +------+------+  |
//! |            |                    |                 |         |
//! |            v                    v                 v         |
//! |  +-------------------------------------------------------+  |
//! |  |   schedule -> generate -> apply -> evaluate ->         |  |
//! |  |             resolve + propagate -> select             |  |
//! |  +-------------------------------------------------------+  |
//! +-------------------------------------------------------------+
//! ```

pub mod actions;
pub mod config;
pub mod evaluator;
pub mod metrics;
pub mod node;
pub mod resolver;
pub mod schedule;
pub mod search;
pub mod selector;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use actions::ActionGenerator;
pub use config::{
    Aggregation, ConfigError, Evaluation, Expansion, Frontier, Generation, SearchConfig,
    Selection,
};
pub use evaluator::{Evaluator, HeuristicEvaluator, OutcomeEvaluator, RolloutEvaluator};
pub use metrics::SearchStats;
pub use node::{Edge, EdgeId, NodeId, Opinion, StoredNode};
pub use resolver::{propagate, resolve, Propagation};
pub use schedule::ExpansionQueue;
pub use search::{run_search, Decision, Search, SearchBuilder, SearchError};
pub use selector::Path;
pub use store::{StoreStats, TranspositionStore};
