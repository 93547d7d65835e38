//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the arena driver. Search behavior itself is configured per actor through
//! spec strings; the values here are the defaults those spec strings start
//! from.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`GAMETREE_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! GAMETREE_<SECTION>_<KEY>=value
//!
//! Examples:
//!     GAMETREE_COMMON_GAME=connect4
//!     GAMETREE_COMMON_LOG_LEVEL=debug
//!     GAMETREE_SEARCH_NODE_LIMIT=2000
//!     GAMETREE_ARENA_ROUNDS=50
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
