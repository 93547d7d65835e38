//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time, so
//! the documented defaults and the compiled ones cannot drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    game: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    default_ai: String,
    node_limit: usize,
    expansion_steps: u32,
    rollouts: u32,
    propagation_limit: usize,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    rounds: u32,
    seed: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn game() -> &'static str {
    &DEFAULTS.common.game
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn default_ai() -> &'static str {
    &DEFAULTS.search.default_ai
}
pub fn node_limit() -> usize {
    DEFAULTS.search.node_limit
}
pub fn expansion_steps() -> u32 {
    DEFAULTS.search.expansion_steps
}
pub fn rollouts() -> u32 {
    DEFAULTS.search.rollouts
}
pub fn propagation_limit() -> usize {
    DEFAULTS.search.propagation_limit
}

// Arena
pub fn rounds() -> u32 {
    DEFAULTS.arena.rounds
}
pub fn seed() -> u64 {
    DEFAULTS.arena.seed
}
