//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by GAMETREE_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("GAMETREE_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from GAMETREE_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "GAMETREE_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files fall back to the built-in defaults with a
/// warning; environment overrides apply either way.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, usize, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional string field
    ($config:expr, $section:ident . $field:ident, $key:expr, optional) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: GAMETREE_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.game, "GAMETREE_COMMON_GAME");
    env_override!(config, common.log_level, "GAMETREE_COMMON_LOG_LEVEL");

    // Search
    env_override!(config, search.default_ai, "GAMETREE_SEARCH_DEFAULT_AI");
    env_override!(
        config,
        search.node_limit,
        "GAMETREE_SEARCH_NODE_LIMIT",
        parse
    );
    env_override!(
        config,
        search.expansion_steps,
        "GAMETREE_SEARCH_EXPANSION_STEPS",
        parse
    );
    env_override!(config, search.rollouts, "GAMETREE_SEARCH_ROLLOUTS", parse);
    env_override!(
        config,
        search.propagation_limit,
        "GAMETREE_SEARCH_PROPAGATION_LIMIT",
        parse
    );

    // Arena
    env_override!(config, arena.rounds, "GAMETREE_ARENA_ROUNDS", parse);
    env_override!(config, arena.seed, "GAMETREE_ARENA_SEED", parse);
    env_override!(
        config,
        arena.stats_path,
        "GAMETREE_ARENA_STATS_PATH",
        optional
    );

    config
}
