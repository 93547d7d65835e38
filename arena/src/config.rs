//! Configuration for the arena driver
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use search::{Evaluation, Expansion, SearchConfig};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::games::GameKind;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_game() -> String {
    CENTRAL_CONFIG.common.game.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_ai() -> String {
    CENTRAL_CONFIG.search.default_ai.clone()
}

fn default_node_limit() -> usize {
    CENTRAL_CONFIG.search.node_limit
}

fn default_expansion_steps() -> u32 {
    CENTRAL_CONFIG.search.expansion_steps
}

fn default_rollouts() -> u32 {
    CENTRAL_CONFIG.search.rollouts
}

fn default_propagation_limit() -> usize {
    CENTRAL_CONFIG.search.propagation_limit
}

fn default_rounds() -> u32 {
    CENTRAL_CONFIG.arena.rounds
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.arena.seed
}

fn default_stats_path() -> Option<String> {
    CENTRAL_CONFIG.arena.stats_path.clone()
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "arena")]
#[command(about = "Play search configurations against each other")]
#[command(
    long_about = "Runs complete matches of a game between search configurations and
tallies the outcomes. Each actor is described by a spec string such as
'sota', 'random', 'plies' or 'limit_type=nodes,limit=500,eval_func=windows'.
A single spec applies to every actor.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// AI spec strings, one per actor in turn order
    pub ai: Vec<String>,

    /// Game to play (tictactoe, tictactoe-sym, connect4, maze, tricks)
    #[arg(long, default_value_t = default_game())]
    pub game: String,

    /// Labyrinth file for the maze game (the built-in level otherwise)
    #[arg(long)]
    pub level: Option<String>,

    /// Number of matches to play
    #[arg(long, default_value_t = default_rounds())]
    pub rounds: u32,

    /// Seed for every search that does not set its own
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Abandon a match after this many joint actions
    #[arg(long, default_value_t = 1000)]
    pub max_moves: u32,

    /// Node cap used by the `sota` preset
    #[arg(long, default_value_t = default_node_limit())]
    pub node_limit: usize,

    /// Plies searched by the `plies` preset
    #[arg(long, default_value_t = default_expansion_steps())]
    pub expansion_steps: u32,

    /// Rollouts per evaluation used by the `sota` preset
    #[arg(long, default_value_t = default_rollouts())]
    pub rollouts: u32,

    /// Resolutions per propagation (0 to disable the cap)
    #[arg(long, default_value_t = default_propagation_limit())]
    pub propagation_limit: usize,

    /// Log a graph analysis after every `sota` search
    #[arg(long)]
    pub analysis: bool,

    /// Write a JSON results snapshot to this path
    #[arg(long)]
    pub stats_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.game.is_empty() {
            return Err(anyhow!("game cannot be empty"));
        }

        self.game.parse::<GameKind>()?;

        if self.rounds == 0 {
            return Err(anyhow!("rounds must be greater than 0"));
        }

        if self.max_moves == 0 {
            return Err(anyhow!("max_moves must be greater than 0"));
        }

        if self.node_limit == 0 {
            return Err(anyhow!("node_limit must be greater than 0"));
        }

        if self.expansion_steps == 0 {
            return Err(anyhow!("expansion_steps must be greater than 0"));
        }

        if self.rollouts == 0 {
            return Err(anyhow!("rollouts must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        for spec in &self.ai {
            self.search_config(spec)?;
        }

        Ok(())
    }

    /// Spec strings to play with; the configured default when none are given.
    pub fn ai_specs(&self) -> Vec<String> {
        if self.ai.is_empty() {
            vec![default_ai()]
        } else {
            self.ai.clone()
        }
    }

    /// Turn a spec string into a search configuration.
    ///
    /// `sota` and `plies` take their limits from this configuration; any
    /// other string is parsed by [`SearchConfig`]. The propagation cap
    /// applies unless the spec string sets its own.
    pub fn search_config(&self, spec: &str) -> Result<SearchConfig> {
        let config = match spec.trim() {
            "sota" => SearchConfig::state_of_the_art()
                .with_expansion(Expansion::NodeLimit(self.node_limit))
                .with_evaluation(Evaluation::Rollout {
                    rollouts: self.rollouts,
                    max_depth: None,
                })
                .with_analysis(self.analysis),
            "plies" => SearchConfig::fixed_plies(self.expansion_steps),
            other => other
                .parse::<SearchConfig>()
                .with_context(|| format!("invalid AI spec '{other}'"))?,
        };

        if spec.contains("propagation_limit") {
            Ok(config)
        } else {
            Ok(config.with_propagation_limit(self.propagation_cap()))
        }
    }

    /// The propagation cap as the search expects it.
    pub fn propagation_cap(&self) -> Option<usize> {
        (self.propagation_limit > 0).then_some(self.propagation_limit)
    }

    /// Where to write results: the CLI flag, then config.toml.
    pub fn stats_path(&self) -> Option<String> {
        self.stats_path.clone().or_else(default_stats_path)
    }
}
