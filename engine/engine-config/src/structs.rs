//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_game() -> String {
    defaults::game().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_default_ai() -> String {
    defaults::default_ai().into()
}
fn d_node_limit() -> usize {
    defaults::node_limit()
}
fn d_expansion_steps() -> u32 {
    defaults::expansion_steps()
}
fn d_rollouts() -> u32 {
    defaults::rollouts()
}
fn d_propagation_limit() -> usize {
    defaults::propagation_limit()
}
fn d_rounds() -> u32 {
    defaults::rounds()
}
fn d_seed() -> u64 {
    defaults::seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_game")]
    pub game: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            game: defaults::game().into(),
            log_level: defaults::log_level().into(),
        }
    }
}

/// Defaults applied to every search the driver constructs
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchSettings {
    /// Spec string for actors without their own
    #[serde(default = "d_default_ai")]
    pub default_ai: String,
    #[serde(default = "d_node_limit")]
    pub node_limit: usize,
    #[serde(default = "d_expansion_steps")]
    pub expansion_steps: u32,
    #[serde(default = "d_rollouts")]
    pub rollouts: u32,
    /// Resolutions per propagation; 0 disables the cap
    #[serde(default = "d_propagation_limit")]
    pub propagation_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_ai: defaults::default_ai().into(),
            node_limit: defaults::node_limit(),
            expansion_steps: defaults::expansion_steps(),
            rollouts: defaults::rollouts(),
            propagation_limit: defaults::propagation_limit(),
        }
    }
}

impl SearchSettings {
    /// The propagation cap as the search expects it.
    pub fn propagation_cap(&self) -> Option<usize> {
        (self.propagation_limit > 0).then_some(self.propagation_limit)
    }
}

/// Tournament driver configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_rounds")]
    pub rounds: u32,
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Where to write the JSON results, if anywhere
    #[serde(default)]
    pub stats_path: Option<String>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            rounds: defaults::rounds(),
            seed: defaults::seed(),
            stats_path: None,
        }
    }
}
