//! Optional per-search counters.
//!
//! Attached through [`crate::SearchBuilder::with_stats`]; when absent the
//! build loop skips all bookkeeping.

use serde::{Deserialize, Serialize};

use crate::resolver::Propagation;

/// Counters collected while building one search graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of searches merged into these stats
    pub searches: u64,
    /// Build loop iterations (one batch each)
    pub iterations: u64,
    /// Nodes expanded
    pub expansions: u64,
    /// Expanded nodes that produced no joint actions
    pub abandoned: u64,
    /// Joint actions generated across all expansions
    pub joint_actions: u64,
    /// New nodes inserted into the store, root included
    pub nodes_discovered: u64,
    /// Successors that were already stored
    pub transpositions: u64,
    /// Evaluator invocations
    pub evaluations: u64,
    /// Node resolutions performed by propagation
    pub resolutions: u64,
    /// Resolutions that changed a value
    pub value_changes: u64,
    /// Propagations stopped by the resolution cap
    pub truncated_propagations: u64,
    /// Wall time spent in the build loop (microseconds)
    pub build_time_us: u64,
}

impl SearchStats {
    /// Fold another search's counters into these.
    pub fn merge(&mut self, other: &SearchStats) {
        self.searches += other.searches;
        self.iterations += other.iterations;
        self.expansions += other.expansions;
        self.abandoned += other.abandoned;
        self.joint_actions += other.joint_actions;
        self.nodes_discovered += other.nodes_discovered;
        self.transpositions += other.transpositions;
        self.evaluations += other.evaluations;
        self.resolutions += other.resolutions;
        self.value_changes += other.value_changes;
        self.truncated_propagations += other.truncated_propagations;
        self.build_time_us += other.build_time_us;
    }

    pub(crate) fn record_propagation(&mut self, report: &Propagation) {
        self.resolutions += report.resolutions as u64;
        self.value_changes += report.changes as u64;
        if report.truncated {
            self.truncated_propagations += 1;
        }
    }

    /// Mean expansions per search.
    pub fn avg_expansions(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.expansions as f64 / self.searches as f64
        }
    }

    /// Mean build time per search in milliseconds.
    pub fn avg_build_ms(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.build_time_us as f64 / self.searches as f64 / 1000.0
        }
    }
}
