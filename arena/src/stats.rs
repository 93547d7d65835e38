//! Tournament statistics.
//!
//! Collects match outcomes and per-actor search counters, and writes them as
//! a JSON snapshot for inspection after the run.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::time::Instant;

use engine_core::Outcome;
use search::SearchStats;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Tally key for matches stopped by the move cap.
pub const UNFINISHED: &str = "unfinished";

/// Running totals for one tournament.
#[derive(Debug)]
pub struct ArenaStats {
    game: String,
    specs: Vec<String>,
    matches: u64,
    total_moves: u64,
    outcomes: BTreeMap<String, u64>,
    searches: BTreeMap<String, SearchStats>,
    start_time: Instant,
}

/// Serializable snapshot of [`ArenaStats`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaStatsSnapshot {
    pub game: String,
    pub specs: Vec<String>,
    pub matches: u64,
    pub total_moves: u64,
    pub avg_match_length: f64,
    /// Matches per outcome label (winner, `draw`, or `unfinished`)
    pub outcomes: BTreeMap<String, u64>,
    /// Merged search counters per actor
    pub searches: BTreeMap<String, SearchStats>,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

/// Label under which an outcome is tallied.
pub fn outcome_label<A: Debug>(outcome: Option<&Outcome<A>>) -> String {
    match outcome {
        Some(Outcome::Winner(actor)) => format!("{actor:?}"),
        Some(Outcome::Winners(actors)) => actors
            .iter()
            .map(|actor| format!("{actor:?}"))
            .collect::<Vec<_>>()
            .join("+"),
        Some(Outcome::Draw) => "draw".to_string(),
        None => UNFINISHED.to_string(),
    }
}

impl ArenaStats {
    pub fn new(game: &str, specs: Vec<String>) -> Self {
        Self {
            game: game.to_string(),
            specs,
            matches: 0,
            total_moves: 0,
            outcomes: BTreeMap::new(),
            searches: BTreeMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Record a finished (or abandoned) match.
    pub fn record_match<A: Debug>(&mut self, outcome: Option<&Outcome<A>>, moves: u32) {
        self.matches += 1;
        self.total_moves += moves as u64;
        *self.outcomes.entry(outcome_label(outcome)).or_default() += 1;
    }

    /// Fold one search's counters into `actor`'s totals.
    pub fn record_search<A: Debug>(&mut self, actor: A, stats: &SearchStats) {
        self.searches
            .entry(format!("{actor:?}"))
            .or_default()
            .merge(stats);
    }

    pub fn matches(&self) -> u64 {
        self.matches
    }

    /// Matches tallied under `label`.
    pub fn count(&self, label: &str) -> u64 {
        self.outcomes.get(label).copied().unwrap_or(0)
    }

    pub fn search_stats(&self, actor: &str) -> Option<&SearchStats> {
        self.searches.get(actor)
    }

    pub fn snapshot(&self) -> ArenaStatsSnapshot {
        let runtime = self.start_time.elapsed().as_secs_f64();
        let avg_match_length = if self.matches > 0 {
            self.total_moves as f64 / self.matches as f64
        } else {
            0.0
        };

        ArenaStatsSnapshot {
            game: self.game.clone(),
            specs: self.specs.clone(),
            matches: self.matches,
            total_moves: self.total_moves,
            avg_match_length,
            outcomes: self.outcomes.clone(),
            searches: self.searches.clone(),
            runtime_seconds: runtime,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Log the tally and per-actor search summary.
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            game = %snapshot.game,
            matches = snapshot.matches,
            avg_match_length = format!("{:.1}", snapshot.avg_match_length),
            runtime_secs = format!("{:.2}", snapshot.runtime_seconds),
            "Tournament finished"
        );

        for (label, count) in &snapshot.outcomes {
            info!(outcome = %label, count, "Outcome");
        }

        for (actor, stats) in &snapshot.searches {
            info!(
                actor = %actor,
                searches = stats.searches,
                avg_expansions = format!("{:.1}", stats.avg_expansions()),
                avg_build_ms = format!("{:.2}", stats.avg_build_ms()),
                transpositions = stats.transpositions,
                truncated = stats.truncated_propagations,
                "Search totals"
            );
        }
    }

    /// Write stats to JSON file (atomic write-then-rename).
    ///
    /// Failures are logged; returns whether the file was written.
    pub fn write_stats(&self, path: &str) -> bool {
        let snapshot = self.snapshot();

        let json = match serde_json::to_string_pretty(&snapshot) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize arena stats: {}", e);
                return false;
            }
        };

        let temp_path = format!("{}.tmp", path);
        match fs::File::create(&temp_path) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(json.as_bytes()) {
                    warn!("Failed to write arena stats: {}", e);
                    return false;
                }
            }
            Err(e) => {
                warn!("Failed to create temp stats file: {}", e);
                return false;
            }
        }

        if let Err(e) = fs::rename(&temp_path, path) {
            warn!("Failed to rename stats file: {}", e);
            let _ = fs::remove_file(&temp_path);
            return false;
        }

        debug!("Wrote arena stats to {}", path);
        true
    }
}
