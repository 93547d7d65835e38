//! Arena - tournament driver for the game-tree search engine
//!
//! Plays complete matches of one game between search configurations:
//! 1. Resolves one AI spec string per actor (or one shared by all)
//! 2. Builds a fresh search for every decision
//! 3. Tallies outcomes and merges per-actor search statistics
//! 4. Optionally writes a JSON snapshot of the results

use anyhow::{Context, Result};
use clap::Parser;
use engine_core::Game;
use games_connect4::Connect4;
use games_maze::Maze;
use games_tictactoe::TicTacToe;
use games_tricks::Tricks;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

mod arena;
mod config;
mod games;
mod stats;

use crate::arena::Arena;
use crate::config::Config;
use crate::games::GameKind;
use crate::stats::{outcome_label, ArenaStats};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn load_maze(level: Option<&str>) -> Result<Maze> {
    match level {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read level file {path}"))?;
            text.parse()
                .with_context(|| format!("failed to parse level file {path}"))
        }
        None => Ok(Maze::classic()?),
    }
}

/// Play the configured tournament on `game`.
fn play<G: Game>(game: &G, config: &Config) -> Result<()> {
    let specs = config.ai_specs();
    let configs = specs
        .iter()
        .map(|spec| config.search_config(spec))
        .collect::<Result<Vec<_>>>()?;

    let mut arena = Arena::new(game, configs, config.max_moves, config.seed)?;
    let mut stats = ArenaStats::new(&config.game, specs.clone());

    info!(
        game = %config.game,
        rounds = config.rounds,
        specs = ?specs,
        "Arena starting"
    );

    // Progress bar only when stderr is a TTY
    let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        let pb = ProgressBar::new(config.rounds as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} matches ({eta})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    arena.run(config.rounds, &mut stats, |round, result| {
        info!(
            round = round + 1,
            moves = result.moves,
            outcome = %outcome_label(result.outcome.as_ref()),
            "Match finished"
        );
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    })?;

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    stats.log_summary();
    if let Some(path) = config.stats_path() {
        if stats.write_stats(&path) {
            info!(path = %path, "Results written");
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let kind: GameKind = config.game.parse()?;
    if config.level.is_some() && kind != GameKind::Maze {
        warn!(game = %kind, "--level only applies to the maze game, ignoring it");
    }

    match kind {
        GameKind::TicTacToe => play(&TicTacToe::new(), &config),
        GameKind::TicTacToeSymmetric => play(&TicTacToe::with_symmetry(), &config),
        GameKind::Connect4 => play(&Connect4::new(), &config),
        GameKind::Maze => play(&load_maze(config.level.as_deref())?, &config),
        GameKind::Tricks => play(&Tricks::new(), &config),
    }
}
