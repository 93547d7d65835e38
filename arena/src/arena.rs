//! Match runner.
//!
//! Every decision builds a fresh [`Search`] for the deciding actor from the
//! current state. When several actors decide at once, each searches on its
//! own and the chosen moves are combined into one joint action.

use anyhow::{anyhow, Result};
use engine_core::{Game, JointAction, Outcome};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use search::{Search, SearchConfig};
use tracing::{debug, trace};

use crate::stats::ArenaStats;

/// How a single match ended.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<A> {
    /// `None` when the move cap stopped the match
    pub outcome: Option<Outcome<A>>,
    /// Joint actions played
    pub moves: u32,
}

/// Plays matches of one game between fixed search configurations.
pub struct Arena<'g, G: Game> {
    game: &'g G,
    players: Vec<(G::Actor, SearchConfig)>,
    max_moves: u32,
    rng: ChaCha20Rng,
}

impl<'g, G: Game> Arena<'g, G> {
    /// Pair configurations with the game's actors in turn order.
    ///
    /// A single configuration is shared by every actor; otherwise there must
    /// be exactly one per actor.
    pub fn new(game: &'g G, configs: Vec<SearchConfig>, max_moves: u32, seed: u64) -> Result<Self> {
        let actors = game.actors();
        let players = match configs.len() {
            1 => actors.into_iter().map(|actor| (actor, configs[0].clone())).collect(),
            n if n == actors.len() => actors.into_iter().zip(configs).collect(),
            n => {
                return Err(anyhow!(
                    "expected 1 or {} AI specs for {} actors, got {}",
                    actors.len(),
                    actors.len(),
                    n
                ))
            }
        };

        Ok(Self {
            game,
            players,
            max_moves,
            rng: ChaCha20Rng::seed_from_u64(seed),
        })
    }

    fn config_for(&self, actor: G::Actor) -> Result<&SearchConfig> {
        self.players
            .iter()
            .find(|(a, _)| *a == actor)
            .map(|(_, config)| config)
            .ok_or_else(|| anyhow!("no AI configured for actor {:?}", actor))
    }

    /// Play one match from the initial state.
    pub fn play_match(&mut self, stats: &mut ArenaStats) -> Result<MatchResult<G::Actor>> {
        let mut state = self.game.initial_state();
        let mut moves = 0;

        loop {
            if let Some(outcome) = self.game.outcome(&state) {
                return Ok(MatchResult {
                    outcome: Some(outcome),
                    moves,
                });
            }
            if moves >= self.max_moves {
                debug!(moves, "Move cap reached, abandoning match");
                return Ok(MatchResult {
                    outcome: None,
                    moves,
                });
            }

            let mut joint = JointAction::new();
            for (actor, options) in self.game.legal_moves(&state) {
                let choice = if options.is_empty() {
                    None
                } else {
                    self.decide(&state, actor, &options, stats)?
                };
                joint.set(actor, choice);
            }

            trace!(?joint, "Applying joint action");
            state = self.game.apply(&state, &joint);
            moves += 1;
        }
    }

    /// Search for `actor` and return its move.
    ///
    /// A search that comes back without a move (its root was abandoned)
    /// falls back to a random legal move so the match keeps going.
    fn decide(
        &mut self,
        state: &G::State,
        actor: G::Actor,
        options: &[G::Move],
        stats: &mut ArenaStats,
    ) -> Result<Option<G::Move>> {
        let mut config = self.config_for(actor)?.clone();
        if config.seed.is_none() {
            config.seed = Some(self.rng.gen());
        }

        let mut search = Search::builder(self.game, config)
            .with_stats()
            .build(state.clone(), actor)?;
        let decision = search.run()?;
        if let Some(search_stats) = search.stats() {
            stats.record_search(actor, search_stats);
        }

        match decision.first_move(actor) {
            Some(choice) => Ok(Some(choice.clone())),
            None => {
                debug!(?actor, value = search.root_value(), "No move found, playing at random");
                Ok(options.choose(&mut self.rng).cloned())
            }
        }
    }

    /// Play `rounds` matches, reporting each finished one to `on_match`.
    pub fn run(
        &mut self,
        rounds: u32,
        stats: &mut ArenaStats,
        mut on_match: impl FnMut(u32, &MatchResult<G::Actor>),
    ) -> Result<()> {
        for round in 0..rounds {
            let result = self.play_match(stats)?;
            stats.record_match(result.outcome.as_ref(), result.moves);
            on_match(round, &result);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::UNFINISHED;
    use engine_core::game_utils::Player;
    use games_maze::Maze;
    use games_tictactoe::TicTacToe;
    use games_tricks::Tricks;

    fn config(spec: &str) -> SearchConfig {
        spec.parse().unwrap()
    }

    #[test]
    fn test_spec_count_must_match_actors() {
        let game = Tricks::new();
        let err = Arena::new(&game, vec![config("random"), config("random")], 10, 0)
            .err()
            .unwrap();
        assert!(err.to_string().contains("expected 1 or 3 AI specs"));

        assert!(Arena::new(&game, vec![config("random")], 10, 0).is_ok());
        assert!(Arena::new(&game, vec![config("random"); 3], 10, 0).is_ok());
    }

    #[test]
    fn test_perfect_play_draws() {
        let game = TicTacToe::with_symmetry();
        let mut stats = ArenaStats::new("tictactoe-sym", vec![]);
        let mut arena = Arena::new(&game, vec![config("limit_type=none")], 20, 1).unwrap();

        let result = arena.play_match(&mut stats).unwrap();
        assert_eq!(result.outcome, Some(Outcome::Draw));
        assert_eq!(result.moves, 9);

        let first = stats.search_stats("First").unwrap();
        let second = stats.search_stats("Second").unwrap();
        assert_eq!(first.searches, 5);
        assert_eq!(second.searches, 4);
    }

    #[test]
    fn test_search_never_loses_to_random() {
        let game = TicTacToe::new();
        let mut stats = ArenaStats::new("tictactoe", vec![]);
        let mut arena = Arena::new(
            &game,
            vec![config("limit_type=none"), config("random")],
            20,
            7,
        )
        .unwrap();

        arena.run(4, &mut stats, |_, _| {}).unwrap();
        assert_eq!(stats.matches(), 4);
        assert_eq!(stats.count("Second"), 0);
        assert_eq!(stats.count("First") + stats.count("draw"), 4);
    }

    #[test]
    fn test_simultaneous_tricks_match() {
        let game = Tricks::new();
        let mut stats = ArenaStats::new("tricks", vec![]);
        let mut arena = Arena::new(&game, vec![config("random")], 10, 3).unwrap();

        let result = arena.play_match(&mut stats).unwrap();
        assert!(result.outcome.is_some());
        assert_eq!(result.moves, 3);

        // every seat decides every round
        for seat in ["1", "2", "3"] {
            assert_eq!(stats.search_stats(seat).unwrap().searches, 3);
        }
    }

    #[test]
    fn test_move_cap_abandons_match() {
        let game = Maze::classic().unwrap();
        let mut stats = ArenaStats::new("maze", vec![]);
        let mut arena = Arena::new(&game, vec![config("random")], 3, 0).unwrap();

        arena.run(2, &mut stats, |_, result| assert_eq!(result.moves, 3)).unwrap();
        assert_eq!(stats.count(UNFINISHED), 2);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let game = TicTacToe::new();
        let play = || {
            let mut stats = ArenaStats::new("tictactoe", vec![]);
            let mut arena = Arena::new(&game, vec![config("random")], 20, 11).unwrap();
            let mut results: Vec<MatchResult<Player>> = Vec::new();
            arena
                .run(5, &mut stats, |_, result| results.push(result.clone()))
                .unwrap();
            results
        };

        assert_eq!(play(), play());
    }
}
