//! State evaluation and aggregation.
//!
//! Evaluation is two-step. An [`Evaluator`] produces a raw value per actor
//! for a newly discovered state; [`Aggregation`] then collapses that
//! valuation into the single scalar the search optimizes for one actor.

use engine_core::{neutral_valuation, Game, Heuristic, JointAction, Valuation, Value};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::config::Aggregation;

/// Trait for state evaluators.
///
/// Implementations:
/// - OutcomeEvaluator: win/lose/draw classification
/// - HeuristicEvaluator: named game-specific heuristic
/// - RolloutEvaluator: random playouts to a terminal state
pub trait Evaluator<G: Game> {
    /// Raw per-actor valuation of `state`.
    fn evaluate(&self, game: &G, state: &G::State, rng: &mut ChaCha20Rng) -> Valuation<G::Actor>;
}

/// Classifies terminal states as `+inf` for winners, `-inf` for everybody
/// else and `0` for a draw. Running states are neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeEvaluator;

impl<G: Game> Evaluator<G> for OutcomeEvaluator {
    fn evaluate(&self, game: &G, state: &G::State, _rng: &mut ChaCha20Rng) -> Valuation<G::Actor> {
        let actors = game.actors();
        match game.outcome(state) {
            Some(outcome) => outcome.valuation(&actors),
            None => neutral_valuation(&actors),
        }
    }
}

/// Evaluates running states with a named heuristic. Terminal states are
/// classified by their outcome so a decided game always dominates.
pub struct HeuristicEvaluator<G: Game> {
    heuristic: Heuristic<G>,
}

impl<G: Game> HeuristicEvaluator<G> {
    pub fn new(heuristic: Heuristic<G>) -> Self {
        Self { heuristic }
    }
}

impl<G: Game> Evaluator<G> for HeuristicEvaluator<G> {
    fn evaluate(&self, game: &G, state: &G::State, _rng: &mut ChaCha20Rng) -> Valuation<G::Actor> {
        match game.outcome(state) {
            Some(outcome) => outcome.valuation(&game.actors()),
            None => (self.heuristic)(game, state),
        }
    }
}

/// Random rollout evaluator: plays uniformly random joint actions until the
/// game ends and tallies wins per actor.
#[derive(Debug, Clone)]
pub struct RolloutEvaluator {
    /// Playouts per evaluated state
    pub rollouts: u32,

    /// Optional bound on playout length; a playout cut short tallies no win.
    pub max_depth: Option<u32>,
}

impl Default for RolloutEvaluator {
    fn default() -> Self {
        Self {
            rollouts: 1,
            max_depth: None,
        }
    }
}

impl RolloutEvaluator {
    pub fn new(rollouts: u32, max_depth: Option<u32>) -> Self {
        Self {
            rollouts,
            max_depth,
        }
    }

    fn playout<G: Game>(
        &self,
        game: &G,
        state: &G::State,
        rng: &mut ChaCha20Rng,
        tally: &mut Valuation<G::Actor>,
    ) {
        let mut current = state.clone();
        let mut depth = 0u32;

        loop {
            if let Some(outcome) = game.outcome(&current) {
                for (actor, wins) in tally.iter_mut() {
                    if outcome.is_won_by(*actor) {
                        *wins += 1.0;
                    }
                }
                return;
            }
            if self.max_depth.is_some_and(|max| depth >= max) {
                return;
            }

            let action: JointAction<G::Actor, G::Move> = game
                .legal_moves(&current)
                .into_iter()
                .map(|(actor, moves)| (actor, moves.choose(rng).cloned()))
                .collect();
            current = game.apply(&current, &action);
            depth += 1;
        }
    }
}

impl<G: Game> Evaluator<G> for RolloutEvaluator {
    fn evaluate(&self, game: &G, state: &G::State, rng: &mut ChaCha20Rng) -> Valuation<G::Actor> {
        let actors = game.actors();
        if let Some(outcome) = game.outcome(state) {
            return outcome.valuation(&actors);
        }

        let mut tally = neutral_valuation(&actors);
        for _ in 0..self.rollouts {
            self.playout(game, state, rng, &mut tally);
        }
        tally
    }
}

impl Aggregation {
    /// Collapse a per-actor valuation into `actor`'s scalar.
    ///
    /// An infinite own value (decided win or loss) is returned unchanged.
    /// Missing entries count as zero.
    pub fn aggregate<A: Copy + Ord>(&self, valuation: &Valuation<A>, actor: A) -> Value {
        let own = valuation.get(&actor).copied().unwrap_or(0.0);
        if own.is_infinite() {
            return own;
        }

        let others = valuation
            .iter()
            .filter(|(other, _)| **other != actor)
            .map(|(_, value)| *value);

        let value = match self {
            Aggregation::ZeroSum => own - others.sum::<Value>(),
            Aggregation::LeaderRelative => match others.reduce(Value::max) {
                Some(best) => own - best,
                None => own,
            },
        };

        if value.is_nan() {
            0.0
        } else {
            value
        }
    }
}
