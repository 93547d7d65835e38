//! Search driver.
//!
//! Implements the build loop:
//! 1. Scheduling: take the next pending node(s) from the expansion queue
//! 2. Expansion: generate joint actions and apply them through the game
//! 3. Evaluation: value every newly discovered successor exactly once
//! 4. Resolution: resolve the expanded node and propagate changes backward

use std::time::Instant;

use engine_core::{Game, Priority, Value};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::actions::ActionGenerator;
use crate::config::{
    Aggregation, ConfigError, Evaluation, Expansion, Frontier, Generation, SearchConfig,
    Selection,
};
use crate::evaluator::{Evaluator, HeuristicEvaluator, OutcomeEvaluator, RolloutEvaluator};
use crate::metrics::SearchStats;
use crate::node::{NodeId, Opinion};
use crate::resolver;
use crate::schedule::ExpansionQueue;
use crate::selector::{self, Path};
use crate::store::TranspositionStore;

/// Errors that can occur while setting up or running a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown heuristic '{name}' (available: {available})")]
    UnknownHeuristic { name: String, available: String },

    #[error("Unknown portfolio '{name}' (available: {available})")]
    UnknownPortfolio { name: String, available: String },

    #[error("Unknown priority '{name}' (available: {available})")]
    UnknownPriority { name: String, available: String },

    #[error("Root has no opinion; nothing was expanded")]
    Unresolved,
}

fn available(names: &[&str]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<A: Ord, M> {
    /// The chosen move for the searching actor; `None` is a pass.
    Move(Option<M>),
    /// Every optimal action sequence from the root.
    Paths(Vec<Path<A, M>>),
}

impl<A: Ord, M> Decision<A, M> {
    /// The first move of the decision, whatever its shape.
    pub fn first_move(&self, actor: A) -> Option<&M>
    where
        A: Copy,
    {
        match self {
            Decision::Move(choice) => choice.as_ref(),
            Decision::Paths(paths) => paths
                .first()
                .and_then(|path| path.actions.first())
                .and_then(|action| action.get(actor)),
        }
    }
}

/// Assembles a [`Search`] from a configuration, resolving every named
/// strategy up front so that a bad name fails at construction.
pub struct SearchBuilder<'g, G: Game> {
    game: &'g G,
    config: SearchConfig,
    evaluator: Option<Box<dyn Evaluator<G> + 'g>>,
    rng: Option<ChaCha20Rng>,
    stats: bool,
}

impl<'g, G: Game> SearchBuilder<'g, G> {
    /// Replace the configured evaluator.
    pub fn evaluator(mut self, evaluator: impl Evaluator<G> + 'g) -> Self {
        self.evaluator = Some(Box::new(evaluator));
        self
    }

    /// Use this random generator instead of one derived from the seed.
    pub fn rng(mut self, rng: ChaCha20Rng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Attach a [`SearchStats`] collector.
    pub fn with_stats(mut self) -> Self {
        self.stats = true;
        self
    }

    /// Create the search for `actor`, starting at `state`.
    ///
    /// The root is inserted and evaluated immediately; no expansion happens
    /// until [`Search::build`] or [`Search::run`].
    pub fn build(self, state: G::State, actor: G::Actor) -> Result<Search<'g, G>, SearchError> {
        let game = self.game;
        self.config.validate()?;

        let generator = match &self.config.generation {
            Generation::Full => ActionGenerator::Full,
            Generation::Portfolio(name) => ActionGenerator::Portfolio(
                game.portfolio(name)
                    .ok_or_else(|| SearchError::UnknownPortfolio {
                        name: name.clone(),
                        available: available(game.portfolio_names()),
                    })?,
            ),
        };

        let evaluator: Box<dyn Evaluator<G> + 'g> = match self.evaluator {
            Some(evaluator) => evaluator,
            None => match &self.config.evaluation {
                Evaluation::Outcome => Box::new(OutcomeEvaluator),
                Evaluation::Heuristic(name) => Box::new(HeuristicEvaluator::new(
                    game.heuristic(name)
                        .ok_or_else(|| SearchError::UnknownHeuristic {
                            name: name.clone(),
                            available: available(game.heuristic_names()),
                        })?,
                )),
                Evaluation::Rollout {
                    rollouts,
                    max_depth,
                } => Box::new(RolloutEvaluator::new(*rollouts, *max_depth)),
            },
        };

        let priority = match &self.config.frontier {
            Frontier::Priority(name) => Some(game.priority(name).ok_or_else(|| {
                SearchError::UnknownPriority {
                    name: name.clone(),
                    available: available(game.priority_names()),
                }
            })?),
            _ => None,
        };

        let rng = match (self.rng, self.config.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => ChaCha20Rng::seed_from_u64(seed),
            (None, None) => ChaCha20Rng::from_entropy(),
        };

        let mut search = Search {
            game,
            actor,
            aggregation: self.config.aggregation,
            queue: ExpansionQueue::new(&self.config.frontier),
            store: TranspositionStore::new(game, state),
            generator,
            evaluator,
            priority,
            rng,
            stats: self.stats.then(SearchStats::default),
            config: self.config,
        };

        let root = search.store.root();
        search.discover(root);
        if let Some(stats) = &mut search.stats {
            stats.searches = 1;
        }

        Ok(search)
    }
}

/// Graph search for one actor from one state.
///
/// Each search owns its transposition store; nothing is shared between
/// searches.
pub struct Search<'g, G: Game> {
    game: &'g G,
    actor: G::Actor,
    config: SearchConfig,
    aggregation: Aggregation,
    store: TranspositionStore<G>,
    queue: ExpansionQueue,
    generator: ActionGenerator<G>,
    evaluator: Box<dyn Evaluator<G> + 'g>,
    priority: Option<Priority<G>>,
    rng: ChaCha20Rng,
    stats: Option<SearchStats>,
}

impl<'g, G: Game> Search<'g, G> {
    /// Start configuring a search over `game`.
    pub fn builder(game: &'g G, config: SearchConfig) -> SearchBuilder<'g, G> {
        SearchBuilder {
            game,
            config,
            evaluator: None,
            rng: None,
            stats: false,
        }
    }

    /// Create a search with the configured strategies.
    pub fn new(
        game: &'g G,
        config: SearchConfig,
        state: G::State,
        actor: G::Actor,
    ) -> Result<Self, SearchError> {
        Self::builder(game, config).build(state, actor)
    }

    /// Evaluate a newly inserted node and enqueue it unless terminal.
    fn discover(&mut self, id: NodeId) {
        let node = self.store.get(id);
        let valuation = self.evaluator.evaluate(self.game, &node.state, &mut self.rng);
        let value = self.aggregation.aggregate(&valuation, self.actor);
        let terminal = node.terminal;

        if !terminal {
            let priority = self.priority.map_or(0.0, |p| p(self.game, &node.state));
            self.queue.push(id, priority);
        }
        self.store.set_value(id, value);

        if let Some(stats) = &mut self.stats {
            stats.nodes_discovered += 1;
            stats.evaluations += 1;
        }
    }

    /// Expand one node: insert its successors, then resolve it.
    fn expand(&mut self, id: NodeId) {
        let node = self.store.get(id);
        if node.terminal {
            return;
        }

        let state = node.state.clone();
        let actions = self.generator.generate(self.game, &state);
        let generated = actions.len() as u64;
        let mut transpositions = 0u64;

        for action in actions {
            let successor = self.game.apply(&state, &action);
            let (child, is_new) = self.store.insert_if_absent(self.game, successor);
            if is_new {
                self.discover(child);
            } else {
                transpositions += 1;
            }
            self.store.record_edge(id, action, child);
        }
        self.store.mark_expanded(id);

        let report =
            resolver::propagate(&mut self.store, id, self.actor, self.config.propagation_limit);
        trace!(
            node = id.0,
            actions = generated,
            resolutions = report.resolutions,
            value = self.store.get(id).value,
            "Expanded node"
        );

        if let Some(stats) = &mut self.stats {
            stats.expansions += 1;
            stats.joint_actions += generated;
            stats.transpositions += transpositions;
            if generated == 0 {
                stats.abandoned += 1;
            }
            stats.record_propagation(&report);
        }
    }

    /// Run one build iteration. Returns `false` when nothing was pending.
    pub fn step(&mut self) -> bool {
        let batch = self.queue.next_batch();
        if batch.is_empty() {
            return false;
        }

        if batch.len() > 1 {
            debug!(batch = batch.len(), stored = self.store.len(), "Expanding batch");
        }
        for id in batch {
            self.expand(id);
        }

        if let Some(stats) = &mut self.stats {
            stats.iterations += 1;
        }
        true
    }

    /// Grow the graph until the configured stopping policy is met.
    ///
    /// A node limit is checked after each iteration, so one iteration always
    /// runs and the store may overshoot the limit by one iteration's worth of
    /// successors.
    pub fn build(&mut self) {
        let started = Instant::now();

        match self.config.expansion {
            Expansion::Disabled => {}
            Expansion::Exhaustive => while self.step() {},
            Expansion::NodeLimit(limit) => while self.step() && self.store.len() < limit {},
            Expansion::StepLimit(steps) => {
                for _ in 0..steps {
                    if !self.step() {
                        break;
                    }
                }
            }
        }

        let elapsed = started.elapsed();
        if let Some(stats) = &mut self.stats {
            stats.build_time_us += elapsed.as_micros() as u64;
        }
        debug!(
            nodes = self.store.len(),
            pending = self.queue.len(),
            root_value = self.root_value(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Search graph built"
        );

        if self.config.analysis {
            self.analyze();
        }
    }

    /// Build the graph, then select according to the configuration.
    pub fn run(&mut self) -> Result<Decision<G::Actor, G::Move>, SearchError> {
        self.build();

        match self.config.selection {
            Selection::BestMove => selector::best_move(&self.store, &mut self.rng).map(Decision::Move),
            Selection::Random => {
                let root = &self.store.get(self.store.root()).state;
                Ok(Decision::Move(selector::random_move(
                    self.game,
                    root,
                    self.actor,
                    &mut self.rng,
                )))
            }
            Selection::BestPaths => Ok(Decision::Paths(selector::best_paths(&self.store))),
        }
    }

    /// Log the root's opinion and the shape of the graph.
    pub fn analyze(&self) {
        let root = self.store.get(self.store.root());
        let profile = self.store.depth_profile();

        info!(
            actor = ?self.actor,
            root_value = root.value,
            best_actions = ?root.opinion.as_ref().map(|o| &o.actions),
            nodes = self.store.len(),
            edges = self.store.edge_count(),
            "Search analysis"
        );
        for (depth, count) in profile.iter().enumerate() {
            info!(depth, nodes = count, "Depth level");
        }
    }

    /// Current value of the root: its raw evaluation until expanded, its
    /// resolved value afterwards.
    pub fn root_value(&self) -> Value {
        self.store.get(self.store.root()).value
    }

    /// The root's current opinion, if it has been expanded.
    pub fn root_opinion(&self) -> Option<&Opinion<G::Move>> {
        self.store.get(self.store.root()).opinion.as_ref()
    }

    /// Get the transposition store (for inspection/debugging).
    pub fn store(&self) -> &TranspositionStore<G> {
        &self.store
    }

    pub fn stats(&self) -> Option<&SearchStats> {
        self.stats.as_ref()
    }

    pub fn actor(&self) -> G::Actor {
        self.actor
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

/// Convenience function to run a single search.
pub fn run_search<G: Game>(
    game: &G,
    config: SearchConfig,
    state: G::State,
    actor: G::Actor,
) -> Result<Decision<G::Actor, G::Move>, SearchError> {
    let mut search = Search::new(game, config, state, actor)?;
    search.run()
}
