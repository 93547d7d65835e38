//! Search configuration: one enumerated choice per strategy axis.
//!
//! A [`SearchConfig`] can be built in code through presets and `with_*`
//! builder methods, or parsed from the compact spec strings used by the
//! arena driver (`"sota"`, `"limit_type=plies,limit=3,eval_func=lines"`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default node ceiling for the `nodes` limit type and the `sota` preset.
pub const DEFAULT_NODE_LIMIT: usize = 10_000;

/// Default number of batch iterations for the `plies` limit type.
pub const DEFAULT_PLIES: u32 = 2;

/// Default cap on resolutions performed by a single propagation.
pub const DEFAULT_PROPAGATION_LIMIT: usize = 100_000;

/// Errors raised while parsing or validating a search configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown spec key '{0}'")]
    UnknownKey(String),

    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("'{0}' requires a value")]
    MissingValue(String),

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error("Step-limited expansion requires the batch frontier")]
    StepLimitNeedsBatch,

    #[error("Selection '{0}' needs an expanded graph, but expansion is disabled")]
    SelectionNeedsExpansion(&'static str),
}

/// When the build loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// No expansion at all; only the root's raw valuation is available.
    Disabled,
    /// Run until the expansion queue is empty.
    Exhaustive,
    /// Stop once the store holds at least this many nodes.
    NodeLimit(usize),
    /// Perform this many batch iterations.
    StepLimit(u32),
}

/// Order in which pending nodes are expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frontier {
    /// One node per iteration, oldest first (breadth-first).
    Fifo,
    /// One node per iteration, newest first (depth-first).
    Lifo,
    /// The whole queue per iteration.
    Batch,
    /// One node per iteration, highest named priority first.
    Priority(String),
}

/// How joint actions are produced for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Cartesian product of every actor's legal moves.
    Full,
    /// Product of moves surviving the named portfolio filter.
    Portfolio(String),
}

/// Source of per-actor raw valuations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Win/lose/draw classifier; running states are neutral.
    Outcome,
    /// Named game-specific heuristic.
    Heuristic(String),
    /// Random playouts tallying wins per actor.
    Rollout { rollouts: u32, max_depth: Option<u32> },
}

/// How a per-actor valuation collapses into the scalar the search optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Own value minus the sum of everybody else's.
    ZeroSum,
    /// Own value minus the best opponent's.
    LeaderRelative,
}

/// What [`crate::Search::run`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// One of the root's best moves, chosen uniformly.
    BestMove,
    /// A uniformly random legal move; the graph is ignored.
    Random,
    /// Every optimal action sequence from the root to a terminal state.
    BestPaths,
}

impl Selection {
    pub fn name(self) -> &'static str {
        match self {
            Selection::BestMove => "best",
            Selection::Random => "random",
            Selection::BestPaths => "paths",
        }
    }
}

/// Configuration for a single search invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub expansion: Expansion,
    pub frontier: Frontier,
    pub generation: Generation,
    pub evaluation: Evaluation,
    pub aggregation: Aggregation,
    pub selection: Selection,

    /// Seed for tie-breaking and rollouts. `None` draws from entropy.
    pub seed: Option<u64>,

    /// Cap on resolutions per propagation. `None` disables the cap.
    pub propagation_limit: Option<usize>,

    /// Log a graph analysis after each build.
    pub analysis: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            expansion: Expansion::Exhaustive,
            frontier: Frontier::Fifo,
            generation: Generation::Full,
            evaluation: Evaluation::Outcome,
            aggregation: Aggregation::ZeroSum,
            selection: Selection::BestMove,
            seed: None,
            propagation_limit: Some(DEFAULT_PROPAGATION_LIMIT),
            analysis: false,
        }
    }
}

impl SearchConfig {
    /// Node-capped breadth-first search with single-rollout evaluation.
    pub fn state_of_the_art() -> Self {
        Self {
            expansion: Expansion::NodeLimit(DEFAULT_NODE_LIMIT),
            evaluation: Evaluation::Rollout {
                rollouts: 1,
                max_depth: None,
            },
            analysis: true,
            ..Self::default()
        }
    }

    /// Fixed number of full-width plies, judged by outcome only.
    pub fn fixed_plies(plies: u32) -> Self {
        Self {
            expansion: Expansion::StepLimit(plies),
            frontier: Frontier::Batch,
            ..Self::default()
        }
    }

    /// Uniformly random legal moves without any search.
    pub fn random() -> Self {
        Self {
            expansion: Expansion::Disabled,
            selection: Selection::Random,
            ..Self::default()
        }
    }

    /// Builder pattern: set the stopping policy.
    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Builder pattern: set the queue discipline.
    pub fn with_frontier(mut self, frontier: Frontier) -> Self {
        self.frontier = frontier;
        self
    }

    /// Builder pattern: set the action generation strategy.
    pub fn with_generation(mut self, generation: Generation) -> Self {
        self.generation = generation;
        self
    }

    /// Builder pattern: set the evaluation source.
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Builder pattern: set the aggregation.
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Builder pattern: set the selection.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Builder pattern: fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder pattern: set the propagation cap.
    pub fn with_propagation_limit(mut self, limit: Option<usize>) -> Self {
        self.propagation_limit = limit;
        self
    }

    /// Builder pattern: toggle post-build analysis.
    pub fn with_analysis(mut self, analysis: bool) -> Self {
        self.analysis = analysis;
        self
    }

    /// Reject incompatible strategy combinations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.expansion {
            Expansion::NodeLimit(0) => return Err(ConfigError::NotPositive("node limit")),
            Expansion::StepLimit(0) => return Err(ConfigError::NotPositive("step limit")),
            Expansion::StepLimit(_) if self.frontier != Frontier::Batch => {
                return Err(ConfigError::StepLimitNeedsBatch)
            }
            Expansion::Disabled if self.selection != Selection::Random => {
                return Err(ConfigError::SelectionNeedsExpansion(self.selection.name()))
            }
            _ => {}
        }

        if let Evaluation::Rollout {
            rollouts,
            max_depth,
        } = self.evaluation
        {
            if rollouts == 0 {
                return Err(ConfigError::NotPositive("rollouts"));
            }
            if max_depth == Some(0) {
                return Err(ConfigError::NotPositive("rollout depth"));
            }
        }

        if self.propagation_limit == Some(0) {
            return Err(ConfigError::NotPositive("propagation limit"));
        }

        Ok(())
    }
}

fn required<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingValue(key.to_string())),
    }
}

fn number<T: FromStr>(key: &str, value: Option<&str>) -> Result<T, ConfigError> {
    let raw = required(key, value)?;
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

impl FromStr for SearchConfig {
    type Err = ConfigError;

    /// Parse a spec string.
    ///
    /// `sota` and `random` name presets. Anything else is a comma-separated
    /// list of `key=value` items and bare flags applied on top of the
    /// default configuration.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        match spec.trim() {
            "sota" => return Ok(Self::state_of_the_art()),
            "random" => return Ok(Self::random()),
            _ => {}
        }

        let mut config = Self::default();
        let mut limit_type: Option<&str> = None;
        let mut limit: Option<usize> = None;
        let mut frontier: Option<Frontier> = None;
        let mut selection: Option<Selection> = None;
        let mut eval_kind: Option<&str> = None;
        let mut eval_func: Option<String> = None;
        let mut rollouts: u32 = 1;
        let mut rollout_depth: Option<u32> = None;

        for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = match item.split_once('=') {
                Some((k, v)) => (k.trim(), Some(v.trim())),
                None => (item, None),
            };

            match key {
                "limit_type" => limit_type = Some(required(key, value)?),
                "limit" => limit = Some(number(key, value)?),
                "select_action" => {
                    selection = Some(match required(key, value)? {
                        "best" => Selection::BestMove,
                        "random" => Selection::Random,
                        "paths" => Selection::BestPaths,
                        other => return Err(invalid(key, other)),
                    })
                }
                "eval" => eval_kind = Some(required(key, value)?),
                "eval_func" => eval_func = Some(required(key, value)?.to_string()),
                "rollouts" => rollouts = number(key, value)?,
                "rollout_depth" => rollout_depth = Some(number(key, value)?),
                "aggregate" => {
                    config.aggregation = match required(key, value)? {
                        "zero_sum" => Aggregation::ZeroSum,
                        "leader" => Aggregation::LeaderRelative,
                        other => return Err(invalid(key, other)),
                    }
                }
                "portfolio" => {
                    config.generation = Generation::Portfolio(required(key, value)?.to_string())
                }
                "frontier" => {
                    frontier = Some(match required(key, value)? {
                        "fifo" => Frontier::Fifo,
                        "lifo" => Frontier::Lifo,
                        "batch" => Frontier::Batch,
                        other => return Err(invalid(key, other)),
                    })
                }
                "priority" => {
                    frontier = Some(Frontier::Priority(required(key, value)?.to_string()))
                }
                "seed" => config.seed = Some(number(key, value)?),
                "propagation_limit" => {
                    config.propagation_limit = match required(key, value)? {
                        "none" => None,
                        _ => Some(number(key, value)?),
                    }
                }
                "analysis" => {
                    config.analysis = match value {
                        None | Some("true") => true,
                        Some("false") => false,
                        Some(other) => return Err(invalid(key, other)),
                    }
                }
                other => return Err(ConfigError::UnknownKey(other.to_string())),
            }
        }

        match limit_type {
            None => {
                if let Some(n) = limit {
                    config.expansion = Expansion::NodeLimit(n);
                }
            }
            Some("none") => config.expansion = Expansion::Exhaustive,
            Some("no_exp") => {
                config.expansion = Expansion::Disabled;
                config.selection = Selection::Random;
            }
            Some("plies") => {
                let plies = match limit {
                    Some(n) => u32::try_from(n).map_err(|_| invalid("limit", &n.to_string()))?,
                    None => DEFAULT_PLIES,
                };
                config.expansion = Expansion::StepLimit(plies);
                config.frontier = Frontier::Batch;
            }
            Some("nodes") => {
                config.expansion = Expansion::NodeLimit(limit.unwrap_or(DEFAULT_NODE_LIMIT))
            }
            Some(other) => return Err(invalid("limit_type", other)),
        }

        if let Some(frontier) = frontier {
            config.frontier = frontier;
        }
        if let Some(selection) = selection {
            config.selection = selection;
        }

        config.evaluation = match (eval_kind, eval_func) {
            (None, None) | (Some("outcome"), _) => Evaluation::Outcome,
            (None | Some("heuristic"), Some(name)) => Evaluation::Heuristic(name),
            (Some("heuristic"), None) => return Err(ConfigError::MissingValue("eval_func".into())),
            (Some("rollout"), _) => Evaluation::Rollout {
                rollouts,
                max_depth: rollout_depth,
            },
            (Some(other), _) => return Err(invalid("eval", other)),
        };

        config.validate()?;
        Ok(config)
    }
}

impl fmt::Display for SearchConfig {
    /// Renders the configuration in spec-string form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expansion {
            Expansion::Disabled => write!(f, "limit_type=no_exp")?,
            Expansion::Exhaustive => write!(f, "limit_type=none")?,
            Expansion::NodeLimit(n) => write!(f, "limit_type=nodes,limit={n}")?,
            Expansion::StepLimit(n) => write!(f, "limit_type=plies,limit={n}")?,
        }
        match &self.frontier {
            Frontier::Fifo => write!(f, ",frontier=fifo")?,
            Frontier::Lifo => write!(f, ",frontier=lifo")?,
            Frontier::Batch => write!(f, ",frontier=batch")?,
            Frontier::Priority(name) => write!(f, ",priority={name}")?,
        }
        if let Generation::Portfolio(name) = &self.generation {
            write!(f, ",portfolio={name}")?;
        }
        match &self.evaluation {
            Evaluation::Outcome => write!(f, ",eval=outcome")?,
            Evaluation::Heuristic(name) => write!(f, ",eval_func={name}")?,
            Evaluation::Rollout {
                rollouts,
                max_depth,
            } => {
                write!(f, ",eval=rollout,rollouts={rollouts}")?;
                if let Some(depth) = max_depth {
                    write!(f, ",rollout_depth={depth}")?;
                }
            }
        }
        if self.aggregation == Aggregation::LeaderRelative {
            write!(f, ",aggregate=leader")?;
        }
        write!(f, ",select_action={}", self.selection.name())?;
        if let Some(seed) = self.seed {
            write!(f, ",seed={seed}")?;
        }
        match self.propagation_limit {
            Some(DEFAULT_PROPAGATION_LIMIT) => {}
            Some(limit) => write!(f, ",propagation_limit={limit}")?,
            None => write!(f, ",propagation_limit=none")?,
        }
        if self.analysis {
            write!(f, ",analysis")?;
        }
        Ok(())
    }
}
