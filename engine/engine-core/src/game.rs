//! Typed Game trait describing the state-transition contract
//!
//! The search engine never looks inside a game state. Everything it needs -
//! who is deciding, what they may do, what happens when they do it, whether
//! the game is over and how to recognise a state it has already seen - is
//! asked of a [`Game`] implementation.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::joint::{JointAction, LegalMoves};

/// Scalar used for every valuation the engine deals with.
///
/// Decided outcomes use the infinities: `f64::INFINITY` for a win and
/// `f64::NEG_INFINITY` for a loss.
pub type Value = f64;

/// Per-actor raw valuation of a state.
pub type Valuation<A> = BTreeMap<A, Value>;

/// Named game-specific heuristic: per-actor valuation of a state.
pub type Heuristic<G> = fn(&G, &<G as Game>::State) -> Valuation<<G as Game>::Actor>;

/// Named behavior filter narrowing one actor's legal moves.
///
/// Receives the state, the actor, and that actor's legal moves; returns the
/// subset that should be expanded. An empty result abandons the state.
pub type Portfolio<G> = fn(
    &G,
    &<G as Game>::State,
    <G as Game>::Actor,
    &[<G as Game>::Move],
) -> Vec<<G as Game>::Move>;

/// Named expansion priority. Higher values are expanded first.
pub type Priority<G> = fn(&G, &<G as Game>::State) -> f64;

/// Terminal outcome of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A> {
    /// A single actor won.
    Winner(A),
    /// Several actors share first place.
    Winners(Vec<A>),
    /// Nobody won.
    Draw,
}

impl<A: Copy + Ord> Outcome<A> {
    /// Whether `actor` is among the winners.
    pub fn is_won_by(&self, actor: A) -> bool {
        match self {
            Outcome::Winner(winner) => *winner == actor,
            Outcome::Winners(winners) => winners.contains(&actor),
            Outcome::Draw => false,
        }
    }

    /// Win/lose/draw classification: winners get `+inf`, everybody else
    /// `-inf`, and a draw is worth `0` to all.
    pub fn valuation(&self, actors: &[A]) -> Valuation<A> {
        match self {
            Outcome::Draw => neutral_valuation(actors),
            _ => actors
                .iter()
                .map(|&actor| {
                    let value = if self.is_won_by(actor) {
                        Value::INFINITY
                    } else {
                        Value::NEG_INFINITY
                    };
                    (actor, value)
                })
                .collect(),
        }
    }
}

/// Valuation assigning `0` to every actor.
pub fn neutral_valuation<A: Copy + Ord>(actors: &[A]) -> Valuation<A> {
    actors.iter().map(|&actor| (actor, 0.0)).collect()
}

/// Main trait for game implementations
///
/// # Type Parameters
///
/// * `State` - Game state, immutable once produced; `apply` returns a new one
/// * `Actor` - Identifies a player (or any other deciding agent)
/// * `Move` - One actor's choice within a joint action
/// * `Hash` - Canonical key of a state. Two states with the same key are
///   treated as the same node by the search, so the hash must not collide
///   across states the game considers distinct.
///
/// # Example
///
/// ```rust
/// use engine_core::{Game, JointAction, LegalMoves, Outcome};
///
/// /// Count up to ten, one or two steps at a time; whoever reaches ten wins.
/// #[derive(Debug)]
/// struct CountToTen;
///
/// impl Game for CountToTen {
///     type State = (u8, u8); // (total, actor to move)
///     type Actor = u8;
///     type Move = u8;
///     type Hash = (u8, u8);
///
///     fn actors(&self) -> Vec<u8> {
///         vec![0, 1]
///     }
///
///     fn initial_state(&self) -> (u8, u8) {
///         (0, 0)
///     }
///
///     fn legal_moves(&self, state: &(u8, u8)) -> LegalMoves<u8, u8> {
///         let steps = (1..=2).filter(|s| state.0 + s <= 10).collect();
///         LegalMoves::from([(state.1, steps)])
///     }
///
///     fn apply(&self, state: &(u8, u8), action: &JointAction<u8, u8>) -> (u8, u8) {
///         let step = action.get(state.1).copied().unwrap_or(0);
///         (state.0 + step, 1 - state.1)
///     }
///
///     fn outcome(&self, state: &(u8, u8)) -> Option<Outcome<u8>> {
///         (state.0 == 10).then(|| Outcome::Winner(1 - state.1))
///     }
///
///     fn hash_state(&self, state: &(u8, u8)) -> (u8, u8) {
///         *state
///     }
/// }
///
/// let game = CountToTen;
/// let start = game.initial_state();
/// assert_eq!(game.legal_moves(&start)[&0], vec![1, 2]);
/// ```
pub trait Game: Debug + Sized {
    /// Game state type
    type State: Clone + Debug;

    /// Actor identifier
    type Actor: Copy + Ord + Hash + Debug;

    /// Move type for a single actor
    type Move: Clone + Eq + Hash + Debug;

    /// Canonical state key
    type Hash: Copy + Eq + Hash + Debug;

    /// Every actor that can appear in a valuation.
    fn actors(&self) -> Vec<Self::Actor>;

    /// The state a fresh game starts from.
    fn initial_state(&self) -> Self::State;

    /// Actors with a pending decision and their legal moves.
    ///
    /// An actor may be listed with an empty move list; it then contributes
    /// the pass placeholder to every joint action.
    fn legal_moves(&self, state: &Self::State) -> LegalMoves<Self::Actor, Self::Move>;

    /// Apply a joint action, producing the successor state.
    fn apply(
        &self,
        state: &Self::State,
        action: &JointAction<Self::Actor, Self::Move>,
    ) -> Self::State;

    /// `None` while the game is running.
    fn outcome(&self, state: &Self::State) -> Option<Outcome<Self::Actor>>;

    /// Canonical key of a state.
    fn hash_state(&self, state: &Self::State) -> Self::Hash;

    /// Look up a named heuristic.
    fn heuristic(&self, _name: &str) -> Option<Heuristic<Self>> {
        None
    }

    /// Names accepted by [`Game::heuristic`].
    fn heuristic_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Look up a named portfolio filter.
    fn portfolio(&self, _name: &str) -> Option<Portfolio<Self>> {
        None
    }

    /// Names accepted by [`Game::portfolio`].
    fn portfolio_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Look up a named expansion priority.
    fn priority(&self, _name: &str) -> Option<Priority<Self>> {
        None
    }

    /// Names accepted by [`Game::priority`].
    fn priority_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether the state is terminal.
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.outcome(state).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two walkers on a line, moving simultaneously; first to reach 3 wins.
    #[derive(Debug)]
    struct RaceGame;

    impl Game for RaceGame {
        type State = [u8; 2];
        type Actor = usize;
        type Move = u8;
        type Hash = [u8; 2];

        fn actors(&self) -> Vec<usize> {
            vec![0, 1]
        }

        fn initial_state(&self) -> [u8; 2] {
            [0, 0]
        }

        fn legal_moves(&self, _state: &[u8; 2]) -> LegalMoves<usize, u8> {
            LegalMoves::from([(0, vec![0, 1]), (1, vec![0, 1])])
        }

        fn apply(&self, state: &[u8; 2], action: &JointAction<usize, u8>) -> [u8; 2] {
            let mut next = *state;
            for (actor, step) in action.iter() {
                next[*actor] += step.unwrap_or(0);
            }
            next
        }

        fn outcome(&self, state: &[u8; 2]) -> Option<Outcome<usize>> {
            match (state[0] >= 3, state[1] >= 3) {
                (true, true) => Some(Outcome::Winners(vec![0, 1])),
                (true, false) => Some(Outcome::Winner(0)),
                (false, true) => Some(Outcome::Winner(1)),
                (false, false) => None,
            }
        }

        fn hash_state(&self, state: &[u8; 2]) -> [u8; 2] {
            *state
        }

        fn heuristic(&self, name: &str) -> Option<Heuristic<Self>> {
            match name {
                "progress" => Some(progress),
                _ => None,
            }
        }

        fn heuristic_names(&self) -> &'static [&'static str] {
            &["progress"]
        }
    }

    fn progress(_game: &RaceGame, state: &[u8; 2]) -> Valuation<usize> {
        Valuation::from([(0, state[0] as f64), (1, state[1] as f64)])
    }

    #[test]
    fn test_apply_joint_action() {
        let game = RaceGame;
        let state = game.initial_state();

        let action = JointAction::from_choices([(0, Some(1)), (1, None)]);
        let next = game.apply(&state, &action);

        assert_eq!(next, [1, 0]);
        assert_eq!(state, [0, 0]); // input untouched
        assert!(!game.is_terminal(&next));
    }

    #[test]
    fn test_outcome_valuation_winner() {
        let outcome = Outcome::Winner(1usize);
        let valuation = outcome.valuation(&[0, 1]);

        assert_eq!(valuation[&0], f64::NEG_INFINITY);
        assert_eq!(valuation[&1], f64::INFINITY);
    }

    #[test]
    fn test_outcome_valuation_shared_win() {
        let outcome = Outcome::Winners(vec![0usize, 2]);
        let valuation = outcome.valuation(&[0, 1, 2]);

        assert_eq!(valuation[&0], f64::INFINITY);
        assert_eq!(valuation[&1], f64::NEG_INFINITY);
        assert_eq!(valuation[&2], f64::INFINITY);
        assert!(outcome.is_won_by(2));
        assert!(!outcome.is_won_by(1));
    }

    #[test]
    fn test_outcome_valuation_draw() {
        let valuation = Outcome::<usize>::Draw.valuation(&[0, 1]);
        assert_eq!(valuation, neutral_valuation(&[0, 1]));
    }

    #[test]
    fn test_named_lookups() {
        let game = RaceGame;

        let heuristic = game.heuristic("progress").expect("progress is registered");
        let valuation = heuristic(&game, &[2, 1]);
        assert_eq!(valuation[&0], 2.0);
        assert_eq!(valuation[&1], 1.0);

        assert!(game.heuristic("missing").is_none());
        assert!(game.portfolio("anything").is_none());
        assert!(game.priority("anything").is_none());
        assert_eq!(game.heuristic_names(), &["progress"]);
    }

    #[test]
    fn test_simultaneous_finish() {
        let game = RaceGame;
        let action = JointAction::from_choices([(0, Some(1)), (1, Some(1))]);
        let next = game.apply(&[2, 2], &action);

        assert_eq!(game.outcome(&next), Some(Outcome::Winners(vec![0, 1])));
    }
}
