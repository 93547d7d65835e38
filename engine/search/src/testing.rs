//! Synthetic games for unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use engine_core::{Game, JointAction, LegalMoves, Outcome, Valuation};
use rand_chacha::ChaCha20Rng;

use crate::evaluator::Evaluator;

/// Explicit edge-list game. States are node ids; a move is the id of the
/// target node, so two paths into the same id are transpositions.
#[derive(Debug, Default)]
pub(crate) struct GraphGame {
    start: u32,
    moves: BTreeMap<u32, (u8, Vec<u32>)>,
    terminals: BTreeSet<u32>,
}

impl GraphGame {
    pub fn new(start: u32) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }

    /// `actor` decides at `id` and may go to any of `targets`.
    pub fn node(mut self, id: u32, actor: u8, targets: &[u32]) -> Self {
        self.moves.insert(id, (actor, targets.to_vec()));
        self
    }

    pub fn terminal(mut self, id: u32) -> Self {
        self.terminals.insert(id);
        self
    }
}

impl Game for GraphGame {
    type State = u32;
    type Actor = u8;
    type Move = u32;
    type Hash = u32;

    fn actors(&self) -> Vec<u8> {
        vec![0, 1]
    }

    fn initial_state(&self) -> u32 {
        self.start
    }

    fn legal_moves(&self, state: &u32) -> LegalMoves<u8, u32> {
        self.moves
            .get(state)
            .map(|(actor, targets)| LegalMoves::from([(*actor, targets.clone())]))
            .unwrap_or_default()
    }

    fn apply(&self, state: &u32, action: &JointAction<u8, u32>) -> u32 {
        self.moves
            .get(state)
            .and_then(|(actor, _)| action.get(*actor))
            .copied()
            .unwrap_or(*state)
    }

    fn outcome(&self, state: &u32) -> Option<Outcome<u8>> {
        self.terminals.contains(state).then_some(Outcome::Draw)
    }

    fn hash_state(&self, state: &u32) -> u32 {
        *state
    }
}

/// Table-driven evaluator: `values[id]` for actor 0, zero for actor 1.
/// Counts how often each state is evaluated.
#[derive(Debug, Default)]
pub(crate) struct TableEvaluator {
    values: BTreeMap<u32, f64>,
    pub calls: Rc<RefCell<BTreeMap<u32, usize>>>,
}

impl TableEvaluator {
    pub fn new(values: &[(u32, f64)]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            calls: Rc::default(),
        }
    }
}

impl Evaluator<GraphGame> for TableEvaluator {
    fn evaluate(&self, _game: &GraphGame, state: &u32, _rng: &mut ChaCha20Rng) -> Valuation<u8> {
        *self.calls.borrow_mut().entry(*state).or_insert(0) += 1;
        let value = self.values.get(state).copied().unwrap_or(0.0);
        Valuation::from([(0, value), (1, 0.0)])
    }
}
