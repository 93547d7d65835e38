//! Minimax value resolution over a possibly cyclic graph.
//!
//! Resolving a node groups its child edges by the searching actor's own
//! component of the joint action. Other actors' simultaneous choices are
//! treated as adversarial: each group is worth its worst child, and the node
//! is worth its best group. For alternating games this is plain minimax,
//! since at the opponent's turn every edge falls into the single "pass" group.
//!
//! Changes are propagated backward with a FIFO worklist. A node whose value
//! did not change stops the propagation, which is what lets the worklist
//! drain on graphs with transpositions and cycles.

use std::collections::{HashSet, VecDeque};

use engine_core::{Game, Value};
use tracing::{trace, warn};

use crate::node::{NodeId, Opinion};
use crate::store::TranspositionStore;

/// Compute a node's opinion from its recorded children, for `actor`.
///
/// Tied groups are all kept, in first-seen order. A node without children
/// resolves to [`Opinion::abandoned`].
pub fn resolve<G: Game>(
    store: &TranspositionStore<G>,
    id: NodeId,
    actor: G::Actor,
) -> Opinion<G::Move> {
    let mut groups: Vec<(Option<G::Move>, Value)> = Vec::new();

    for edge in store.children_of(id) {
        let choice = edge.action.get(actor).cloned();
        let child_value = store.get(edge.to).value;

        match groups.iter_mut().find(|(key, _)| *key == choice) {
            Some((_, worst)) => *worst = worst.min(child_value),
            None => groups.push((choice, child_value)),
        }
    }

    let top = groups.iter().map(|(_, value)| *value).reduce(Value::max);
    match top {
        Some(best) => Opinion {
            value: best,
            actions: groups
                .into_iter()
                .filter(|(_, value)| *value == best)
                .map(|(choice, _)| choice)
                .collect(),
        },
        None => Opinion::abandoned(),
    }
}

/// Summary of one propagation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Propagation {
    /// Nodes resolved
    pub resolutions: usize,

    /// Resolutions that changed a node's value
    pub changes: usize,

    /// Stopped by the resolution cap with work still queued
    pub truncated: bool,
}

/// Resolve `start` and re-resolve ancestors until no value changes.
///
/// `limit` caps the number of resolutions; hitting it leaves the remaining
/// worklist unprocessed and reports `truncated`.
pub fn propagate<G: Game>(
    store: &mut TranspositionStore<G>,
    start: NodeId,
    actor: G::Actor,
    limit: Option<usize>,
) -> Propagation {
    let mut report = Propagation::default();
    let mut worklist = VecDeque::from([start]);
    let mut queued = HashSet::from([start]);

    while let Some(id) = worklist.pop_front() {
        if limit.is_some_and(|cap| report.resolutions >= cap) {
            warn!(
                start = start.0,
                pending = worklist.len() + 1,
                "Propagation cap reached, leaving values unsettled"
            );
            report.truncated = true;
            break;
        }
        queued.remove(&id);

        let opinion = resolve(store, id, actor);
        let value = opinion.value;
        report.resolutions += 1;

        if !store.set_opinion(id, opinion) {
            continue;
        }
        report.changes += 1;
        trace!(node = id.0, value, "Value changed");

        for parent in store.parents_of(id) {
            if queued.insert(parent) {
                worklist.push_back(parent);
            }
        }
    }

    report
}
