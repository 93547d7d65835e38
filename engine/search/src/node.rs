//! Stored nodes and edges of the search graph.
//!
//! Each node holds one distinct game state (distinct by hash). Edges record
//! which joint action led from one node to another; a node may have many
//! parents and the edge set may contain cycles.

use engine_core::{Game, JointAction, Value};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Index into the edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u32);

/// A node's current best answer: its resolved value and the deciding
/// actor's moves achieving it. `None` entries are passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Opinion<M> {
    pub value: Value,
    pub actions: Vec<Option<M>>,
}

impl<M> Opinion<M> {
    /// Opinion of a node without any recorded children.
    pub fn abandoned() -> Self {
        Self {
            value: Value::NEG_INFINITY,
            actions: Vec::new(),
        }
    }
}

/// Directed expansion edge.
#[derive(Debug, Clone)]
pub struct Edge<A: Ord, M> {
    pub from: NodeId,
    pub action: JointAction<A, M>,
    pub to: NodeId,
}

/// A node in the transposition store.
#[derive(Debug)]
pub struct StoredNode<G: Game> {
    pub hash: G::Hash,
    pub state: G::State,

    /// Aggregated value: the evaluator's at discovery, the resolver's after.
    pub value: Value,

    /// Set by the resolver once the node has been expanded.
    pub opinion: Option<Opinion<G::Move>>,

    /// Reported terminal by the game; never expanded.
    pub terminal: bool,

    pub expanded: bool,

    /// Outgoing edges, in generation order.
    pub children: Vec<EdgeId>,

    /// Incoming edges, in recording order.
    pub parents: Vec<EdgeId>,
}

impl<G: Game> StoredNode<G> {
    pub fn new(hash: G::Hash, state: G::State, terminal: bool) -> Self {
        Self {
            hash,
            state,
            value: 0.0,
            opinion: None,
            terminal,
            expanded: false,
            children: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Whether the resolver has produced an opinion for this node.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.opinion.is_some()
    }
}
