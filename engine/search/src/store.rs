//! Transposition store with arena allocation.
//!
//! Nodes live in a contiguous Vec and are referenced by [`NodeId`]. A hash
//! index maps each canonical state key to its single node, so states reached
//! through different action sequences share one node. Edges live in their own
//! arena and are indexed from both ends for backward propagation.

use std::collections::{HashMap, VecDeque};

use engine_core::{Game, JointAction, Value};
use serde::Serialize;

use crate::node::{Edge, EdgeId, NodeId, Opinion, StoredNode};

/// Deduplicating store of every state discovered during one search.
#[derive(Debug)]
pub struct TranspositionStore<G: Game> {
    /// Arena storing all nodes
    nodes: Vec<StoredNode<G>>,

    /// Arena storing all edges
    edges: Vec<Edge<G::Actor, G::Move>>,

    /// Canonical hash to node
    index: HashMap<G::Hash, NodeId>,
}

impl<G: Game> TranspositionStore<G> {
    /// Create a store holding only the root state.
    pub fn new(game: &G, root_state: G::State) -> Self {
        let mut store = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            index: HashMap::new(),
        };
        store.insert_if_absent(game, root_state);
        store
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &StoredNode<G> {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut StoredNode<G> {
        &mut self.nodes[id.0 as usize]
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge<G::Actor, G::Move> {
        &self.edges[id.0 as usize]
    }

    /// Find the node for a state key.
    pub fn lookup(&self, hash: &G::Hash) -> Option<NodeId> {
        self.index.get(hash).copied()
    }

    /// Insert a state unless an equal-hash state is already stored.
    ///
    /// Returns the node and whether it was created by this call. The terminal
    /// flag is computed once, on creation.
    pub fn insert_if_absent(&mut self, game: &G, state: G::State) -> (NodeId, bool) {
        let hash = game.hash_state(&state);
        if let Some(&id) = self.index.get(&hash) {
            return (id, false);
        }

        let id = NodeId(self.nodes.len() as u32);
        let terminal = game.is_terminal(&state);
        self.nodes.push(StoredNode::new(hash, state, terminal));
        self.index.insert(hash, id);
        (id, true)
    }

    /// Record a directed edge and index it from both ends.
    pub fn record_edge(
        &mut self,
        from: NodeId,
        action: JointAction<G::Actor, G::Move>,
        to: NodeId,
    ) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge { from, action, to });
        self.get_mut(from).children.push(id);
        self.get_mut(to).parents.push(id);
        id
    }

    /// Outgoing edges of a node, in generation order.
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &Edge<G::Actor, G::Move>> + '_ {
        self.get(id).children.iter().map(|&e| self.edge(e))
    }

    /// Source nodes of a node's incoming edges. A parent linked through
    /// several edges is yielded once per edge.
    pub fn parents_of(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(id).parents.iter().map(|&e| self.edge(e).from)
    }

    /// Set a node's discovery value.
    pub fn set_value(&mut self, id: NodeId, value: Value) {
        self.get_mut(id).value = value;
    }

    /// Store a resolved opinion and adopt its value.
    ///
    /// Returns whether the node's value changed.
    pub fn set_opinion(&mut self, id: NodeId, opinion: Opinion<G::Move>) -> bool {
        let node = self.get_mut(id);
        let changed = node.value != opinion.value;
        node.value = opinion.value;
        node.opinion = Some(opinion);
        changed
    }

    pub(crate) fn mark_expanded(&mut self, id: NodeId) {
        self.get_mut(id).expanded = true;
    }

    /// Get the total number of nodes in the store.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if store is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the total number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over all nodes with their IDs.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &StoredNode<G>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Number of nodes at each breadth-first depth from the root.
    ///
    /// Every node is counted once, at its shortest distance from the root.
    pub fn depth_profile(&self) -> Vec<usize> {
        let mut depth = vec![usize::MAX; self.nodes.len()];
        let mut profile = Vec::new();
        let mut queue = VecDeque::from([self.root()]);
        depth[0] = 0;

        while let Some(id) = queue.pop_front() {
            let d = depth[id.0 as usize];
            if profile.len() <= d {
                profile.push(0);
            }
            profile[d] += 1;

            for edge in self.children_of(id) {
                let slot = &mut depth[edge.to.0 as usize];
                if *slot == usize::MAX {
                    *slot = d + 1;
                    queue.push_back(edge.to);
                }
            }
        }

        profile
    }

    /// Get statistics about the store for debugging.
    pub fn stats(&self) -> StoreStats {
        let profile = self.depth_profile();
        StoreStats {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            expanded: self.nodes.iter().filter(|n| n.expanded).count(),
            terminal: self.nodes.iter().filter(|n| n.terminal).count(),
            max_depth: profile.len().saturating_sub(1),
        }
    }
}

/// Statistics about a transposition store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub expanded: usize,
    pub terminal: usize,
    pub max_depth: usize,
}
