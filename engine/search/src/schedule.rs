//! Expansion queue disciplines.
//!
//! The queue only decides *which* pending nodes come next; when the build
//! loop stops is up to [`crate::config::Expansion`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::config::Frontier;
use crate::node::NodeId;

/// Heap entry: higher priority first, then earlier insertion.
#[derive(Debug, Clone, Copy)]
pub struct Prioritized {
    priority: f64,
    sequence: u64,
    id: NodeId,
}

impl PartialEq for Prioritized {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Prioritized {}

impl PartialOrd for Prioritized {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Prioritized {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Pending nodes awaiting expansion.
#[derive(Debug)]
pub enum ExpansionQueue {
    Fifo(VecDeque<NodeId>),
    Lifo(Vec<NodeId>),
    Batch(Vec<NodeId>),
    Priority {
        heap: BinaryHeap<Prioritized>,
        sequence: u64,
    },
}

impl ExpansionQueue {
    pub fn new(frontier: &Frontier) -> Self {
        match frontier {
            Frontier::Fifo => Self::Fifo(VecDeque::new()),
            Frontier::Lifo => Self::Lifo(Vec::new()),
            Frontier::Batch => Self::Batch(Vec::new()),
            Frontier::Priority(_) => Self::Priority {
                heap: BinaryHeap::new(),
                sequence: 0,
            },
        }
    }

    /// Enqueue a node. `priority` is only consulted by the priority discipline.
    pub fn push(&mut self, id: NodeId, priority: f64) {
        match self {
            Self::Fifo(queue) => queue.push_back(id),
            Self::Lifo(stack) | Self::Batch(stack) => stack.push(id),
            Self::Priority { heap, sequence } => {
                heap.push(Prioritized {
                    priority,
                    sequence: *sequence,
                    id,
                });
                *sequence += 1;
            }
        }
    }

    /// Take the nodes for the next iteration: the whole queue for `Batch`,
    /// at most one node otherwise. Empty when nothing is pending.
    pub fn next_batch(&mut self) -> Vec<NodeId> {
        match self {
            Self::Fifo(queue) => queue.pop_front().into_iter().collect(),
            Self::Lifo(stack) => stack.pop().into_iter().collect(),
            Self::Batch(pending) => std::mem::take(pending),
            Self::Priority { heap, .. } => heap.pop().map(|p| p.id).into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo(queue) => queue.len(),
            Self::Lifo(stack) | Self::Batch(stack) => stack.len(),
            Self::Priority { heap, .. } => heap.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
