//! Frontier and reached map of one search direction.
//!
//! Priorities are never decreased in place. A cheaper path to a vertex is
//! pushed as a new candidate and recorded in the reached map; the older,
//! more expensive candidate stays in the heap and is discarded when it
//! surfaces because it is no longer the node recorded for its vertex.
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::{constants::Weight, graph::VertexId};

use super::node::{Node, NodeRef, SearchTree};

#[derive(Debug)]
pub(crate) struct Candidate {
    pub(crate) node: NodeRef,
    pub(crate) vertex: VertexId,
    pub(crate) priority: Weight,
}

impl Candidate {
    pub(crate) fn new(node: NodeRef, vertex: VertexId, priority: Weight) -> Self {
        Self {
            node,
            vertex,
            priority,
        }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        other.priority == self.priority && other.vertex == self.vertex
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    // Reversed so that the smallest priority is at the top of the heap. Equal
    // priorities pop the smaller vertex first.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

#[derive(Debug, Default)]
pub(crate) struct SearchSpace {
    tree: SearchTree,
    reached: FxHashMap<VertexId, NodeRef>,
    frontier: BinaryHeap<Candidate>,
}

impl SearchSpace {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    /// Resets the space and seeds it with `start`
    pub(crate) fn start(&mut self, start: VertexId, priority: Weight) {
        self.tree.clear();
        self.reached.clear();
        self.frontier.clear();

        let root = self.tree.push(Node::root(start));
        self.reached.insert(start, root);
        self.frontier.push(Candidate::new(root, start, priority));
    }

    /// Records `child` if its vertex is unseen or the path to it is strictly
    /// cheaper than the recorded one. Returns the new node on success.
    pub(crate) fn relax(
        &mut self,
        child: Node,
        priority: impl FnOnce(&Node) -> Weight,
    ) -> Option<NodeRef> {
        let improves = self
            .reached
            .get(&child.value)
            .map_or(true, |known| child.path_cost < self.tree.get(*known).path_cost);

        if !improves {
            return None;
        }

        let priority = priority(&child);
        let vertex = child.value;
        let node = self.tree.push(child);
        self.reached.insert(vertex, node);
        self.frontier.push(Candidate::new(node, vertex, priority));
        Some(node)
    }

    fn is_stale(&self, candidate: &Candidate) -> bool {
        self.reached.get(&candidate.vertex) != Some(&candidate.node)
    }

    fn drop_stale(&mut self) {
        while let Some(top) = self.frontier.peek() {
            if !self.is_stale(top) {
                break;
            }
            self.frontier.pop();
        }
    }

    /// Lowest priority of all live candidates
    pub(crate) fn peek_priority(&mut self) -> Option<Weight> {
        self.drop_stale();
        self.frontier.peek().map(|candidate| candidate.priority)
    }

    /// Removes the live candidate with the lowest priority
    pub(crate) fn pop(&mut self) -> Option<NodeRef> {
        self.drop_stale();
        self.frontier.pop().map(|candidate| candidate.node)
    }

    pub(crate) fn node(&self, node_ref: NodeRef) -> &Node {
        self.tree.get(node_ref)
    }

    /// Node currently recorded for `v`
    pub(crate) fn reached(&self, v: VertexId) -> Option<NodeRef> {
        self.reached.get(&v).copied()
    }

    pub(crate) fn num_reached(&self) -> usize {
        self.reached.len()
    }

    pub(crate) fn solution(&self, node_ref: NodeRef) -> Vec<VertexId> {
        self.tree.solution(node_ref)
    }

    /// Vertex -> best known path cost
    pub(crate) fn distances(&self) -> FxHashMap<VertexId, Weight> {
        self.reached
            .iter()
            .map(|(v, node)| (*v, self.tree.get(*node).path_cost))
            .collect()
    }
}
