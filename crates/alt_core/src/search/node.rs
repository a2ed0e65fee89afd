//! Search tree of a single search direction.
//!
//! Nodes are append-only records in an arena. A node refers to its parent by
//! index, so a path is reconstructed by walking indices back to the root.
use crate::{
    constants::Weight,
    graph::{Graph, VertexId},
};

/// Index of a [`Node`] inside its [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: VertexId,
    pub parent: Option<NodeRef>,
    /// Cost of the path from the start of the search to `value`
    pub path_cost: Weight,
}

impl Node {
    pub fn root(value: VertexId) -> Self {
        Node {
            value,
            parent: None,
            path_cost: 0.0,
        }
    }

    /// Children of this node, one per outgoing edge of `value`. `at` is the
    /// position of this node in its tree.
    pub fn expand<'g>(&self, at: NodeRef, graph: &'g Graph) -> impl Iterator<Item = Node> + 'g {
        let path_cost = self.path_cost;
        graph.neighbors(self.value).map(move |edge| Node {
            value: edge.target,
            parent: Some(at),
            path_cost: path_cost + edge.weight,
        })
    }
}

#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, node: Node) -> NodeRef {
        let node_ref = NodeRef(self.nodes.len());
        self.nodes.push(node);
        node_ref
    }

    pub fn get(&self, node_ref: NodeRef) -> &Node {
        &self.nodes[node_ref.0]
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Vertices from the root to `node_ref`, both inclusive
    pub fn solution(&self, node_ref: NodeRef) -> Vec<VertexId> {
        let mut path = Vec::new();
        let mut current = Some(node_ref);
        while let Some(node_ref) = current {
            let node = self.get(node_ref);
            path.push(node.value);
            current = node.parent;
        }
        path.reverse();
        path
    }
}
