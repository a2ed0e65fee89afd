use crate::{constants::Weight, graph::VertexId};

#[derive(Debug, PartialEq, Clone)]
pub struct ShortestPath {
    pub nodes: Vec<VertexId>,
    pub weight: Weight,
    /// Number of vertices the search reached before it finished
    pub nodes_processed: usize,
}

impl ShortestPath {
    pub fn new(nodes: Vec<VertexId>, weight: Weight) -> Self {
        ShortestPath {
            nodes,
            weight,
            nodes_processed: 0,
        }
    }

    pub fn with_nodes_processed(mut self, nodes_processed: usize) -> Self {
        self.nodes_processed = nodes_processed;
        self
    }
}
