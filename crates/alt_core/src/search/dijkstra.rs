//! Uniform-cost search. Serves as the reference every informed search is
//! checked against.
use std::collections::BinaryHeap;

use crate::constants::Weight;
use crate::graph::*;
use crate::search::shortest_path::ShortestPath;
use crate::statistics::SearchStats;
use log::debug;
use rustc_hash::FxHashMap;

use super::PathFinder;

#[derive(Debug)]
pub(crate) struct Candidate {
    pub(crate) vertex: VertexId,
    pub(crate) weight: Weight,
}

impl Candidate {
    pub(crate) fn new(vertex: VertexId, weight: Weight) -> Self {
        Self { vertex, weight }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        other.weight == self.weight && other.vertex == self.vertex
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

pub struct Dijkstra<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Dijkstra {
            g: graph,
            stats: SearchStats::default(),
        }
    }

    pub fn search(&mut self, source: VertexId, target: VertexId) -> Option<ShortestPath> {
        self.stats.init();

        if !self.g.contains(source) || !self.g.contains(target) {
            self.stats.finish();
            return None;
        }

        if source == target {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            return Some(ShortestPath::new(vec![source], 0.0).with_nodes_processed(1));
        }

        let mut node_data: FxHashMap<VertexId, (Weight, Option<VertexId>)> = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut queue = BinaryHeap::new();

        queue.push(Candidate::new(source, 0.0));

        while let Some(Candidate { weight, vertex }) = queue.pop() {
            // Skip entries that were superseded by a cheaper one
            if weight > node_data[&vertex].0 {
                continue;
            }

            self.stats.nodes_settled += 1;

            if vertex == target {
                break;
            }

            for edge in self.g.neighbors(vertex) {
                let new_distance = weight + edge.weight;
                if new_distance
                    < node_data
                        .get(&edge.target)
                        .unwrap_or(&(std::f64::INFINITY, None))
                        .0
                {
                    node_data.insert(edge.target, (new_distance, Some(vertex)));
                    queue.push(Candidate::new(edge.target, new_distance));
                }
            }
        }
        self.stats.finish();

        let sp = super::reconstruct_path(target, source, &node_data)
            .map(|sp| sp.with_nodes_processed(node_data.len()));
        if sp.is_some() {
            debug!("Path found: {:?}", sp);
            debug!(
                "Path found: {:?}/{} nodes settled",
                self.stats.duration,
                self.stats.nodes_settled
            );
        } else {
            debug!(
                "No path found: {:?}/{} nodes settled",
                self.stats.duration,
                self.stats.nodes_settled
            );
        }

        sp
    }
}

impl<'a> PathFinder for Dijkstra<'a> {
    fn query(&mut self, source: VertexId, destination: VertexId) -> Option<ShortestPath> {
        self.search(source, destination)
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
