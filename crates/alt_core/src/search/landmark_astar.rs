//! A* guided by landmark distances.
//!
//! Same search loop as [`AStar`](super::astar::AStar), the priority uses
//! [`landmark_differential`](crate::heuristics::landmark_differential). For
//! vertices no landmark is informative about, the geometric fallback
//! heuristic is used instead.
use log::{debug, warn};

use crate::{
    constants::Weight,
    graph::{Coordinate, Graph, SearchProblem, VertexId},
    heuristics::{landmark_estimated_cost, HeuristicFn},
    landmarks::LandmarkData,
    statistics::SearchStats,
};

use super::{
    astar::best_first_search, frontier::SearchSpace, shortest_path::ShortestPath, PathFinder,
};

pub struct LandmarkAStar<'a, H = HeuristicFn> {
    pub stats: SearchStats,
    g: &'a Graph,
    data: &'a LandmarkData,
    fallback: H,
    space: SearchSpace,
}

impl<'a, H> LandmarkAStar<'a, H>
where
    H: Fn(&Coordinate, &Coordinate) -> Weight,
{
    /// `data` must be computed on `g`
    pub fn new(g: &'a Graph, data: &'a LandmarkData, fallback: H) -> Self {
        LandmarkAStar {
            g,
            data,
            fallback,
            stats: SearchStats::default(),
            space: SearchSpace::new(),
        }
    }

    pub fn query(&mut self, source: VertexId, destination: VertexId) -> Option<ShortestPath> {
        debug!(
            "BEGIN LANDMARK ASTAR SEARCH from {} to {} with {} landmarks",
            source,
            destination,
            self.data.num_landmarks()
        );
        self.stats.init();

        let problem = SearchProblem::new(self.g, source, destination);
        if let Err(e) = problem.validate() {
            warn!("{}", e);
            self.stats.finish();
            return None;
        }

        let (g, data, fallback) = (self.g, self.data, &self.fallback);
        let sp = best_first_search(
            &mut self.space,
            &mut self.stats,
            g,
            source,
            |v| problem.is_goal(v),
            |node| landmark_estimated_cost(data, fallback, g, node, destination),
        );

        self.stats.finish();

        match sp {
            Some(sp) => {
                debug!("Path found: {:?}", sp.nodes);
                debug!("{}, weight: {}", self.stats, sp.weight);
                Some(sp)
            }
            None => {
                debug!("No path found: {}", self.stats);
                None
            }
        }
    }
}

impl<'a, H> PathFinder for LandmarkAStar<'a, H>
where
    H: Fn(&Coordinate, &Coordinate) -> Weight,
{
    fn query(&mut self, source: VertexId, destination: VertexId) -> Option<ShortestPath> {
        LandmarkAStar::query(self, source, destination)
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
