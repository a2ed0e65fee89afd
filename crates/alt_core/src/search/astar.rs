//! Implementation of the A* search algorithm.
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::{
    constants::Weight,
    graph::{Coordinate, Graph, SearchProblem, VertexId},
    heuristics::{estimated_cost, HeuristicFn},
    search::node::Node,
    statistics::SearchStats,
};

use super::{frontier::SearchSpace, shortest_path::ShortestPath, PathFinder};

/// Best-first search loop shared by the unidirectional engines. `f` yields the
/// priority of a node. If `is_goal` never holds, the search runs until the
/// frontier is empty and returns `None`.
pub(crate) fn best_first_search(
    space: &mut SearchSpace,
    stats: &mut SearchStats,
    g: &Graph,
    source: VertexId,
    is_goal: impl Fn(VertexId) -> bool,
    f: impl Fn(&Node) -> Weight,
) -> Option<ShortestPath> {
    let start = Node::root(source);
    space.start(source, f(&start));

    while let Some(current) = space.pop() {
        stats.nodes_settled += 1;

        let node = space.node(current).clone();
        if is_goal(node.value) {
            let sp = ShortestPath::new(space.solution(current), node.path_cost)
                .with_nodes_processed(space.num_reached());
            return Some(sp);
        }

        for child in node.expand(current, g) {
            space.relax(child, &f);
        }
    }

    None
}

pub struct AStar<'a, H = HeuristicFn> {
    pub stats: SearchStats,
    g: &'a Graph,
    heuristic: H,
    space: SearchSpace,
}

impl<'a, H> AStar<'a, H>
where
    H: Fn(&Coordinate, &Coordinate) -> Weight,
{
    pub fn new(g: &'a Graph, heuristic: H) -> Self {
        AStar {
            g,
            heuristic,
            stats: SearchStats::default(),
            space: SearchSpace::new(),
        }
    }

    pub fn query(&mut self, source: VertexId, destination: VertexId) -> Option<ShortestPath> {
        debug!("BEGIN ASTAR SEARCH from {} to {}", source, destination);
        self.stats.init();

        let problem = SearchProblem::new(self.g, source, destination);
        if let Err(e) = problem.validate() {
            warn!("{}", e);
            self.stats.finish();
            return None;
        }

        let (g, heuristic) = (self.g, &self.heuristic);
        let sp = best_first_search(
            &mut self.space,
            &mut self.stats,
            g,
            source,
            |v| problem.is_goal(v),
            |node| estimated_cost(heuristic, g, node, destination),
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

    /// Exhaustive search from `source` without a goal. Returns the shortest
    /// path cost of every vertex reachable from `source`.
    pub fn distances_from(&mut self, source: VertexId) -> FxHashMap<VertexId, Weight> {
        self.stats.init();

        if !self.g.contains(source) {
            self.stats.finish();
            return FxHashMap::default();
        }

        best_first_search(
            &mut self.space,
            &mut self.stats,
            self.g,
            source,
            |_| false,
            |node| node.path_cost,
        );

        self.stats.finish();
        self.space.distances()
    }
}

impl<'a, H> PathFinder for AStar<'a, H>
where
    H: Fn(&Coordinate, &Coordinate) -> Weight,
{
    fn query(&mut self, source: VertexId, destination: VertexId) -> Option<ShortestPath> {
        AStar::query(self, source, destination)
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
