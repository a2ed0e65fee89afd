//! Bidirectional A*.
//!
//! A forward search from the source on the graph and a backward search from
//! the destination on the reversed graph take turns. In every round the side
//! whose frontier has the lower minimum priority is expanded (forward on
//! ties). While expanding, every child is looked up in the reached map of the
//! opposite side; a hit connects both search trees.
//!
//! What happens after the trees connect is decided by the [`StoppingRule`].
use log::{debug, warn};

use crate::{
    constants::Weight,
    graph::{Coordinate, Graph, SearchProblem, VertexId},
    heuristics::{estimated_cost, HeuristicFn},
    statistics::SearchStats,
};

use super::{
    frontier::SearchSpace,
    node::{Node, NodeRef},
    shortest_path::ShortestPath,
    PathFinder,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoppingRule {
    /// Return the path through the first vertex found by both searches. The
    /// path is valid but not necessarily the shortest one.
    #[default]
    FirstMeeting,
    /// Keep the cheapest connection `mu` and stop once the side about to be
    /// expanded has a minimum priority `>= mu`. Yields shortest paths for
    /// admissible heuristics.
    Optimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Connection between both search trees
#[derive(Debug, Clone, Copy)]
struct Meeting {
    /// Side that produced the connection
    direction: Direction,
    /// Node preceding the meeting vertex on the expanding side. `None` if the
    /// meeting vertex is the start of that side.
    own_parent: Option<NodeRef>,
    vertex: VertexId,
    /// Node of the meeting vertex on the opposite side
    other: NodeRef,
    weight: Weight,
}

pub struct BiDirAStar<'a, H = HeuristicFn> {
    pub stats: SearchStats,
    g: &'a Graph,
    g_rev: Graph,
    heuristic: H,
    stopping_rule: StoppingRule,
    space_fwd: SearchSpace,
    space_bwd: SearchSpace,
}

impl<'a, H> BiDirAStar<'a, H>
where
    H: Fn(&Coordinate, &Coordinate) -> Weight,
{
    /// Reverses `g` once, the reversed graph is reused for every query.
    pub fn new(g: &'a Graph, heuristic: H) -> Self {
        BiDirAStar {
            g,
            g_rev: g.reverse(),
            heuristic,
            stopping_rule: StoppingRule::default(),
            stats: SearchStats::default(),
            space_fwd: SearchSpace::new(),
            space_bwd: SearchSpace::new(),
        }
    }

    pub fn with_stopping_rule(mut self, stopping_rule: StoppingRule) -> Self {
        self.stopping_rule = stopping_rule;
        self
    }

    pub fn stopping_rule(&self) -> StoppingRule {
        self.stopping_rule
    }

    pub fn query(&mut self, source: VertexId, destination: VertexId) -> Option<ShortestPath> {
        debug!(
            "BEGIN BIDIRECTIONAL ASTAR SEARCH from {} to {}",
            source, destination
        );
        self.stats.init();

        let problem_fwd = SearchProblem::new(self.g, source, destination);
        if let Err(e) = problem_fwd.validate() {
            warn!("{}", e);
            self.stats.finish();
            return None;
        }
        let problem_bwd = problem_fwd.reverse(&self.g_rev);

        if source == destination {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            return Some(ShortestPath::new(vec![source], 0.0).with_nodes_processed(1));
        }

        let heuristic = &self.heuristic;
        let f_fwd = |node: &Node| {
            estimated_cost(heuristic, problem_fwd.graph, node, problem_fwd.destination)
        };
        let f_bwd = |node: &Node| {
            estimated_cost(heuristic, problem_bwd.graph, node, problem_bwd.destination)
        };

        self.space_fwd.start(source, f_fwd(&Node::root(source)));
        self.space_bwd.start(destination, f_bwd(&Node::root(destination)));

        let mut best: Option<Meeting> = None;

        loop {
            let (direction, priority) = match (
                self.space_fwd.peek_priority(),
                self.space_bwd.peek_priority(),
            ) {
                (None, None) => break,
                (Some(fwd), Some(bwd)) if fwd <= bwd => (Direction::Forward, fwd),
                (Some(fwd), None) => (Direction::Forward, fwd),
                (_, Some(bwd)) => (Direction::Backward, bwd),
            };

            if let (StoppingRule::Optimal, Some(meeting)) = (self.stopping_rule, &best) {
                if priority >= meeting.weight {
                    break;
                }
            }

            self.stats.nodes_settled += 1;

            let meeting = match direction {
                Direction::Forward => expand(
                    Direction::Forward,
                    &mut self.space_fwd,
                    &self.space_bwd,
                    problem_fwd.graph,
                    self.stopping_rule,
                    &f_fwd,
                ),
                Direction::Backward => expand(
                    Direction::Backward,
                    &mut self.space_bwd,
                    &self.space_fwd,
                    problem_bwd.graph,
                    self.stopping_rule,
                    &f_bwd,
                ),
            };

            if let Some(meeting) = meeting {
                match self.stopping_rule {
                    StoppingRule::FirstMeeting => {
                        best = Some(meeting);
                        break;
                    }
                    StoppingRule::Optimal => {
                        if best.map_or(true, |best| meeting.weight < best.weight) {
                            debug!(
                                "New best connection via {} with weight {}",
                                meeting.vertex, meeting.weight
                            );
                            best = Some(meeting);
                        }
                    }
                }
            }
        }

        self.stats.finish();

        match best {
            Some(meeting) => {
                let sp = self.assemble_path(&meeting);
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

    /// Forward path to the meeting vertex followed by the reversed backward
    /// path, the meeting vertex appears once.
    fn assemble_path(&self, meeting: &Meeting) -> ShortestPath {
        let (own, other) = match meeting.direction {
            Direction::Forward => (&self.space_fwd, &self.space_bwd),
            Direction::Backward => (&self.space_bwd, &self.space_fwd),
        };

        let mut own_path = meeting
            .own_parent
            .map(|parent| own.solution(parent))
            .unwrap_or_default();
        own_path.push(meeting.vertex);
        let other_path = other.solution(meeting.other);

        let (mut fwd_path, bwd_path) = match meeting.direction {
            Direction::Forward => (own_path, other_path),
            Direction::Backward => (other_path, own_path),
        };

        fwd_path.extend(bwd_path.into_iter().rev().skip(1));

        ShortestPath::new(fwd_path, meeting.weight).with_nodes_processed(
            self.space_fwd.num_reached() + self.space_bwd.num_reached(),
        )
    }
}

/// Pops the minimum of `own`, relaxes its children and looks them up in
/// `other`.
///
/// With [`StoppingRule::FirstMeeting`] the first child already reached by
/// `other` ends the expansion. With [`StoppingRule::Optimal`] all children are
/// relaxed and the cheapest connection over the recorded nodes is returned.
fn expand<F>(
    direction: Direction,
    own: &mut SearchSpace,
    other: &SearchSpace,
    graph: &Graph,
    stopping_rule: StoppingRule,
    f: &F,
) -> Option<Meeting>
where
    F: Fn(&Node) -> Weight,
{
    let current = own.pop()?;
    let node = own.node(current).clone();

    let mut best: Option<Meeting> = None;

    for child in node.expand(current, graph) {
        let vertex = child.value;
        let child_cost = child.path_cost;
        own.relax(child, f);

        let Some(other_node) = other.reached(vertex) else {
            continue;
        };
        let other_cost = other.node(other_node).path_cost;

        match stopping_rule {
            StoppingRule::FirstMeeting => {
                return Some(Meeting {
                    direction,
                    own_parent: Some(current),
                    vertex,
                    other: other_node,
                    weight: child_cost + other_cost,
                });
            }
            StoppingRule::Optimal => {
                // Connect over the node recorded for `vertex`, which is at
                // least as cheap as `child`
                let Some(own_node) = own.reached(vertex) else {
                    continue;
                };
                let weight = own.node(own_node).path_cost + other_cost;
                if best.map_or(true, |best| weight < best.weight) {
                    best = Some(Meeting {
                        direction,
                        own_parent: own.node(own_node).parent,
                        vertex,
                        other: other_node,
                        weight,
                    });
                }
            }
        }
    }

    best
}

impl<'a, H> PathFinder for BiDirAStar<'a, H>
where
    H: Fn(&Coordinate, &Coordinate) -> Weight,
{
    fn query(&mut self, source: VertexId, destination: VertexId) -> Option<ShortestPath> {
        BiDirAStar::query(self, source, destination)
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::{
        edge,
        graph::vertex_id,
        heuristics::{great_circle, null_heuristic},
        search::{assert_no_path, assert_path, dijkstra::Dijkstra},
        util::test_graphs::{generate_complex_graph, generate_random_graph, generate_simple_graph},
        vertex,
    };

    use super::*;

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn search_on_simple_graph() {
        init_log();
        let g = generate_simple_graph();
        let mut bidir = BiDirAStar::new(&g, great_circle);

        // Forward reaches 2 and 3 from 1, the backward search then finds 3
        // through the edge 3 -> 4
        let sp = bidir.query(1.into(), 4.into());
        assert_eq!(sp.as_ref().map(|sp| sp.nodes_processed), Some(5));
        assert_path(vec![1, 3, 4], 6.0, sp);

        assert_path(vec![2, 3, 4], 2.0, bidir.query(2.into(), 4.into()));
        assert_path(vec![3], 0.0, bidir.query(3.into(), 3.into()));

        let mut bidir = bidir.with_stopping_rule(StoppingRule::Optimal);
        assert_path(vec![1, 2, 3, 4], 3.0, bidir.query(1.into(), 4.into()));
    }

    #[test]
    fn direct_edge() {
        let g = generate_simple_graph();
        let mut bidir = BiDirAStar::new(&g, great_circle);

        assert_path(vec![3, 4], 1.0, bidir.query(3.into(), 4.into()));
    }

    #[test]
    fn no_path() {
        let g = generate_simple_graph();
        let mut bidir = BiDirAStar::new(&g, great_circle);

        assert_no_path(bidir.query(1.into(), 5.into()));
        assert_no_path(bidir.query(4.into(), 1.into()));
        assert_no_path(bidir.query(1.into(), 42.into()));

        let mut bidir = bidir.with_stopping_rule(StoppingRule::Optimal);
        assert_no_path(bidir.query(1.into(), 5.into()));
        assert_no_path(bidir.query(4.into(), 1.into()));
    }

    #[test]
    fn first_meeting_is_not_always_shortest() {
        // 1 -> 2 -> 3 costs 10, 1 -> 4 -> 5 -> 3 costs 3. The forward search
        // expands 1 and produces 2 and 4, the backward search expands 3 and
        // finds 2, which is already known to the forward search.
        let mut g = Graph::new();
        for i in 1..=5 {
            vertex!(g, i, 0, 0);
        }
        g.add_edge(edge!(1u32 => 2u32, 5.0));
        g.add_edge(edge!(2u32 => 3u32, 5.0));
        g.add_edge(edge!(1u32 => 4u32, 1.0));
        g.add_edge(edge!(4u32 => 5u32, 1.0));
        g.add_edge(edge!(5u32 => 3u32, 1.0));

        let mut bidir = BiDirAStar::new(&g, null_heuristic);
        assert_eq!(bidir.stopping_rule(), StoppingRule::FirstMeeting);
        assert_path(vec![1, 2, 3], 10.0, bidir.query(1.into(), 3.into()));

        let mut bidir = bidir.with_stopping_rule(StoppingRule::Optimal);
        assert_path(vec![1, 4, 5, 3], 3.0, bidir.query(1.into(), 3.into()));
    }

    #[test]
    fn ties_expand_forward_first() {
        // 3 -> 1, 3 -> 2, 3 -> 4. Both sides start with priority 0. Expanding
        // 3 first reaches 1, 2 and 4, expanding 4 first would only reach 3.
        let mut g = Graph::new();
        for i in 1..=4 {
            vertex!(g, i, 0, 0);
        }
        g.add_edge(edge!(3u32 => 1u32, 1.0));
        g.add_edge(edge!(3u32 => 2u32, 1.0));
        g.add_edge(edge!(3u32 => 4u32, 1.0));

        let mut bidir = BiDirAStar::new(&g, null_heuristic);
        let sp = bidir.query(3.into(), 4.into());

        assert_eq!(bidir.stats.nodes_settled, 1);
        assert_eq!(sp.as_ref().map(|sp| sp.nodes_processed), Some(5));
        assert_path(vec![3, 4], 1.0, sp);
    }

    fn test_search(g: &Graph, a: u32, b: u32) {
        let mut dijkstra = Dijkstra::new(g);
        let mut first_meeting = BiDirAStar::new(g, great_circle);
        let mut optimal =
            BiDirAStar::new(g, great_circle).with_stopping_rule(StoppingRule::Optimal);

        let expected = dijkstra.search(a.into(), b.into());
        let sp_first = first_meeting.query(a.into(), b.into());
        let sp_optimal = optimal.query(a.into(), b.into());

        match (expected, sp_first, sp_optimal) {
            (Some(expected), Some(sp_first), Some(sp_optimal)) => {
                for sp in [&sp_first, &sp_optimal] {
                    // Every step is an edge of the forward graph
                    assert_abs_diff_eq!(
                        g.path_weight(&sp.nodes).unwrap(),
                        sp.weight,
                        epsilon = 1e-6
                    );
                    assert_eq!(sp.nodes.first(), Some(&vertex_id(a)));
                    assert_eq!(sp.nodes.last(), Some(&vertex_id(b)));
                }
                assert!(sp_first.weight >= expected.weight - 1e-6);
                assert_abs_diff_eq!(sp_optimal.weight, expected.weight, epsilon = 1e-6);
            }
            (None, None, None) => {}
            (expected, sp_first, sp_optimal) => panic!(
                "Searches disagree on reachability: {:?} / {:?} / {:?}",
                expected, sp_first, sp_optimal
            ),
        }
    }

    #[test]
    fn search_on_complex_graph() {
        init_log();
        let g = generate_complex_graph();

        for a in g.vertices() {
            for b in g.vertices() {
                test_search(&g, a.value(), b.value());
            }
        }
    }

    #[test]
    fn search_on_random_graph() {
        init_log();
        let g = generate_random_graph(12, 12, 42);
        let num_vertices = g.num_vertices() as u32;

        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(&(1..=num_vertices, 1..=num_vertices), |(a, b)| {
                test_search(&g, a, b);
                Ok(())
            })
            .unwrap();
    }
}
