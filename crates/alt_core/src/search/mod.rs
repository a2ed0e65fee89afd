use rustc_hash::FxHashMap;

use crate::{constants::Weight, graph::VertexId, statistics::SearchStats};

use self::shortest_path::ShortestPath;

pub mod astar;
pub mod bidir_astar;
pub mod dijkstra;
pub(crate) mod frontier;
pub mod landmark_astar;
pub mod node;
pub mod shortest_path;

/// Query surface shared by all search engines
pub trait PathFinder {
    /// Shortest path from `source` to `destination` or `None` if the
    /// destination cannot be reached
    fn query(&mut self, source: VertexId, destination: VertexId) -> Option<ShortestPath>;

    /// Statistics of the last query
    fn stats(&self) -> &SearchStats;
}

pub fn reconstruct_path(
    target: VertexId,
    source: VertexId,
    node_data: &FxHashMap<VertexId, (Weight, Option<VertexId>)>,
) -> Option<ShortestPath> {
    let mut path = vec![target];
    let weight = node_data.get(&target)?.0;

    let mut previous_node = node_data.get(&target)?.1?;

    while let Some(prev_node) = node_data.get(&previous_node)?.1 {
        path.push(previous_node);
        previous_node = prev_node;
    }
    path.push(source);
    path.reverse();
    Some(ShortestPath::new(path, weight))
}

#[cfg(test)]
pub(crate) fn assert_path(expected_path: Vec<u32>, expected_weight: Weight, sp: Option<ShortestPath>) {
    let sp = sp.expect("Expected a path, but none was found");
    let expected_path: Vec<VertexId> = expected_path.into_iter().map(VertexId::new).collect();
    assert_eq!(sp.nodes, expected_path);
    approx::assert_abs_diff_eq!(sp.weight, expected_weight, epsilon = 1e-9);
}

#[cfg(test)]
pub(crate) fn assert_no_path(sp: Option<ShortestPath>) {
    assert_eq!(sp, None);
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        graph::Graph,
        heuristics::great_circle,
        landmark_params::LandmarkParams,
        landmarks::LandmarkPreprocessor,
        util::test_graphs::graph_tiny_dimacs,
    };

    use super::{
        astar::AStar,
        bidir_astar::{BiDirAStar, StoppingRule},
        dijkstra::Dijkstra,
        landmark_astar::LandmarkAStar,
        *,
    };

    #[test]
    fn all_engines_on_dimacs_graph() {
        let g: Graph = graph_tiny_dimacs().unwrap();
        let params = LandmarkParams::new().num_landmarks(2);
        let data = LandmarkPreprocessor::new(&g, great_circle, params)
            .run(&mut StdRng::seed_from_u64(187));

        let engines: Vec<Box<dyn PathFinder + '_>> = vec![
            Box::new(Dijkstra::new(&g)),
            Box::new(AStar::new(&g, great_circle)),
            Box::new(BiDirAStar::new(&g, great_circle).with_stopping_rule(StoppingRule::Optimal)),
            Box::new(LandmarkAStar::new(&g, &data, great_circle)),
        ];

        for mut engine in engines {
            // 1 -> 5 -> 6 -> 4 beats 1 -> 5 -> 3 -> 4
            assert_path(vec![1, 5, 6, 4], 4720.0, engine.query(1.into(), 4.into()));
            assert_path(vec![2, 1, 5, 6, 4], 5523.0, engine.query(2.into(), 4.into()));
            // 4 only reaches 3
            assert_no_path(engine.query(4.into(), 1.into()));
            assert_path(vec![4, 3], 158.0, engine.query(4.into(), 3.into()));
            assert!(engine.stats().duration.is_some());
        }
    }

    #[test]
    fn first_meeting_on_dimacs_graph() {
        let g = graph_tiny_dimacs().unwrap();
        let mut bidir = BiDirAStar::new(&g, great_circle);

        let sp = bidir.query(2.into(), 4.into()).unwrap();
        assert_eq!(sp.nodes.first(), Some(&VertexId::new(2)));
        assert_eq!(sp.nodes.last(), Some(&VertexId::new(4)));
        approx::assert_abs_diff_eq!(g.path_weight(&sp.nodes).unwrap(), sp.weight);
    }

    #[test]
    fn reconstruct_from_predecessors() {
        let mut node_data = FxHashMap::default();
        node_data.insert(VertexId::new(1), (0.0, None));
        node_data.insert(VertexId::new(2), (1.0, Some(VertexId::new(1))));
        node_data.insert(VertexId::new(3), (3.0, Some(VertexId::new(2))));

        assert_path(
            vec![1, 2, 3],
            3.0,
            reconstruct_path(3.into(), 1.into(), &node_data),
        );
        assert_no_path(reconstruct_path(4.into(), 1.into(), &node_data));
    }
}
