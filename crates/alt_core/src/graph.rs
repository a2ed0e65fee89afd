use crate::constants::{Weight, COORDINATE_SCALE};
use anyhow::Context;
use dimacs_reader::RoadGraph;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};
use thiserror::Error;

/// Vertex identifier. Road networks number their vertices from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct VertexId(u32);

impl VertexId {
    #[inline]
    pub fn new(x: u32) -> Self {
        VertexId(x)
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for VertexId {
    fn from(id: u32) -> Self {
        VertexId(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short version of `VertexId::new`
pub fn vertex_id(id: u32) -> VertexId {
    VertexId::new(id)
}

/// Position of a vertex in fixed-point units (millionths of a degree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Coordinate {
    pub lat: i64,
    pub lon: i64,
}

impl Coordinate {
    pub fn new(lat: i64, lon: i64) -> Self {
        Coordinate { lat, lon }
    }

    pub fn lat_degrees(&self) -> f64 {
        self.lat as f64 / COORDINATE_SCALE
    }

    pub fn lon_degrees(&self) -> f64 {
        self.lon as f64 / COORDINATE_SCALE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(source: VertexId, target: VertexId, weight: Weight) -> Self {
        Edge {
            source,
            target,
            weight,
        }
    }

    pub(crate) fn reverse(&self) -> Self {
        Edge {
            source: self.target,
            target: self.source,
            weight: self.weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// `path_cost` was asked for a pair of vertices that is not an edge
    #[error("there is no edge from {from} to {to}")]
    MissingEdge { from: VertexId, to: VertexId },
    #[error("vertex {0} is not part of the graph")]
    UnknownVertex(VertexId),
}

/// Supplies the raw data of a road network.
///
/// Implementations apply the vertex limit while reading: every vertex id
/// reported is within `[1, limit]` and so is every arc endpoint.
pub trait GraphDataSource {
    /// Vertex -> coordinate
    fn coordinates(&self) -> impl Iterator<Item = (VertexId, Coordinate)> + '_;

    /// Directed arcs with non-negative weights
    fn arcs(&self) -> impl Iterator<Item = Edge> + '_;

    /// The vertex limit the data was read with
    fn limit(&self) -> Option<u32>;
}

impl GraphDataSource for RoadGraph {
    fn coordinates(&self) -> impl Iterator<Item = (VertexId, Coordinate)> + '_ {
        self.get_nodes()
            .iter()
            .map(|(id, [lat, lon])| (vertex_id(*id), Coordinate::new(*lat, *lon)))
    }

    fn arcs(&self) -> impl Iterator<Item = Edge> + '_ {
        self.get_arcs().iter().map(|arc| {
            Edge::new(
                vertex_id(arc.source),
                vertex_id(arc.target),
                arc.weight as Weight,
            )
        })
    }

    fn limit(&self) -> Option<u32> {
        RoadGraph::limit(self)
    }
}

/// Immutable road network.
///
/// Every vertex has a coordinate and an entry in the adjacency (possibly
/// empty). Outgoing edges of a vertex are kept sorted by target so that
/// expansion order does not depend on insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    coordinates: FxHashMap<VertexId, Coordinate>,
    edges_out: FxHashMap<VertexId, Vec<Edge>>,
    limit: Option<u32>,
    num_edges: usize,
}

impl Graph {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_capacity(num_vertices: usize) -> Self {
        Self {
            coordinates: FxHashMap::with_capacity_and_hasher(num_vertices, Default::default()),
            edges_out: FxHashMap::with_capacity_and_hasher(num_vertices, Default::default()),
            limit: None,
            num_edges: 0,
        }
    }

    /// Adds a vertex or moves an existing one to `coordinate`
    pub fn add_vertex(&mut self, id: VertexId, coordinate: Coordinate) -> VertexId {
        self.coordinates.insert(id, coordinate);
        self.edges_out.entry(id).or_default();
        id
    }

    /// Add a new `edge` to the graph. If the edge already exists the cheaper
    /// weight is kept.
    ///
    /// **Panics** if the source or target vertex does not exist
    /// **Panics** if the weight is negative or NaN
    pub fn add_edge(&mut self, edge: Edge) {
        assert!(
            self.contains(edge.source),
            "Source vertex ({}) does not exist",
            edge.source
        );
        assert!(
            self.contains(edge.target),
            "Target vertex ({}) does not exist",
            edge.target
        );
        assert!(
            edge.weight >= 0.0,
            "Edge {} -> {} has invalid weight {}",
            edge.source,
            edge.target,
            edge.weight
        );

        let edges = self.edges_out.entry(edge.source).or_default();
        match edges.binary_search_by(|e| e.target.cmp(&edge.target)) {
            Ok(pos) => {
                if edge.weight < edges[pos].weight {
                    edges[pos].weight = edge.weight;
                }
            }
            Err(pos) => {
                edges.insert(pos, edge);
                self.num_edges += 1;
            }
        }
    }

    pub fn add_edges(&mut self, edges: Vec<Edge>) {
        for edge in edges {
            self.add_edge(edge);
        }
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.coordinates.contains_key(&v)
    }

    pub fn coordinate(&self, v: VertexId) -> Option<&Coordinate> {
        self.coordinates.get(&v)
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn num_vertices(&self) -> usize {
        self.coordinates.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// All vertex ids in ascending order
    pub fn vertices(&self) -> Vec<VertexId> {
        let mut vertices: Vec<VertexId> = self.coordinates.keys().copied().collect();
        vertices.sort_unstable();
        vertices
    }

    /// Outgoing edges of `v`, sorted by target
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges_out.get(&v).into_iter().flatten()
    }

    /// Vertices reachable from `v` by one edge
    pub fn actions(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.neighbors(v).map(|edge| edge.target)
    }

    /// Weight of the edge `from -> to`
    pub fn path_cost(&self, from: VertexId, to: VertexId) -> Result<Weight, GraphError> {
        self.edges_out
            .get(&from)
            .and_then(|edges| {
                edges
                    .binary_search_by(|e| e.target.cmp(&to))
                    .ok()
                    .map(|pos| edges[pos].weight)
            })
            .ok_or(GraphError::MissingEdge { from, to })
    }

    /// Sum of the edge weights along `path`
    pub fn path_weight(&self, path: &[VertexId]) -> Result<Weight, GraphError> {
        path.windows(2)
            .map(|pair| self.path_cost(pair[0], pair[1]))
            .sum()
    }

    /// Returns a new graph with every edge inverted. Coordinates and limit are
    /// kept, so reversing twice yields the original graph.
    pub fn reverse(&self) -> Graph {
        let mut reversed = Graph::with_capacity(self.num_vertices());
        reversed.limit = self.limit;
        for (id, coordinate) in self.coordinates.iter() {
            reversed.add_vertex(*id, *coordinate);
        }

        for edge in self.edges_out.values().flatten() {
            reversed.add_edge(edge.reverse());
        }

        reversed
    }

    /// Builds a graph from any [`GraphDataSource`]. With a limit every vertex
    /// in `[1, limit]` must have a coordinate.
    pub fn from_source(source: &impl GraphDataSource) -> Result<Self, GraphError> {
        let mut g = Graph::new();
        g.limit = source.limit();

        for (id, coordinate) in source.coordinates() {
            g.add_vertex(id, coordinate);
        }

        if let Some(limit) = g.limit {
            if let Some(missing) = (1..=limit).map(vertex_id).find(|v| !g.contains(*v)) {
                return Err(GraphError::UnknownVertex(missing));
            }
        }

        for edge in source.arcs() {
            for v in [edge.source, edge.target] {
                if !g.contains(v) {
                    return Err(GraphError::UnknownVertex(v));
                }
            }
            g.add_edge(edge);
        }

        Ok(g)
    }

    pub fn from_dimacs(co_path: &Path, gr_path: &Path, limit: Option<u32>) -> anyhow::Result<Self> {
        info!(
            "Reading DIMACS files: {:?} / {:?}",
            co_path.file_name(),
            gr_path.file_name()
        );

        let road_graph = RoadGraph::from_dimacs(co_path, gr_path, limit)
            .context("Could not parse DIMACS files")?;

        let g = Graph::from_source(&road_graph).context("Inconsistent DIMACS files")?;

        info!(
            "Graph has {} vertices and {} edges",
            g.num_vertices(),
            g.num_edges()
        );
        Ok(g)
    }

    pub fn print_info(&self) {
        println!(
            "Graph:\t#Vertices: {}, #Edges: {}, Limit: {:?}",
            self.num_vertices(),
            self.num_edges(),
            self.limit
        );
    }
}

/// A query on a graph: where to start and which vertex is the goal
#[derive(Debug, Clone, Copy)]
pub struct SearchProblem<'a> {
    pub graph: &'a Graph,
    pub source: VertexId,
    pub destination: VertexId,
}

impl<'a> SearchProblem<'a> {
    pub fn new(graph: &'a Graph, source: VertexId, destination: VertexId) -> Self {
        SearchProblem {
            graph,
            source,
            destination,
        }
    }

    pub fn is_goal(&self, v: VertexId) -> bool {
        v == self.destination
    }

    /// Problem on `reversed` (which must be `self.graph.reverse()`) with
    /// source and destination swapped
    pub fn reverse(&self, reversed: &'a Graph) -> SearchProblem<'a> {
        SearchProblem {
            graph: reversed,
            source: self.destination,
            destination: self.source,
        }
    }

    /// Both endpoints must be vertices of the graph
    pub fn validate(&self) -> Result<(), GraphError> {
        for v in [self.source, self.destination] {
            if !self.graph.contains(v) {
                return Err(GraphError::UnknownVertex(v));
            }
        }
        Ok(())
    }
}

/// Macro to create a edge from source to target with a weight
///
/// edge!(1 , 2, 3.0) Returns edge in both directions
///
/// edge!(1 => 2, 3.0) Returns directed edge
#[macro_export]
macro_rules! edge {
    ($source:expr => $target:expr, $weight:expr) => {
        $crate::graph::Edge::new($source.into(), $target.into(), $weight)
    };
    ($source:expr , $target:expr, $weight:expr) => {
        vec![
            $crate::graph::Edge::new($source.into(), $target.into(), $weight),
            $crate::graph::Edge::new($target.into(), $source.into(), $weight),
        ]
    };
}

/// Macro to add a vertex with a given id, lat, lon (fixed-point) to a graph
/// vertex!(g, 1, 48_137_154, 11_576_124)
#[macro_export]
macro_rules! vertex {
    ($g:expr, $id:expr, $lat:expr, $lon:expr) => {
        $g.add_vertex(
            $crate::graph::VertexId::new($id),
            $crate::graph::Coordinate::new($lat, $lon),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::util::test_graphs::{generate_complex_graph, generate_simple_graph};

    use super::*;

    #[test]
    fn read_from_dimacs() {
        let g = Graph::from_dimacs(
            &Path::new(env!("CARGO_MANIFEST_DIR")).join("../dimacs_reader/test_data/tiny.co"),
            &Path::new(env!("CARGO_MANIFEST_DIR")).join("../dimacs_reader/test_data/tiny.gr"),
            None,
        )
        .unwrap();

        assert_eq!(g.num_vertices(), 6);
        assert_eq!(g.num_edges(), 9);
        assert_eq!(g.path_cost(1.into(), 2.into()), Ok(803.0));
    }

    #[test]
    fn limit_fills_isolated_vertices() {
        let g = Graph::from_dimacs(
            &Path::new(env!("CARGO_MANIFEST_DIR")).join("../dimacs_reader/test_data/tiny.co"),
            &Path::new(env!("CARGO_MANIFEST_DIR")).join("../dimacs_reader/test_data/tiny.gr"),
            Some(3),
        )
        .unwrap();

        assert_eq!(g.limit(), Some(3));
        assert_eq!(g.vertices(), vec![vertex_id(1), vertex_id(2), vertex_id(3)]);
        // 3 -> 4 was dropped, so 3 has no outgoing edges left
        assert_eq!(g.actions(3.into()).count(), 0);
    }

    #[test]
    fn add_duplicate_edges() {
        let mut g = Graph::new();
        let a = vertex!(g, 1, 0, 0);
        let b = vertex!(g, 2, 0, 0);

        g.add_edge(edge!(a => b, 2.0));
        g.add_edge(edge!(a => b, 1.0));
        g.add_edge(edge!(a => b, 3.0));

        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.path_cost(a, b), Ok(1.0));
    }

    #[test]
    #[should_panic]
    fn edge_to_unknown_vertex() {
        let mut g = Graph::new();
        let a = vertex!(g, 1, 0, 0);
        g.add_edge(edge!(a => 7u32, 1.0));
    }

    #[test]
    fn actions_and_path_cost() {
        let g = generate_simple_graph();

        assert_eq!(
            g.actions(1.into()).collect::<Vec<_>>(),
            vec![vertex_id(2), vertex_id(3)]
        );
        assert_eq!(g.actions(5.into()).count(), 0);
        assert_eq!(g.actions(42.into()).count(), 0);

        assert_eq!(g.path_cost(1.into(), 3.into()), Ok(5.0));
        assert_eq!(
            g.path_cost(3.into(), 1.into()),
            Err(GraphError::MissingEdge {
                from: 3.into(),
                to: 1.into()
            })
        );
        assert_eq!(
            g.path_weight(&[vertex_id(1), vertex_id(2), vertex_id(3), vertex_id(4)]),
            Ok(3.0)
        );
    }

    #[test]
    fn reverse_inverts_edges() {
        let g = generate_simple_graph();
        let r = g.reverse();

        assert_eq!(r.num_vertices(), g.num_vertices());
        assert_eq!(r.num_edges(), g.num_edges());
        assert_eq!(r.limit(), g.limit());
        assert_eq!(r.path_cost(2.into(), 1.into()), Ok(1.0));
        assert_eq!(r.path_cost(4.into(), 3.into()), Ok(1.0));
        assert!(r.path_cost(1.into(), 2.into()).is_err());
        // 1 has no incoming edges, so it has no outgoing ones in the reverse
        assert_eq!(r.actions(1.into()).count(), 0);
    }

    #[test]
    fn reverse_twice_is_identity() {
        let g = generate_complex_graph();
        assert_eq!(g.reverse().reverse(), g);

        let g = generate_simple_graph();
        assert_eq!(g.reverse().reverse(), g);
    }

    #[test]
    fn search_problem() {
        let g = generate_simple_graph();
        let r = g.reverse();
        let problem = SearchProblem::new(&g, 1.into(), 4.into());

        assert!(problem.is_goal(4.into()));
        assert!(!problem.is_goal(1.into()));
        assert!(problem.validate().is_ok());

        let reversed = problem.reverse(&r);
        assert_eq!(reversed.source, vertex_id(4));
        assert_eq!(reversed.destination, vertex_id(1));

        let unknown = SearchProblem::new(&g, 1.into(), 99.into());
        assert_eq!(
            unknown.validate(),
            Err(GraphError::UnknownVertex(99.into()))
        );
    }
}
