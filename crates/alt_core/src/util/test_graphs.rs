use std::path::Path;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    edge,
    graph::{Coordinate, Graph, VertexId},
    heuristics::great_circle,
    vertex,
};

pub fn generate_complex_graph() -> Graph {
    let mut graph = Graph::new();

    let a = vertex!(graph, 1, 6, 2);
    let b = vertex!(graph, 2, 3, 3);
    let c = vertex!(graph, 3, 4, 6);
    let d = vertex!(graph, 4, 2, 7);
    let e = vertex!(graph, 5, 3, 10);
    let f = vertex!(graph, 6, 2, 13);
    let g = vertex!(graph, 7, 7, 15);
    let h = vertex!(graph, 8, 5, 12);
    let i = vertex!(graph, 9, 7, 11);
    let j = vertex!(graph, 10, 5, 9);
    let k = vertex!(graph, 11, 7, 7);

    graph.add_edges(edge!(a, b, 3.0)); // A <=> B
    graph.add_edges(edge!(a, c, 5.0)); // A <=> C
    graph.add_edges(edge!(a, k, 3.0)); // A <=> K

    graph.add_edges(edge!(b, d, 5.0)); // B <=> D
    graph.add_edges(edge!(b, c, 3.0)); // B <=> C

    graph.add_edges(edge!(c, d, 2.0)); // C <=> D
    graph.add_edges(edge!(c, j, 2.0)); // C <=> J

    graph.add_edges(edge!(d, j, 4.0)); // D <=> J
    graph.add_edges(edge!(d, e, 7.0)); // D <=> E

    graph.add_edges(edge!(e, j, 3.0)); // E <=> J
    graph.add_edges(edge!(e, f, 6.0)); // E <=> F

    graph.add_edges(edge!(f, h, 2.0)); // F <=> H
    graph.add_edges(edge!(f, g, 4.0)); // F <=> G

    graph.add_edges(edge!(g, h, 3.0)); // G <=> H
    graph.add_edges(edge!(g, i, 5.0)); // G <=> I

    graph.add_edges(edge!(h, i, 3.0)); // H <=> I
    graph.add_edges(edge!(h, j, 2.0)); // H <=> J

    graph.add_edges(edge!(i, j, 4.0)); // I <=> J
    graph.add_edges(edge!(i, k, 6.0)); // I <=> K

    graph.add_edges(edge!(j, k, 3.0)); // J <=> K

    graph
}

pub fn generate_simple_graph() -> Graph {
    // 1 -> 2 -> 3 -> 4    5
    // |         ^
    // +---------+
    let mut g = Graph::new();

    for i in 1..=5 {
        vertex!(g, i, 0, i as i64);
    }

    g.add_edge(edge!(1u32 => 2u32, 1.0));
    g.add_edge(edge!(2u32 => 3u32, 1.0));
    g.add_edge(edge!(1u32 => 3u32, 5.0));
    g.add_edge(edge!(3u32 => 4u32, 1.0));

    g
}

/// Grid of `rows * cols` vertices roughly 100 m apart, numbered row by row
/// starting at 1. Neighbors are connected in both directions, some streets
/// are one-way. Weights are at least the great-circle distance of their
/// endpoints, so [`great_circle`] is admissible.
pub fn generate_random_graph(rows: u32, cols: u32, seed: u64) -> Graph {
    const SPACING: i64 = 1_000;
    const ORIGIN: (i64, i64) = (48_100_000, 11_500_000);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::with_capacity((rows * cols) as usize);

    let id = |row: u32, col: u32| VertexId::new(row * cols + col + 1);
    let coordinate = |v: VertexId| {
        let (row, col) = ((v.value() - 1) / cols, (v.value() - 1) % cols);
        Coordinate::new(
            ORIGIN.0 + row as i64 * SPACING,
            ORIGIN.1 + col as i64 * SPACING,
        )
    };

    for row in 0..rows {
        for col in 0..cols {
            let v = id(row, col);
            g.add_vertex(v, coordinate(v));
        }
    }

    for row in 0..rows {
        for col in 0..cols {
            let from = id(row, col);
            let mut neighbors = Vec::with_capacity(3);
            if col + 1 < cols {
                neighbors.push(id(row, col + 1));
            }
            if row + 1 < rows {
                neighbors.push(id(row + 1, col));
            }
            // Occasional diagonal shortcut
            if row + 1 < rows && col + 1 < cols && rng.gen_bool(0.2) {
                neighbors.push(id(row + 1, col + 1));
            }

            for to in neighbors {
                let distance = great_circle(&coordinate(from), &coordinate(to));
                let weight = (distance * rng.gen_range(1.0..1.5)).ceil();

                match rng.gen_range(0..10) {
                    0 => g.add_edge(edge!(from => to, weight)),
                    1 => g.add_edge(edge!(to => from, weight)),
                    _ => g.add_edges(edge!(from, to, weight)),
                }
            }
        }
    }

    g
}

/// Small excerpt of a road network in DIMACS format
pub fn graph_tiny_dimacs() -> anyhow::Result<Graph> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../dimacs_reader/test_data");

    Graph::from_dimacs(&dir.join("tiny.co"), &dir.join("tiny.gr"), None)
}
