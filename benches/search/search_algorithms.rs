use alt_core::{
    graph::{vertex_id, Graph},
    heuristics::{great_circle, null_heuristic},
    landmark_params::LandmarkParams,
    landmarks::LandmarkPreprocessor,
    search::{
        astar::AStar,
        bidir_astar::{BiDirAStar, StoppingRule},
        dijkstra::Dijkstra,
        landmark_astar::LandmarkAStar,
    },
    util::test_graphs::generate_random_graph,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn random_queries(g: &Graph, n: usize, rng: &mut StdRng) -> Vec<(u32, u32)> {
    let num_vertices = g.num_vertices() as u32;
    (0..n)
        .map(|_| {
            (
                rng.gen_range(1..=num_vertices),
                rng.gen_range(1..=num_vertices),
            )
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let graphs: Vec<Graph> = [(20, 20), (50, 50), (100, 100)]
        .iter()
        .map(|(rows, cols)| generate_random_graph(*rows, *cols, 187))
        .collect();

    let mut group = c.benchmark_group("search_algorithms");
    let mut rng: StdRng = rand::SeedableRng::seed_from_u64(187);

    for graph in &graphs {
        let size = graph.num_vertices();
        let queries = random_queries(graph, 50, &mut rng);

        let params = LandmarkParams::new().num_landmarks(16);
        let data = LandmarkPreprocessor::new(graph, great_circle, params)
            .run(&mut StdRng::seed_from_u64(187));

        group.bench_with_input(BenchmarkId::new("Dijkstra", size), graph, |b, g| {
            let mut dijkstra = Dijkstra::new(g);
            b.iter(|| {
                for &(s, t) in &queries {
                    black_box(dijkstra.search(vertex_id(s), vertex_id(t)));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("AStar (null)", size), graph, |b, g| {
            let mut astar = AStar::new(g, null_heuristic);
            b.iter(|| {
                for &(s, t) in &queries {
                    black_box(astar.query(vertex_id(s), vertex_id(t)));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("AStar", size), graph, |b, g| {
            let mut astar = AStar::new(g, great_circle);
            b.iter(|| {
                for &(s, t) in &queries {
                    black_box(astar.query(vertex_id(s), vertex_id(t)));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("BiDirAStar", size), graph, |b, g| {
            let mut bidir = BiDirAStar::new(g, great_circle);
            b.iter(|| {
                for &(s, t) in &queries {
                    black_box(bidir.query(vertex_id(s), vertex_id(t)));
                }
            });
        });
        group.bench_with_input(
            BenchmarkId::new("BiDirAStar (optimal)", size),
            graph,
            |b, g| {
                let mut bidir =
                    BiDirAStar::new(g, great_circle).with_stopping_rule(StoppingRule::Optimal);
                b.iter(|| {
                    for &(s, t) in &queries {
                        black_box(bidir.query(vertex_id(s), vertex_id(t)));
                    }
                });
            },
        );
        group.bench_with_input(BenchmarkId::new("ALT", size), graph, |b, g| {
            let mut alt = LandmarkAStar::new(g, &data, great_circle);
            b.iter(|| {
                for &(s, t) in &queries {
                    black_box(alt.query(vertex_id(s), vertex_id(t)));
                }
            });
        });
    }
    group.finish();
}
