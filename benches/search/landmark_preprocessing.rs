use alt_core::{
    heuristics::great_circle,
    landmark_params::{LandmarkParams, Strategy},
    landmarks::LandmarkPreprocessor,
    util::test_graphs::generate_random_graph,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn criterion_benchmark(c: &mut Criterion) {
    let g = generate_random_graph(20, 20, 187);

    let mut group = c.benchmark_group("landmark_preprocessing");
    group.sample_size(10);
    for num_landmarks in [4, 8, 16] {
        for strategy in [Strategy::OneToAll, Strategy::PairwiseQueries] {
            let params = LandmarkParams::new()
                .num_landmarks(num_landmarks)
                .strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), num_landmarks),
                &params,
                |b, params| {
                    b.iter(|| {
                        let mut preprocessor =
                            LandmarkPreprocessor::new(&g, great_circle, *params);
                        preprocessor.run(&mut StdRng::seed_from_u64(187))
                    });
                },
            );
        }
    }
    group.finish();
}
