use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, Criterion};
use dimacs_reader::RoadGraph;

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn criterion_benchmark(c: &mut Criterion) {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../crates/dimacs_reader/test_data");
    let co = dir.join("tiny.co");
    let gr = dir.join("tiny.gr");

    c.bench_function("parse_dimacs", |b| {
        b.iter(|| RoadGraph::from_dimacs(&co, &gr, None).unwrap())
    });
}
