use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eppstein_ksp::graph::generators::{grid_graph, random_graph};
use eppstein_ksp::{Eppstein, KspQuery};

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("eppstein_random");
    for &n in &[1_000usize, 10_000] {
        let graph = random_graph(n, n * 4, 100, 42);
        let query = KspQuery::new(0, n - 1, 1_000);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let result = Eppstein::new()
                    .k_shortest_paths(black_box(&graph), black_box(&query))
                    .unwrap();
                black_box(result.len())
            });
        });
    }
    group.finish();
}

fn bench_extract_only(c: &mut Criterion) {
    let graph = grid_graph(100, 100, 20, 7);
    let engine = Eppstein::new().prepare(&graph, 0, 100 * 100 - 1).unwrap();
    let mut group = c.benchmark_group("eppstein_extract");
    for &k in &[10usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| black_box(engine.extract(k).unwrap().len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_random, bench_extract_only);
criterion_main!(benches);
