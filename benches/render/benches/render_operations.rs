use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

mod fixtures;
mod workload;

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let queries = fixtures::load_test_queries();
    for (name, query) in queries.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), query, |b, query| {
            b.iter(|| workload::run_render_scenario(black_box(query)))
        });
    }

    group.finish();
}

fn benchmark_repeated_render(c: &mut Criterion) {
    c.bench_function("repeated_render_100x", |b| {
        let queries = fixtures::load_test_queries();
        let (_, joined_aggregate) = &queries[2];
        b.iter(|| workload::run_repeated_render(black_box(joined_aggregate), 100))
    });
}

criterion_group!(benches, benchmark_render, benchmark_repeated_render);
criterion_main!(benches);
