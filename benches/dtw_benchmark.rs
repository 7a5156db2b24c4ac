//! Benchmarks for DTW distance and DTW k-means.

use anofox_cluster::clustering::{
    CostMetric, DbaAggregator, Dtw, DtwKMeans, DtwKMeansConfig, WindowBound, DEFAULT_PATIENCE,
};
use anofox_cluster::core::Sequence;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_sine(n: usize, period: usize, phase: f64) -> Vec<f64> {
    (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * i as f64 / period as f64 + phase).sin())
        .collect()
}

fn generate_collection(count: usize, len: usize) -> Vec<Sequence> {
    (0..count)
        .map(|i| {
            let level = if i % 2 == 0 { 0.0 } else { 5.0 };
            let values = generate_sine(len, 12, i as f64 * 0.1)
                .into_iter()
                .map(|v| v + level)
                .collect();
            Sequence::new(values).unwrap()
        })
        .collect()
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("dtw_distance");

    for size in [64, 128, 256, 512, 1024].iter() {
        let a = generate_sine(*size, 12, 0.0);
        let b = generate_sine(*size, 12, 0.5);

        for window in [1, 10, 50] {
            let dtw = Dtw::new(window, CostMetric::Euclidean).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("window_{window}"), size),
                size,
                |bench, _| bench.iter(|| dtw.distance(black_box(&a), black_box(&b))),
            );
        }
    }

    group.finish();
}

fn bench_distance_vs_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_vs_full_matrix");

    for size in [128, 256, 512].iter() {
        let a = generate_sine(*size, 12, 0.0);
        let b = generate_sine(*size, 12, 0.5);
        let dtw = Dtw::new(*size, CostMetric::Euclidean)
            .unwrap()
            .with_bound(WindowBound::Inclusive);

        group.bench_with_input(BenchmarkId::new("distance", size), size, |bench, _| {
            bench.iter(|| dtw.distance(black_box(&a), black_box(&b)))
        });

        group.bench_with_input(BenchmarkId::new("align", size), size, |bench, _| {
            bench.iter(|| dtw.align(black_box(&a), black_box(&b)).cost())
        });
    }

    group.finish();
}

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("dtw_kmeans");
    group.sample_size(20);

    for count in [20, 50, 100].iter() {
        let data = generate_collection(*count, 64);
        let config = DtwKMeansConfig::new(2)
            .num_iter(10)
            .num_init(3)
            .window(5)
            .seed(42);

        group.bench_with_input(BenchmarkId::new("mean", count), count, |bench, _| {
            bench.iter(|| {
                let mut model = DtwKMeans::new(config.clone()).unwrap();
                model.fit(black_box(&data), DEFAULT_PATIENCE).unwrap();
                model.fitted().map(|m| m.inertia)
            })
        });

        group.bench_with_input(BenchmarkId::new("dba", count), count, |bench, _| {
            bench.iter(|| {
                let model = DtwKMeans::new(config.clone()).unwrap();
                let dba = DbaAggregator::new(*model.dtw()).with_max_iter(3);
                let mut model = model.with_aggregator(dba);
                model.fit(black_box(&data), DEFAULT_PATIENCE).unwrap();
                model.fitted().map(|m| m.inertia)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_distance, bench_distance_vs_align, bench_kmeans);
criterion_main!(benches);
