//! Benchmarks for distance metrics and projection kernels.
//!
//! Run with: `cargo bench -p embedset-vector`
//!
//! Compare SIMD vs scalar: `cargo bench -p embedset-vector --features scalar`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use embedset_vector::algebra::{orthogonalize, project_onto};
use embedset_vector::DistanceMetric;
use rand::Rng;

/// Generate a random vector of the specified dimension.
fn random_vector(dim: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Benchmark every metric across common embedding dimensions.
fn bench_metrics(c: &mut Criterion) {
    for metric in DistanceMetric::ALL {
        let mut group = c.benchmark_group(format!("distance/{metric}"));

        for dim in [50, 300, 768, 1536] {
            let a = random_vector(dim);
            let b = random_vector(dim);

            group.throughput(Throughput::Elements(dim as u64));
            group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |bench, _| {
                bench.iter(|| metric.calculate(black_box(&a), black_box(&b)));
            });
        }

        group.finish();
    }
}

/// Benchmark projection and orthogonalization against a fixed axis.
fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for dim in [50, 300, 768] {
        let a = random_vector(dim);
        let axis = random_vector(dim);

        group.throughput(Throughput::Elements(dim as u64));
        group.bench_with_input(BenchmarkId::new("project_onto", dim), &dim, |bench, _| {
            bench.iter(|| project_onto(black_box(&a), black_box(&axis)));
        });
        group.bench_with_input(BenchmarkId::new("orthogonalize", dim), &dim, |bench, _| {
            bench.iter(|| orthogonalize(black_box(&a), black_box(&axis)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_metrics, bench_projection);
criterion_main!(benches);
