//! Criterion benchmarks for the CRR lattice pricer.
//!
//! Benchmarks cover:
//! - Full pricing runs across step counts (American put)
//! - European versus American induction cost
//! - Sequential versus rayon row evaluation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::instruments::{ExerciseStyle, PayoffType};
use pricer_pricing::lattice::{price, LatticeBuilder, LatticeConfig, ModelParams};

fn put_params(steps: usize, exercise: ExerciseStyle) -> ModelParams {
    ModelParams::builder()
        .spot(100.0)
        .strike(100.0)
        .rate(0.03)
        .volatility(0.2)
        .maturity(1.0)
        .steps(steps)
        .payoff(PayoffType::Put)
        .exercise(exercise)
        .build()
        .unwrap()
}

/// Benchmark lattice construction alone.
fn bench_lattice_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice_build");

    for steps in [100, 500, 2_000] {
        let params = put_params(steps, ExerciseStyle::American);
        group.bench_with_input(BenchmarkId::new("spot_lattice", steps), &params, |b, p| {
            b.iter(|| black_box(LatticeBuilder::build(black_box(p)).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark full pricing runs by style and step count.
fn bench_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("crr_pricing");
    group.sample_size(30);

    let config = LatticeConfig::default();
    for steps in [100, 500, 2_000] {
        for exercise in [ExerciseStyle::European, ExerciseStyle::American] {
            let params = put_params(steps, exercise);
            group.bench_with_input(
                BenchmarkId::new(format!("{}_put", exercise), steps),
                &params,
                |b, p| b.iter(|| black_box(price(black_box(p), &config).unwrap().price())),
            );
        }
    }

    group.finish();
}

/// Benchmark sequential against parallel row evaluation.
fn bench_parallel_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_rows");
    group.sample_size(20);

    let params = put_params(4_000, ExerciseStyle::American);
    let sequential = LatticeConfig::default();
    let parallel = LatticeConfig::builder()
        .parallel_threshold(512)
        .build()
        .unwrap();

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(price(&params, &sequential).unwrap().price()))
    });
    group.bench_function("rayon_512", |b| {
        b.iter(|| black_box(price(&params, &parallel).unwrap().price()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lattice_build,
    bench_pricing,
    bench_parallel_rows
);
criterion_main!(benches);
