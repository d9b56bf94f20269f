//! Criterion benchmarks for the branch-and-bound engine.
//!
//! Measures the objective enclosure on its own and full runs for small
//! point counts, with and without a seeded threshold.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polycube_bound::bnb::{BnbConfig, BnbRunner, SplitStrategy};
use polycube_bound::hint::{search_hint, HintConfig};
use polycube_bound::objective::{IntervalObjective, PairwiseDistance};
use polycube_bound::polycube::Polycube;

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_objective_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("objective_bound");
    let objective = PairwiseDistance::default();

    for &n in &[3usize, 5, 8] {
        let cube = Polycube::initial(n).expect("valid n");
        group.bench_with_input(BenchmarkId::from_parameter(n), &cube, |b, cube| {
            b.iter(|| black_box(objective.bound(black_box(cube))))
        });
    }
    group.finish();
}

fn bench_bnb_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_run");
    group.sample_size(10);
    let objective = PairwiseDistance::default();

    for (n, iterations, strategy) in [
        (3usize, 12usize, SplitStrategy::RoundRobin),
        (3, 12, SplitStrategy::Widest),
        (4, 14, SplitStrategy::RoundRobin),
    ] {
        let config = BnbConfig::default()
            .with_n(n)
            .with_max_iterations(iterations)
            .with_split_strategy(strategy);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_i{}_{:?}", n, iterations, strategy), n),
            &config,
            |b, config| {
                b.iter(|| {
                    let result = BnbRunner::run(black_box(&objective), black_box(config));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_bnb_seeded(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_seeded");
    group.sample_size(10);
    let objective = PairwiseDistance::default();

    for &n in &[3usize, 4] {
        let hint = search_hint(&objective, n, &HintConfig::default().with_seed(42)).expect("valid hint");
        let config = BnbConfig::default()
            .with_n(n)
            .with_max_iterations(14)
            .with_hint(hint.point);
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, config| {
            b.iter(|| {
                let result = BnbRunner::run(black_box(&objective), black_box(config));
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_objective_bound, bench_bnb_run, bench_bnb_seeded);
criterion_main!(benches);
