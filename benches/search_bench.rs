//! Criterion benchmarks for the three search strategies.
//!
//! Instances come from the ground-truth generator with fixed seeds, so
//! every run searches the same family and target.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_setexpr::domain::Bitset;
use u_setexpr::exhaustive::{ExhaustiveConfig, ExhaustiveRunner};
use u_setexpr::ga::{NsgaConfig, NsgaRunner};
use u_setexpr::generator::{GeneratorConfig, GroundTruthConfig, GroundTruthInstance};
use u_setexpr::greedy::{GreedyConfig, GreedyRunner, HillClimbConfig, HillClimbRunner};
use u_setexpr::instance::Instance;

fn ground_truth(family: usize, max_ops: usize, seed: u64) -> Instance {
    let config = GroundTruthConfig::default()
        .with_generator(GeneratorConfig::default().with_family_range(family, family))
        .with_max_ops(max_ops)
        .with_seed(seed);
    GroundTruthInstance::generate(&config)
        .expect("valid generator config")
        .instance()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_set_algebra(c: &mut Criterion) {
    let a = Bitset::from_elements((0..128).step_by(3)).expect("in range");
    let b = Bitset::from_elements((0..128).step_by(5)).expect("in range");
    c.bench_function("bitset_ops", |bench| {
        bench.iter(|| {
            let u = black_box(a).union(&black_box(b));
            let i = a.intersect(&b);
            let d = u.difference(&i);
            black_box(d.len())
        })
    });
}

fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive");
    group.sample_size(10);

    for (family, k) in [(4usize, 2usize), (6, 2), (4, 3)] {
        let instance = ground_truth(family, k, 42);
        let config = ExhaustiveConfig::default().with_max_ops(k);
        group.bench_with_input(
            BenchmarkId::new(format!("f{family}_k{k}"), k),
            &(instance, config),
            |b, (inst, cfg)| {
                b.iter(|| {
                    let result = ExhaustiveRunner::run(black_box(inst), black_box(cfg));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    group.sample_size(10);

    for &k in &[3usize, 5, 8] {
        let instance = ground_truth(10, k, 7);
        group.bench_with_input(BenchmarkId::new("frontier", k), &instance, |b, inst| {
            let config = GreedyConfig::default().with_max_ops(k);
            b.iter(|| black_box(GreedyRunner::run(black_box(inst), &config)))
        });
        group.bench_with_input(BenchmarkId::new("hill_climb", k), &instance, |b, inst| {
            let config = HillClimbConfig::default().with_max_ops(k);
            b.iter(|| black_box(HillClimbRunner::run(black_box(inst), &config)))
        });
    }
    group.finish();
}

fn bench_nsga(c: &mut Criterion) {
    let mut group = c.benchmark_group("nsga");
    group.sample_size(10);

    for (pop, gens) in [(50usize, 20usize), (200, 10)] {
        let instance = ground_truth(8, 6, 1030);
        let config = NsgaConfig::default()
            .with_population_size(pop)
            .with_max_generations(gens)
            .with_max_ops(6)
            .with_stop_on_perfect(false)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("p{pop}_g{gens}"), pop),
            &(instance, config),
            |b, (inst, cfg)| {
                b.iter(|| {
                    let result = NsgaRunner::run(black_box(inst), black_box(cfg));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_set_algebra,
    bench_exhaustive,
    bench_greedy,
    bench_nsga
);
criterion_main!(benches);
