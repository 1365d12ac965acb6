//! Benchmarks for the genetic string optimizer.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use string_evolve::{
    FitnessStrategy, Genome, Optimizer, OptimizerConfig,
    compute::evolution::{CharacterDistance, EditDistance, FitnessFunction},
};

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness");

    for length in [8, 32, 128] {
        let target: Genome = (0..length).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let candidate: Genome = (0..length).map(|i| char::from(b'A' + (i % 26) as u8)).collect();
        let edit = EditDistance::default();

        group.bench_with_input(
            BenchmarkId::new("character_distance", length),
            &length,
            |b, _| {
                b.iter(|| CharacterDistance.fitness(black_box(&candidate), black_box(&target)));
            },
        );
        group.bench_with_input(BenchmarkId::new("edit_distance", length), &length, |b, _| {
            b.iter(|| edit.fitness(black_box(&candidate), black_box(&target)));
        });
    }

    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    group.sample_size(10);

    for strategy in FitnessStrategy::ALL {
        for population_size in [10, 50, 100] {
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), population_size),
                &population_size,
                |b, &size| {
                    b.iter(|| {
                        let config =
                            OptimizerConfig::new("How?", size, 200, strategy).with_seed(42);
                        Optimizer::new(config).map(|optimizer| black_box(optimizer.optimize()))
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_fitness, bench_optimize);
criterion_main!(benches);
