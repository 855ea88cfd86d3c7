/*
 * Aquarium Simulation Benchmark
 *
 * Measures the per-tick cost of the simulation core: the fish steering pass,
 * the bubble lifecycle pass, and a full tick for schools of various sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nannou::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

use aquarium::{Bubble, BubbleSystem, Fish, Simulation, SimulationParams};

// Benchmark one steering update for every fish in a school
fn bench_fish_steering(c: &mut Criterion) {
    let mut group = c.benchmark_group("fish_steering");
    let params = SimulationParams::default();

    for num_fish in [5, 50, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_fish), num_fish, |b, &n| {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let mut school: Vec<Fish> = (0..n).map(|i| Fish::random(i, &params, &mut rng)).collect();
            let food = Some(vec3(2.0, -1.0, -3.0));

            b.iter(|| {
                for fish in &mut school {
                    fish.update(black_box(food), &params, &mut rng);
                }
            });
        });
    }

    group.finish();
}

// Benchmark the bubble pass over a settled population
fn bench_bubble_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("bubble_update");
    let params = SimulationParams::default();

    for num_bubbles in [15, 150, 1500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_bubbles), num_bubbles, |b, &n| {
            b.iter_batched(
                || {
                    let mut system = BubbleSystem::new();
                    for i in 0..n {
                        // Stagger ages so some pop during the pass
                        let opacity = 0.6 * (i + 1) as f32 / n as f32;
                        system.push(Bubble::new(vec3(0.0, -1.0, 0.0), opacity));
                    }
                    system
                },
                |mut system| black_box(system.update(&params)),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// Benchmark the full tick
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for num_fish in [5, 50, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_fish), num_fish, |b, &n| {
            let params = SimulationParams {
                num_fish: n,
                ..SimulationParams::default()
            };
            let mut sim = Simulation::new(params, 7);
            sim.set_food_from_ndc(vec2(0.0, -0.5));

            b.iter(|| sim.tick());
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_fish_steering, bench_bubble_update, bench_tick
}
criterion_main!(benches);
