//! Benchmark for tile queries and the water step.
//!
//! TARGET: a full-screen draw region well under one frame (16ms)
//!
//! Run with: cargo bench --package delve_world --bench world_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use delve_world::{Tile, Viewport, WaterFlowSimulator, World};

fn benchmark_baseline_lookup(c: &mut Criterion) {
    let world = World::default();

    let mut group = c.benchmark_group("baseline_lookup");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("10k_get_tile", |b| {
        b.iter(|| {
            for i in 0..10_000 {
                black_box(world.get_tile(black_box(i % 100), black_box(i / 100)));
            }
        });
    });
    group.finish();
}

fn benchmark_draw_region(c: &mut Criterion) {
    let mut world = World::default();
    for x in -30..30 {
        world.carve(x, 12);
    }
    let viewport = Viewport::new(-400.0, 0.0, 800.0, 600.0);

    c.bench_function("draw_region_800x600", |b| {
        b.iter(|| black_box(world.draw_region(black_box(&viewport))));
    });
}

fn benchmark_water_step(c: &mut Criterion) {
    let sim = WaterFlowSimulator::new();

    c.bench_function("water_step_100_sources", |b| {
        b.iter_batched(
            || {
                let mut world = World::default();
                for x in 0..100 {
                    world.set_tile(x, 0, Tile::source());
                }
                world
            },
            |mut world| {
                for _ in 0..8 {
                    black_box(sim.step(&mut world));
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_baseline_lookup,
    benchmark_draw_region,
    benchmark_water_step
);
criterion_main!(benches);
