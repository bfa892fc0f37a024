//! Tick throughput benchmarks

use civ_conflict::conflict::{Relationship, SimulationContext};
use civ_conflict::core::SimulationConfig;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn fresh(seed: u64) -> SimulationContext {
    match SimulationContext::from_config(SimulationConfig::seeded(seed)) {
        Ok(ctx) => ctx,
        Err(e) => panic!("default config rejected: {}", e),
    }
}

fn bench_advance(c: &mut Criterion) {
    c.bench_function("advance_peace", |b| {
        b.iter_batched(|| fresh(42), |mut ctx| black_box(ctx.advance().is_ok()), BatchSize::SmallInput)
    });

    c.bench_function("advance_war", |b| {
        b.iter_batched(
            || {
                let mut ctx = fresh(42);
                ctx.force_relationship(Relationship::War);
                ctx
            },
            |mut ctx| black_box(ctx.advance().is_ok()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_run(c: &mut Criterion) {
    c.bench_function("run_800_ticks", |b| {
        b.iter_batched(|| fresh(7), |mut ctx| black_box(ctx.run(800)), BatchSize::LargeInput)
    });
}

criterion_group!(benches, bench_advance, bench_run);
criterion_main!(benches);
