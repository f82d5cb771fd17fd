//! Benchmarks for the per-tick CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use yulemorph::{GestureBridge, HandFrame, HeadlessSurface, MorphConfig, MorphEngine, ParticleStore, Shape};

fn bench_particles(c: &mut Criterion) {
    let mut group = c.benchmark_group("particles");

    for count in [1_000, 3_000, 10_000] {
        let config = MorphConfig::default().with_particle_count(count);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut store = ParticleStore::new(&config, &mut rng);

        group.bench_with_input(BenchmarkId::new("advance", count), &count, |b, _| {
            b.iter(|| store.advance(black_box(0.08)))
        });

        group.bench_with_input(
            BenchmarkId::new("regenerate_targets", count),
            &count,
            |b, _| {
                let mut shape = Shape::Tree;
                b.iter(|| {
                    shape = shape.toggled();
                    store.regenerate_targets(black_box(shape), &mut rng)
                })
            },
        );
    }

    group.finish();
}

fn bench_engine_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    group.bench_function("tick_tree", |b| {
        let mut engine = MorphEngine::with_seed(MorphConfig::default(), 16.0 / 9.0, 1);
        let mut surface = HeadlessSurface::new(1280, 720);
        engine.attach(&mut surface);
        b.iter(|| engine.tick(black_box(1.0 / 60.0), &mut surface))
    });

    group.bench_function("tick_revealed", |b| {
        let mut engine = MorphEngine::with_seed(MorphConfig::default(), 16.0 / 9.0, 1);
        let mut surface = HeadlessSurface::new(1280, 720);
        engine.attach(&mut surface);
        engine.set_shape(Shape::Explode);
        b.iter(|| engine.tick(black_box(1.0 / 60.0), &mut surface))
    });

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let bridge = GestureBridge::new();
    let frame = HandFrame::open_palm();
    c.bench_function("classify_open_palm", |b| {
        b.iter(|| bridge.classify(black_box(&frame)))
    });
}

criterion_group!(benches, bench_particles, bench_engine_tick, bench_classify);
criterion_main!(benches);
