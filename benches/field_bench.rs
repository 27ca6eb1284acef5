//! Benchmarks for the simulation step and the CPU compositor.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cosmic_field::compositor::composite;
use cosmic_field::field::{Bounds, FieldState};
use cosmic_field::raster::Raster;
use cosmic_field::simulation::step;
use cosmic_field::spawn::Seeder;
use cosmic_field::FieldConfig;

const DT: f32 = 1.0 / 60.0;

fn field(config: &FieldConfig, width: f32, height: f32) -> FieldState {
    FieldState::with_seeder(
        config,
        Bounds::new(width, height),
        config.is_compact(width),
        Seeder::from_seed(1),
    )
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for stars in [110usize, 220, 1000] {
        group.bench_with_input(BenchmarkId::new("stars", stars), &stars, |b, &stars| {
            let config = FieldConfig::new().with_star_count(stars);
            let mut state = field(&config, 1920.0, 1080.0);
            b.iter(|| {
                step(&mut state, DT);
                black_box(state.particles.len())
            })
        });
    }

    group.finish();
}

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");
    group.sample_size(20);

    for (width, height) in [(640u32, 360u32), (1280, 720), (1920, 1080)] {
        group.bench_with_input(
            BenchmarkId::new("frame", format!("{}x{}", width, height)),
            &(width, height),
            |b, &(width, height)| {
                let config = FieldConfig::new();
                let mut state = field(&config, width as f32, height as f32);
                let mut raster = Raster::new(width, height);
                for _ in 0..120 {
                    step(&mut state, DT);
                }
                b.iter(|| {
                    composite(&state, &mut raster);
                    black_box(raster.pixels().len())
                })
            },
        );
    }

    group.finish();
}

fn bench_to_rgba8(c: &mut Criterion) {
    let config = FieldConfig::new();
    let state = field(&config, 1280.0, 720.0);
    let mut raster = Raster::new(1280, 720);
    composite(&state, &mut raster);

    c.bench_function("to_rgba8_1280x720", |b| b.iter(|| black_box(raster.to_rgba8())));
}

criterion_group!(benches, bench_step, bench_composite, bench_to_rgba8);
criterion_main!(benches);
