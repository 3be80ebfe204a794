//! Benchmarks for the per-frame particle step.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nimbus::{ParticleField, WeatherKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_field_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");
    let mut rng = StdRng::seed_from_u64(1);

    for kind in [WeatherKind::Rain, WeatherKind::Snow, WeatherKind::Cloud, WeatherKind::Clear] {
        for count in [100u32, 10_000] {
            let mut field = ParticleField::spawn(kind, count, &mut rng).expect("kind has particles");
            let mut t = 0.0f32;
            group.bench_with_input(BenchmarkId::new(kind.name(), count), &count, |b, _| {
                b.iter(|| {
                    t += 1.0 / 60.0;
                    field.step(black_box(t), 1.0);
                })
            });
        }
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify", |b| {
        b.iter(|| WeatherKind::classify(black_box("Light Intensity Drizzle Rain")))
    });
}

criterion_group!(benches, bench_field_step, bench_classify);
criterion_main!(benches);
