use criterion::{criterion_group, criterion_main, Criterion, black_box};

use planetforge::generation::{GenerationConfig, GenerationPipeline};
use planetforge::planet::{PlanetConfig, PlanetModel};
use planetforge::{build_column, sample_height};

fn bench_model_creation(c: &mut Criterion) {
    c.bench_function("create_model_earth", |b| {
        b.iter(|| PlanetModel::new(black_box(PlanetConfig::earth_like(12345))).unwrap());
    });
}

fn bench_sample_height(c: &mut Criterion) {
    let desert = PlanetModel::new(PlanetConfig::desert(12345)).unwrap();
    let volcanic = PlanetModel::new(PlanetConfig::volcanic(12345)).unwrap();

    c.bench_function("sample_height_desert", |b| {
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            sample_height(&desert, black_box(i as f64 * 3.7), black_box(i as f64 * -1.3))
        });
    });

    c.bench_function("sample_height_volcanic", |b| {
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            sample_height(&volcanic, black_box(i as f64 * 3.7), black_box(i as f64 * -1.3))
        });
    });
}

fn bench_build_column(c: &mut Criterion) {
    let model = PlanetModel::new(PlanetConfig::earth_like(12345)).unwrap();

    c.bench_function("build_column_earth", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = i.wrapping_add(1);
            build_column(&model, black_box(i), black_box(-i))
        });
    });
}

fn bench_chunk_columns(c: &mut Criterion) {
    let pipeline = GenerationPipeline::new(GenerationConfig::default());
    pipeline.create_planet(PlanetConfig::oceanic(12345)).unwrap();

    c.bench_function("chunk_columns_16x16", |b| {
        let mut cx = 0i32;
        b.iter(|| {
            cx += 1;
            pipeline.generate_chunk_columns(black_box("thalassa"), cx, 0)
        });
    });
}

criterion_group!(
    benches,
    bench_model_creation,
    bench_sample_height,
    bench_build_column,
    bench_chunk_columns,
);
criterion_main!(benches);
