//! Benchmarks for the per-cycle CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bdf_toy::emitter::{build_defines, label, EmitOptions};
use bdf_toy::{resolve, ChangeTracker, ParameterSnapshot, Scene, ToyConfig};

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    group.bench_function("no_edit", |b| {
        let config = ToyConfig::default();
        b.iter(|| black_box(resolve(&config, config.clone())))
    });

    for scene in Scene::ALL {
        group.bench_with_input(
            BenchmarkId::new("scene_change", scene.label()),
            &scene,
            |b, &scene| {
                let previous = ToyConfig::default();
                let mut edited = previous.clone();
                edited.scene.kind = scene;
                b.iter(|| black_box(resolve(&previous, edited.clone())))
            },
        );
    }

    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let config = ToyConfig::default();
    let snapshot = ParameterSnapshot {
        config: config.clone(),
        defines: build_defines(&config, EmitOptions::default()),
    };
    let mut edited = config.clone();
    edited.secondary.normal_offset = 0.02;

    let mut group = c.benchmark_group("diff");
    group.bench_function("clean", |b| {
        b.iter(|| black_box(ChangeTracker::diff(Some(&snapshot), &config)))
    });
    group.bench_function("one_field", |b| {
        b.iter(|| black_box(ChangeTracker::diff(Some(&snapshot), &edited)))
    });
    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let config = ToyConfig::default();
    let mut group = c.benchmark_group("emit");
    group.bench_function("build_defines", |b| {
        b.iter(|| black_box(build_defines(&config, EmitOptions::default())))
    });
    group.bench_function("label", |b| b.iter(|| black_box(label(&config))));
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_diff, bench_emit);
criterion_main!(benches);
