//! Criterion benchmarks for diffusion steps on the reference profile.

use std::hint::black_box;

use biodiff_bench::{reference_profile, stress_profile};
use biodiff_core::DiffusionScheme;
use biodiff_test_utils::seeded_rng;
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: one step of the 10K-cell profile under each scheme.
fn bench_diffuse_reference(c: &mut Criterion) {
    for (label, scheme) in [
        ("independent", DiffusionScheme::IndependentBinomial),
        ("multinomial", DiffusionScheme::Multinomial),
    ] {
        let mut grid = reference_profile(scheme, 42).unwrap();
        let mut rng = seeded_rng(42);
        c.bench_function(&format!("diffuse_reference_{label}"), |b| {
            b.iter(|| {
                grid.diffuse(black_box(1.0), &mut rng).unwrap();
            });
        });
    }
}

/// Benchmark: one step of the ~100K-cell profile.
fn bench_diffuse_stress(c: &mut Criterion) {
    let mut grid = stress_profile(DiffusionScheme::IndependentBinomial, 42).unwrap();
    let mut rng = seeded_rng(42);
    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("diffuse_stress_independent", |b| {
        b.iter(|| {
            grid.diffuse(black_box(1.0), &mut rng).unwrap();
        });
    });
    group.finish();
}

/// Benchmark: add a particle to every cell of the reference grid.
fn bench_add_molecule_10k(c: &mut Criterion) {
    let mut grid = reference_profile(DiffusionScheme::IndependentBinomial, 42).unwrap();
    c.bench_function("add_molecule_10k", |b| {
        b.iter(|| {
            for y in 0..100 {
                for x in 0..100 {
                    grid.add_molecule(x, y, "AHL", black_box(1)).unwrap();
                }
            }
        });
    });
}

criterion_group!(
    benches,
    bench_diffuse_reference,
    bench_diffuse_stress,
    bench_add_molecule_10k
);
criterion_main!(benches);
