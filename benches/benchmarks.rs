/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_complex::Complex64;

use mie_rs::input::{MieParameters, WavelengthRange};
use mie_rs::mie::{compute_coefficients, max_order};
use mie_rs::utils::SphericalFunctions;

fn bessel_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Spherical Functions");

    group.bench_function("evaluate_x_1", |b| {
        let z = Complex64::new(1.0, 0.0);
        let n_max = max_order(1.0);
        b.iter(|| black_box(SphericalFunctions::evaluate(black_box(n_max), black_box(z))))
    });

    group.bench_function("evaluate_mx_50", |b| {
        let z = Complex64::new(66.5, 0.5);
        let n_max = max_order(50.0);
        b.iter(|| black_box(SphericalFunctions::evaluate(black_box(n_max), black_box(z))))
    });

    group.finish();
}

fn coefficient_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mie Coefficients");

    let mu = Complex64::new(1.0, 0.0);

    group.bench_function("solve_x_1", |b| {
        let m = Complex64::new(1.5, 0.0);
        b.iter(|| {
            black_box(compute_coefficients(
                black_box(1.0),
                black_box(m),
                black_box(mu),
                black_box(max_order(1.0)),
            ))
        })
    });

    group.bench_function("solve_x_10_absorbing", |b| {
        let m = Complex64::new(1.33, 0.01);
        b.iter(|| {
            black_box(compute_coefficients(
                black_box(10.0),
                black_box(m),
                black_box(mu),
                black_box(max_order(10.0)),
            ))
        })
    });

    group.finish();
}

fn spectrum_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Spectrum");
    group.sample_size(20);

    group.bench_function("visible_scan_50_points", |b| {
        let parameters = MieParameters {
            radius: 250e-9,
            wavelengths: WavelengthRange {
                start: 400e-9,
                stop: 800e-9,
                count: 50,
            },
            ..Default::default()
        };
        let simulation = parameters.build_simulation().unwrap();
        b.iter(|| black_box(simulation.run()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bessel_benchmark,
    coefficient_benchmark,
    spectrum_benchmark
);
criterion_main!(benches);
