use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weather_signal::spectrum::spectrum;
use weather_signal::SavitzkyGolayFilter;

fn hourly_signal(n: usize) -> Vec<f64> {
    (0..n)
        .map(|h| {
            let t = h as f64;
            10.0 + 5.0 * (2.0 * std::f64::consts::PI * t / 24.0).sin() + (t * 1.9).sin()
        })
        .collect()
}

fn bench_smoothing(c: &mut Criterion) {
    let x = hourly_signal(24 * 16);
    let mut group = c.benchmark_group("savgol");

    for &(w, p) in &[(11usize, 2usize), (25, 3), (51, 4)] {
        let filter = SavitzkyGolayFilter::with_params(w, p).unwrap();
        let id = format!("{}_{}", w, p);

        group.bench_with_input(BenchmarkId::new("kernel", &id), &x, |b, x| {
            b.iter(|| filter.smooth(black_box(x)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("local_fit", &id), &x, |b, x| {
            b.iter(|| filter.smooth_by_local_fit(black_box(x)).unwrap())
        });
    }

    group.finish();
}

fn bench_spectrum(c: &mut Criterion) {
    let x = hourly_signal(24 * 16);
    c.bench_function("spectrum_384", |b| b.iter(|| spectrum(black_box(&x), 1.0).unwrap()));
}

criterion_group!(benches, bench_smoothing, bench_spectrum);
criterion_main!(benches);
