use breath_rate::spectrum::{self, FftEngine, WelchConfig};
use breath_rate::{EstimatorConfig, LowpassFilter, RespiratoryRateEstimator, SampleBuffer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::f64::consts::PI;

fn breathing_signal(sample_rate: f64, seconds: f64) -> Vec<f64> {
    let len = (sample_rate * seconds) as usize;
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate;
            0.5 * (1.0 + (2.0 * PI * 0.3 * t).sin()) * (2.0 * PI * 200.0 * t).sin()
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let buffer = SampleBuffer::new(breathing_signal(24_000.0, 20.0), 24_000.0).unwrap();
    let mut estimator = RespiratoryRateEstimator::new(EstimatorConfig::default()).unwrap();

    c.bench_function("estimate_20s_24khz", |b| {
        b.iter(|| estimator.estimate(black_box(&buffer)).unwrap())
    });
}

fn bench_stages(c: &mut Criterion) {
    let signal = breathing_signal(1000.0, 20.0);
    let filter = LowpassFilter::design(4, 2.0, 1000.0).unwrap();
    let mut fft = FftEngine::new();

    c.bench_function("envelope_20k", |b| {
        b.iter(|| spectrum::envelope(&mut fft, black_box(&signal)).unwrap())
    });

    c.bench_function("filtfilt_20k", |b| {
        b.iter(|| filter.apply(black_box(&signal)).unwrap())
    });

    let analysis: Vec<f64> = signal.iter().step_by(100).copied().collect();
    c.bench_function("welch_200", |b| {
        b.iter(|| spectrum::welch(&mut fft, black_box(&analysis), 10.0, &WelchConfig::default()).unwrap())
    });
}

criterion_group!(benches, bench_pipeline, bench_stages);
criterion_main!(benches);
