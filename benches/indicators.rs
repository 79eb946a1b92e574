//! Benchmarks for indicator math

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use ticker_metrics::indicators::risk::{annualized_volatility, beta};
use ticker_metrics::indicators::stats::{mean, median};

fn synthetic_returns(n: usize, scale: f64) -> Vec<f64> {
    (0..n)
        .map(|i| ((i as f64 * 0.7).sin() * 0.02 + 0.0003) * scale)
        .collect()
}

fn benchmark_beta(c: &mut Criterion) {
    let benchmark = synthetic_returns(251, 1.0);
    let asset = synthetic_returns(251, 1.4);

    c.bench_function("beta_1y", |b| {
        b.iter(|| beta(black_box(&asset), black_box(&benchmark)))
    });
}

fn benchmark_volatility(c: &mut Criterion) {
    let returns = synthetic_returns(251, 1.0);

    c.bench_function("volatility_1y", |b| {
        b.iter(|| annualized_volatility(black_box(&returns), 252))
    });
}

fn benchmark_price_statistics(c: &mut Criterion) {
    let closes: Vec<Decimal> = (0..1250)
        .map(|i| Decimal::new(3000 + (i * 37 % 900) as i64, 2))
        .collect();

    c.bench_function("mean_median_5y", |b| {
        b.iter(|| (mean(black_box(&closes)), median(black_box(&closes))))
    });
}

criterion_group!(
    benches,
    benchmark_beta,
    benchmark_volatility,
    benchmark_price_statistics
);
criterion_main!(benches);
