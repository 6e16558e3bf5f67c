//! Criterion benchmarks for sequential and parallel batch inversion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use volsurf_batch::{BatchConfig, BatchInverter};
use volsurf_core::types::Date;
use volsurf_models::instruments::{MarketContext, OptionContract, OptionKind, Quote};
use volsurf_models::lattice::price;

const STEPS: usize = 100;

fn generate_quotes(n: usize) -> Vec<Quote> {
    let market = MarketContext::new(100.0, 0.03, 0.0, 0.0).unwrap();
    let expiry = Date::from_ymd(2025, 6, 20).unwrap();
    (0..n)
        .map(|i| {
            let strike = 80.0 + 40.0 * i as f64 / n as f64;
            let contract = OptionContract::american(strike, 0.5, OptionKind::Put).unwrap();
            let m = (strike / 100.0).ln();
            let observed =
                price(&contract, &market.with_volatility(0.2 + m * m), STEPS).unwrap();
            Quote::new(contract, market, observed, expiry)
        })
        .collect()
}

fn bench_batch_inversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_inversion");
    group.sample_size(10);

    for n in [16, 128] {
        let quotes = generate_quotes(n);
        for (label, threshold) in [("sequential", usize::MAX), ("parallel", 0)] {
            let inverter = BatchInverter::new(BatchConfig {
                steps: STEPS,
                parallel_threshold: threshold,
                ..Default::default()
            })
            .unwrap();
            group.bench_with_input(BenchmarkId::new(label, n), &quotes, |b, quotes| {
                b.iter(|| inverter.invert(black_box(quotes)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_batch_inversion);
criterion_main!(benches);
