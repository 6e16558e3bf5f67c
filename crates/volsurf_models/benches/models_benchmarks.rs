//! Criterion benchmarks for lattice pricing and implied volatility inversion.
//!
//! Lattice cost is O(steps²); the inversion multiplies it by the number of
//! secant iterations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use volsurf_core::types::Date;
use volsurf_models::implied::ImpliedVolSolver;
use volsurf_models::instruments::{MarketContext, OptionContract, OptionKind, Quote};
use volsurf_models::lattice::{price, DEFAULT_STEPS};

fn bench_lattice(c: &mut Criterion) {
    let mut group = c.benchmark_group("crr_lattice");
    let contract = OptionContract::american(100.0, 1.0, OptionKind::Put).unwrap();
    let market = MarketContext::new(100.0, 0.05, 0.01, 0.25).unwrap();

    for steps in [50, 200, 1000] {
        group.bench_with_input(BenchmarkId::new("american_put", steps), &steps, |b, &steps| {
            b.iter(|| price(black_box(&contract), black_box(&market), steps).unwrap());
        });
    }

    group.finish();
}

fn bench_implied_volatility(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_volatility");
    let solver = ImpliedVolSolver::default();
    let expiry = Date::from_ymd(2025, 6, 20).unwrap();
    let market = MarketContext::new(100.0, 0.03, 0.0, 0.0).unwrap();

    for strike in [80.0, 100.0, 120.0] {
        let contract = OptionContract::american(strike, 0.5, OptionKind::Put).unwrap();
        let observed = price(&contract, &market.with_volatility(0.3), DEFAULT_STEPS).unwrap();
        let quote = Quote::new(contract, market, observed, expiry);

        group.bench_with_input(
            BenchmarkId::new("put", strike as u32),
            &quote,
            |b, quote| {
                b.iter(|| solver.solve(black_box(quote), DEFAULT_STEPS).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_lattice, bench_implied_volatility);
criterion_main!(benches);
