//! Integration tests for surface construction and lookup.
//!
//! Exercises the builder and query through the public API only.

use approx::assert_relative_eq;
use proptest::prelude::*;
use volsurf_core::market_data::surfaces::{
    build_surface, SurfaceInterpolation, VolSurfaceBuilder, VolatilityObservation,
};
use volsurf_core::market_data::MarketDataError;
use volsurf_core::types::{Date, DayCountConvention};

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn valuation() -> Date {
    d(2024, 1, 2)
}

fn expiries() -> Vec<Date> {
    vec![d(2024, 2, 16), d(2024, 3, 15), d(2024, 6, 21), d(2024, 12, 20)]
}

fn strikes() -> Vec<f64> {
    vec![80.0, 90.0, 95.0, 100.0, 105.0, 110.0, 120.0]
}

/// One observation per cell, with a smile that flattens with maturity.
fn full_grid_observations() -> Vec<VolatilityObservation> {
    let mut out = Vec::new();
    for (j, &expiry) in expiries().iter().enumerate() {
        for &k in &strikes() {
            let m = (k / 100.0).ln();
            let vol = 0.18 + 0.01 * j as f64 + 0.8 * m * m / (1.0 + j as f64);
            out.push(VolatilityObservation::new(k, expiry, vol));
        }
    }
    out
}

// ========================================
// Exactness
// ========================================

#[test]
fn test_one_observation_per_cell_is_reproduced() {
    let observations = full_grid_observations();
    for interpolation in [SurfaceInterpolation::Bilinear, SurfaceInterpolation::Bicubic] {
        let surface = build_surface(&observations, valuation(), interpolation).unwrap();
        for obs in &observations {
            assert_relative_eq!(
                surface.black_vol_at(obs.expiry, obs.strike).unwrap(),
                obs.volatility,
                epsilon = 1e-12
            );
        }
    }
}

#[test]
fn test_sparse_observations_yield_dense_grid() {
    let observations: Vec<VolatilityObservation> = full_grid_observations()
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % 3 == 0)
        .map(|(_, obs)| obs)
        .collect();

    let builder = VolSurfaceBuilder::new(valuation());
    let grid = builder.build_grid(&observations).unwrap();
    for row in grid.variances() {
        assert!(row.iter().all(|v| v.is_finite() && *v > 0.0));
    }

    let surface = builder.build(&observations).unwrap();
    let sample = surface.sample(10, 10, None).unwrap();
    assert!(sample
        .volatilities
        .iter()
        .flatten()
        .all(|v| v.is_finite() && *v > 0.0));
}

#[test]
fn test_actual_360_builder() {
    let surface = VolSurfaceBuilder::new(valuation())
        .with_day_count(DayCountConvention::Actual360)
        .build(&full_grid_observations())
        .unwrap();
    assert_relative_eq!(surface.max_time(), 353.0 / 360.0, epsilon = 1e-15);
}

// ========================================
// Failure Modes
// ========================================

#[test]
fn test_one_distinct_strike_fails() {
    let observations: Vec<_> = expiries()
        .into_iter()
        .map(|e| VolatilityObservation::new(100.0, e, 0.2))
        .collect();

    match build_surface(&observations, valuation(), SurfaceInterpolation::Bicubic).unwrap_err() {
        MarketDataError::InsufficientData { axis, got, need } => {
            assert_eq!(axis, "strike");
            assert_eq!(got, 1);
            assert_eq!(need, 2);
        }
        _ => panic!("Expected InsufficientData error"),
    }
}

// ========================================
// Property-Based Tests
// ========================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_clamped_queries_match_edges(
        dk in 0.0..200.0f64,
        dt in 0.0..5.0f64,
        k_inner in 80.0..120.0f64,
    ) {
        let surface = build_surface(
            &full_grid_observations(),
            valuation(),
            SurfaceInterpolation::Bicubic,
        ).unwrap();
        let (t_min, t_max) = (surface.min_time(), surface.max_time());
        let (k_min, k_max) = (surface.min_strike(), surface.max_strike());

        prop_assert_eq!(
            surface.black_vol(t_max + dt, k_inner).unwrap(),
            surface.black_vol(t_max, k_inner).unwrap()
        );
        prop_assert_eq!(
            surface.black_vol(t_min - dt, k_max + dk).unwrap(),
            surface.black_vol(t_min, k_max).unwrap()
        );
        prop_assert_eq!(
            surface.black_vol(t_min, (k_min - dk).max(1e-6)).unwrap(),
            surface.black_vol(t_min, k_min).unwrap()
        );
    }

    #[test]
    fn prop_bilinear_stays_within_grid_range(
        t_frac in 0.0..1.0f64,
        k in 80.0..120.0f64,
    ) {
        let observations = full_grid_observations();
        let surface = build_surface(&observations, valuation(), SurfaceInterpolation::Bilinear)
            .unwrap();
        let lo = observations.iter().map(|o| o.volatility).fold(f64::INFINITY, f64::min);
        let hi = observations.iter().map(|o| o.volatility).fold(0.0, f64::max);

        let t = surface.min_time() + t_frac * (surface.max_time() - surface.min_time());
        let vol = surface.black_vol(t, k).unwrap();
        prop_assert!(vol >= lo - 1e-12 && vol <= hi + 1e-12);
    }
}
