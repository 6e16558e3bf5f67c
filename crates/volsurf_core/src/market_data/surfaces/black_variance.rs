//! Black variance surface: the query side of a built volatility grid.

use super::{VolatilityGrid, VolatilitySurface};
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{BicubicInterpolator, BilinearInterpolator, Interpolator2D};
use crate::types::{Date, DayCountConvention};
use std::fmt;
use std::str::FromStr;

/// Interpolation scheme applied to the variance grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SurfaceInterpolation {
    /// Linear along each axis.
    Bilinear,
    /// Natural cubic spline along each axis (linear on 2-node axes).
    #[default]
    Bicubic,
}

impl SurfaceInterpolation {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceInterpolation::Bilinear => "bilinear",
            SurfaceInterpolation::Bicubic => "bicubic",
        }
    }
}

impl FromStr for SurfaceInterpolation {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bilinear" | "linear" => Ok(SurfaceInterpolation::Bilinear),
            "bicubic" | "cubic" | "spline" => Ok(SurfaceInterpolation::Bicubic),
            other => Err(MarketDataError::InvalidGrid(format!(
                "unknown interpolation '{}', expected 'bilinear' or 'bicubic'",
                other
            ))),
        }
    }
}

impl fmt::Display for SurfaceInterpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
enum GridInterpolator {
    Bilinear(BilinearInterpolator<f64>),
    Bicubic(BicubicInterpolator<f64>),
}

impl GridInterpolator {
    fn interpolate(&self, t: f64, strike: f64) -> Result<f64, MarketDataError> {
        let value = match self {
            GridInterpolator::Bilinear(interp) => interp.interpolate(t, strike)?,
            GridInterpolator::Bicubic(interp) => interp.interpolate(t, strike)?,
        };
        Ok(value)
    }
}

/// Implied volatility surface over a dense variance grid.
///
/// The expiry axis is the year fraction from a fixed valuation anchor, the
/// strike axis is the grid's strikes. Queries outside the grid are clamped
/// to the nearest edge, so the surface extrapolates flat. The interpolated
/// variance is floored at zero before the square root is taken.
///
/// Immutable after construction, and safe to share across threads.
#[derive(Debug, Clone)]
pub struct BlackVarianceSurface {
    grid: VolatilityGrid,
    valuation_date: Date,
    day_count: DayCountConvention,
    interpolation: SurfaceInterpolation,
    times: Vec<f64>,
    interpolator: GridInterpolator,
}

impl BlackVarianceSurface {
    /// Wrap a dense grid in a queryable surface.
    ///
    /// # Returns
    ///
    /// * `Err(MarketDataError::Interpolation)` - Expiries map to non-increasing times
    pub fn new(
        grid: VolatilityGrid,
        valuation_date: Date,
        day_count: DayCountConvention,
        interpolation: SurfaceInterpolation,
    ) -> Result<Self, MarketDataError> {
        let times: Vec<f64> = grid
            .expiries()
            .iter()
            .map(|&expiry| day_count.year_fraction(valuation_date, expiry))
            .collect();

        let rows = grid.expiry_major();
        let zs: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
        let interpolator = match interpolation {
            SurfaceInterpolation::Bilinear => {
                GridInterpolator::Bilinear(BilinearInterpolator::new(&times, grid.strikes(), &zs)?)
            }
            SurfaceInterpolation::Bicubic => {
                GridInterpolator::Bicubic(BicubicInterpolator::new(&times, grid.strikes(), &zs)?)
            }
        };

        Ok(Self {
            grid,
            valuation_date,
            day_count,
            interpolation,
            times,
            interpolator,
        })
    }

    /// Implied volatility at year fraction `t` and `strike`.
    ///
    /// # Returns
    ///
    /// * `Err(MarketDataError::InvalidExpiry)` - `t` is not finite
    /// * `Err(MarketDataError::InvalidStrike)` - `strike` is not finite
    pub fn black_vol(&self, t: f64, strike: f64) -> Result<f64, MarketDataError> {
        if !t.is_finite() {
            return Err(MarketDataError::InvalidExpiry { expiry: t });
        }
        if !strike.is_finite() {
            return Err(MarketDataError::InvalidStrike { strike });
        }

        let t = t.clamp(self.min_time(), self.max_time());
        let k = strike.clamp(self.min_strike(), self.max_strike());
        let variance = self.interpolator.interpolate(t, k)?;

        Ok(variance.max(0.0).sqrt())
    }

    /// Implied volatility at an expiry date.
    pub fn black_vol_at(&self, expiry: Date, strike: f64) -> Result<f64, MarketDataError> {
        self.black_vol(self.time_from_reference(expiry), strike)
    }

    /// Total Black variance `σ(t, K)² · t`.
    ///
    /// Unlike the volatility, `t` is not clamped here; it must be non-negative.
    pub fn black_variance(&self, t: f64, strike: f64) -> Result<f64, MarketDataError> {
        if t < 0.0 {
            return Err(MarketDataError::InvalidExpiry { expiry: t });
        }
        let vol = self.black_vol(t, strike)?;
        Ok(vol * vol * t)
    }

    /// Year fraction from the valuation anchor to `date`.
    #[inline]
    pub fn time_from_reference(&self, date: Date) -> f64 {
        self.day_count.year_fraction(self.valuation_date, date)
    }

    /// Sample the surface on an evenly spaced `num_times × num_strikes` mesh.
    ///
    /// Times span `[min_time, max_time]`. Strikes span `strike_range` when
    /// given, clipped to `[min_strike, max_strike]`, and the full strike
    /// axis otherwise.
    ///
    /// # Returns
    ///
    /// * `Err(MarketDataError::InvalidGrid)` - Zero points requested on an axis
    pub fn sample(
        &self,
        num_strikes: usize,
        num_times: usize,
        strike_range: Option<(f64, f64)>,
    ) -> Result<SurfaceSample, MarketDataError> {
        if num_strikes == 0 || num_times == 0 {
            return Err(MarketDataError::InvalidGrid(format!(
                "sample needs at least one strike and one time, got {} x {}",
                num_strikes, num_times
            )));
        }

        let (k_lo, k_hi) = match strike_range {
            Some((lo, hi)) => {
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                (
                    lo.clamp(self.min_strike(), self.max_strike()),
                    hi.clamp(self.min_strike(), self.max_strike()),
                )
            }
            None => (self.min_strike(), self.max_strike()),
        };

        let strikes = linspace(k_lo, k_hi, num_strikes);
        let times = linspace(self.min_time(), self.max_time(), num_times);
        let expiries = times
            .iter()
            .map(|&t| self.day_count.date_after(self.valuation_date, t))
            .collect();

        let volatilities = times
            .iter()
            .map(|&t| {
                strikes
                    .iter()
                    .map(|&k| self.black_vol(t, k))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SurfaceSample {
            strikes,
            times,
            expiries,
            volatilities,
        })
    }

    /// Underlying variance grid.
    pub fn grid(&self) -> &VolatilityGrid {
        &self.grid
    }

    /// Valuation anchor.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Day count used for the expiry axis.
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Interpolation scheme.
    pub fn interpolation(&self) -> SurfaceInterpolation {
        self.interpolation
    }

    /// Grid expiry times in years.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Smallest grid strike.
    pub fn min_strike(&self) -> f64 {
        self.grid.strikes()[0]
    }

    /// Largest grid strike.
    pub fn max_strike(&self) -> f64 {
        self.grid.strikes()[self.grid.num_strikes() - 1]
    }

    /// Earliest grid expiry.
    pub fn min_expiry(&self) -> Date {
        self.grid.expiries()[0]
    }

    /// Latest grid expiry.
    pub fn max_expiry(&self) -> Date {
        self.grid.expiries()[self.grid.num_expiries() - 1]
    }

    /// Year fraction of the earliest expiry.
    pub fn min_time(&self) -> f64 {
        self.times[0]
    }

    /// Year fraction of the latest expiry.
    pub fn max_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}

impl VolatilitySurface<f64> for BlackVarianceSurface {
    /// `expiry` is a year fraction from the valuation anchor.
    fn volatility(&self, strike: f64, expiry: f64) -> Result<f64, MarketDataError> {
        self.black_vol(expiry, strike)
    }

    fn strike_domain(&self) -> (f64, f64) {
        (self.min_strike(), self.max_strike())
    }

    fn expiry_domain(&self) -> (f64, f64) {
        (self.min_time(), self.max_time())
    }
}

/// Evenly spaced mesh of surface volatilities.
///
/// `volatilities[i][j]` is the volatility at `times[i]` and `strikes[j]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceSample {
    /// Sampled strikes, ascending.
    pub strikes: Vec<f64>,
    /// Sampled year fractions, ascending.
    pub times: Vec<f64>,
    /// Calendar date nearest to each sampled time.
    pub expiries: Vec<Date>,
    /// Volatility mesh, one row per time.
    pub volatilities: Vec<Vec<f64>>,
}

impl SurfaceSample {
    /// Flatten into `(time, expiry, strike, volatility)` rows, time-major.
    pub fn rows(&self) -> impl Iterator<Item = (f64, Date, f64, f64)> + '_ {
        self.times
            .iter()
            .zip(&self.expiries)
            .zip(&self.volatilities)
            .flat_map(move |((&t, &expiry), vols)| {
                self.strikes
                    .iter()
                    .zip(vols)
                    .map(move |(&k, &vol)| (t, expiry, k, vol))
            })
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
        .collect()
}
