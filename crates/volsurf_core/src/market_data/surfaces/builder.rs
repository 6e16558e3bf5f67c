//! Assembly of scattered implied volatilities into a dense variance grid.

use super::{BlackVarianceSurface, SurfaceInterpolation, SurfacePoint, VolatilityGrid};
use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};
use tracing::debug;

/// Builds a [`BlackVarianceSurface`] from scattered observations.
///
/// Construction runs in four stages:
///
/// 1. Strikes and expiries are sorted and deduplicated into grid axes.
/// 2. Each cell receives the mean variance (σ²) of the observations that
///    land on it.
/// 3. Empty cells are filled along the strike axis, then along the expiry
///    axis. Gaps between known neighbours are interpolated linearly
///    (weighted by strike distance, then by day distance) and trailing gaps
///    carry the last known value forward.
/// 4. Remaining leading cells are filled by forward then backward
///    propagation along the strike axis, then along the expiry axis.
///
/// # Example
///
/// ```
/// use volsurf_core::market_data::surfaces::{SurfaceInterpolation, VolSurfaceBuilder};
/// use volsurf_core::types::Date;
///
/// let valuation = Date::from_ymd(2025, 1, 2).unwrap();
/// let near = Date::from_ymd(2025, 4, 2).unwrap();
/// let far = Date::from_ymd(2026, 1, 2).unwrap();
///
/// let points = vec![
///     (90.0, near, 0.25),
///     (100.0, near, 0.20),
///     (100.0, far, 0.22),
///     (110.0, far, 0.21),
/// ];
///
/// let surface = VolSurfaceBuilder::new(valuation)
///     .with_interpolation(SurfaceInterpolation::Bilinear)
///     .build(&points)
///     .unwrap();
/// assert!((surface.black_vol_at(near, 100.0).unwrap() - 0.20).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct VolSurfaceBuilder {
    valuation_date: Date,
    day_count: DayCountConvention,
    interpolation: SurfaceInterpolation,
}

impl VolSurfaceBuilder {
    /// Create a builder anchored at `valuation_date`, using ACT/365F and
    /// bicubic interpolation.
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            day_count: DayCountConvention::default(),
            interpolation: SurfaceInterpolation::default(),
        }
    }

    /// Set the interpolation scheme used by the built surface.
    pub fn with_interpolation(mut self, interpolation: SurfaceInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the day count used to convert expiries into year fractions.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Valuation anchor of surfaces produced by this builder.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Build the queryable surface.
    ///
    /// # Returns
    ///
    /// * `Err(MarketDataError::InvalidObservation)` - Non-finite or non-positive strike or volatility
    /// * `Err(MarketDataError::InsufficientData)` - Fewer than 2 distinct strikes or expiries
    pub fn build<P: SurfacePoint>(
        &self,
        points: &[P],
    ) -> Result<BlackVarianceSurface, MarketDataError> {
        let grid = self.build_grid(points)?;
        BlackVarianceSurface::new(grid, self.valuation_date, self.day_count, self.interpolation)
    }

    /// Build only the dense variance grid.
    pub fn build_grid<P: SurfacePoint>(
        &self,
        points: &[P],
    ) -> Result<VolatilityGrid, MarketDataError> {
        for (index, point) in points.iter().enumerate() {
            let strike = point.strike();
            let volatility = point.volatility();
            if !(strike.is_finite() && strike > 0.0 && volatility.is_finite() && volatility > 0.0) {
                return Err(MarketDataError::InvalidObservation {
                    index,
                    strike,
                    volatility,
                });
            }
        }

        let mut strikes: Vec<f64> = points.iter().map(SurfacePoint::strike).collect();
        strikes.sort_by(f64::total_cmp);
        strikes.dedup();

        let mut expiries: Vec<Date> = points.iter().map(SurfacePoint::expiry).collect();
        expiries.sort();
        expiries.dedup();

        if strikes.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                axis: "strike",
                got: strikes.len(),
                need: 2,
            });
        }
        if expiries.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                axis: "expiry",
                got: expiries.len(),
                need: 2,
            });
        }

        let mut cells = aggregate(points, &strikes, &expiries);
        let observed = count_known(&cells);

        let strike_coords = strikes.clone();
        let day_coords: Vec<f64> = expiries
            .iter()
            .map(|&expiry| (expiry - expiries[0]) as f64)
            .collect();

        for_each_column(&mut cells, |column| interpolate_gaps(column, &strike_coords));
        for row in cells.iter_mut() {
            interpolate_gaps(row, &day_coords);
        }
        let interpolated = count_known(&cells) - observed;

        for_each_column(&mut cells, fill_edges);
        for row in cells.iter_mut() {
            fill_edges(row);
        }

        let total = strikes.len() * expiries.len();
        debug!(
            strikes = strikes.len(),
            expiries = expiries.len(),
            observed,
            interpolated,
            propagated = total - observed - interpolated,
            "Built volatility grid"
        );

        let variances = cells
            .into_iter()
            .map(|row| row.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
            .collect();

        VolatilityGrid::new(strikes, expiries, variances)
    }
}

/// Build a surface anchored at `valuation_date` with ACT/365F time.
pub fn build_surface<P: SurfacePoint>(
    points: &[P],
    valuation_date: Date,
    interpolation: SurfaceInterpolation,
) -> Result<BlackVarianceSurface, MarketDataError> {
    VolSurfaceBuilder::new(valuation_date)
        .with_interpolation(interpolation)
        .build(points)
}

/// Mean variance per (strike, expiry) cell; `None` where nothing landed.
fn aggregate<P: SurfacePoint>(
    points: &[P],
    strikes: &[f64],
    expiries: &[Date],
) -> Vec<Vec<Option<f64>>> {
    let mut sums = vec![vec![0.0; expiries.len()]; strikes.len()];
    let mut counts = vec![vec![0usize; expiries.len()]; strikes.len()];

    for point in points {
        let strike = point.strike();
        let i = strikes.partition_point(|&k| k < strike);
        let j = expiries.partition_point(|&e| e < point.expiry());
        let vol = point.volatility();
        sums[i][j] += vol * vol;
        counts[i][j] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum_row, count_row)| {
            sum_row
                .into_iter()
                .zip(count_row)
                .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
                .collect()
        })
        .collect()
}

fn count_known(cells: &[Vec<Option<f64>>]) -> usize {
    cells.iter().flatten().filter(|v| v.is_some()).count()
}

/// Apply `f` to every expiry column (values across strikes).
fn for_each_column<F>(cells: &mut [Vec<Option<f64>>], mut f: F)
where
    F: FnMut(&mut [Option<f64>]),
{
    let num_columns = cells.first().map_or(0, Vec::len);
    for j in 0..num_columns {
        let mut column: Vec<Option<f64>> = cells.iter().map(|row| row[j]).collect();
        f(&mut column);
        for (row, value) in cells.iter_mut().zip(column) {
            row[j] = value;
        }
    }
}

/// Linear interpolation between consecutive known values, weighted by
/// coordinate distance. Trailing gaps take the last known value; leading
/// gaps are left empty.
fn interpolate_gaps(values: &mut [Option<f64>], coords: &[f64]) {
    let known: Vec<usize> = (0..values.len()).filter(|&i| values[i].is_some()).collect();

    for pair in known.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if let (Some(va), Some(vb)) = (values[a], values[b]) {
            let span = coords[b] - coords[a];
            for i in a + 1..b {
                let w = (coords[i] - coords[a]) / span;
                values[i] = Some(va + (vb - va) * w);
            }
        }
    }

    if let Some(&last) = known.last() {
        let tail = values[last];
        for value in &mut values[last + 1..] {
            *value = tail;
        }
    }
}

/// Forward fill, then backward fill.
fn fill_edges(values: &mut [Option<f64>]) {
    let mut last = None;
    for value in values.iter_mut() {
        match value {
            Some(v) => last = Some(*v),
            None => *value = last,
        }
    }

    let mut next = None;
    for value in values.iter_mut().rev() {
        match value {
            Some(v) => next = Some(*v),
            None => *value = next,
        }
    }
}
