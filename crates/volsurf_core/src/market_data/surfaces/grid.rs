//! Dense strike × expiry variance grid.

use crate::market_data::error::MarketDataError;
use crate::types::Date;

/// Dense grid of implied variances (σ²) indexed by strike and expiry.
///
/// # Invariants
///
/// - `strikes` strictly increasing, at least 2 entries
/// - `expiries` strictly increasing, at least 2 entries
/// - `variances[i][j]` is the variance at `(strikes[i], expiries[j])`,
///   finite and non-negative, with no missing cells
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityGrid {
    strikes: Vec<f64>,
    expiries: Vec<Date>,
    variances: Vec<Vec<f64>>,
}

impl VolatilityGrid {
    /// Construct a grid, checking every invariant.
    ///
    /// # Returns
    ///
    /// * `Err(MarketDataError::InsufficientData)` - Fewer than 2 strikes or expiries
    /// * `Err(MarketDataError::InvalidGrid)` - Unsorted axis, shape mismatch or bad cell
    pub fn new(
        strikes: Vec<f64>,
        expiries: Vec<Date>,
        variances: Vec<Vec<f64>>,
    ) -> Result<Self, MarketDataError> {
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
        if strikes.windows(2).any(|w| w[0].partial_cmp(&w[1]) != Some(std::cmp::Ordering::Less)) {
            return Err(MarketDataError::InvalidGrid(
                "strikes must be strictly increasing".to_string(),
            ));
        }
        if expiries.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MarketDataError::InvalidGrid(
                "expiries must be strictly increasing".to_string(),
            ));
        }
        if variances.len() != strikes.len() {
            return Err(MarketDataError::InvalidGrid(format!(
                "grid has {} rows for {} strikes",
                variances.len(),
                strikes.len()
            )));
        }
        for (i, row) in variances.iter().enumerate() {
            if row.len() != expiries.len() {
                return Err(MarketDataError::InvalidGrid(format!(
                    "row {} has {} cells for {} expiries",
                    i,
                    row.len(),
                    expiries.len()
                )));
            }
            if let Some(j) = row.iter().position(|v| !(v.is_finite() && *v >= 0.0)) {
                return Err(MarketDataError::InvalidGrid(format!(
                    "cell ({}, {}) holds {}",
                    i, j, row[j]
                )));
            }
        }

        Ok(Self {
            strikes,
            expiries,
            variances,
        })
    }

    /// Sorted strike axis.
    #[inline]
    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// Sorted expiry axis.
    #[inline]
    pub fn expiries(&self) -> &[Date] {
        &self.expiries
    }

    /// Variance rows, one per strike.
    #[inline]
    pub fn variances(&self) -> &[Vec<f64>] {
        &self.variances
    }

    /// Variance at strike index `i`, expiry index `j`.
    #[inline]
    pub fn variance(&self, i: usize, j: usize) -> f64 {
        self.variances[i][j]
    }

    /// Volatility (square root of the variance) at strike index `i`, expiry index `j`.
    #[inline]
    pub fn volatility(&self, i: usize, j: usize) -> f64 {
        self.variances[i][j].sqrt()
    }

    /// Number of strikes.
    #[inline]
    pub fn num_strikes(&self) -> usize {
        self.strikes.len()
    }

    /// Number of expiries.
    #[inline]
    pub fn num_expiries(&self) -> usize {
        self.expiries.len()
    }

    /// Variances laid out expiry-major: `out[j][i] = variance(i, j)`.
    pub fn expiry_major(&self) -> Vec<Vec<f64>> {
        (0..self.num_expiries())
            .map(|j| self.variances.iter().map(|row| row[j]).collect())
            .collect()
    }
}
