//! Market data error types.
//!
//! This module provides structured error handling for volatility grid
//! construction and surface lookups.

use crate::types::InterpolationError;
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InsufficientData`: Too few distinct nodes on a grid axis
/// - `InvalidObservation`: Non-finite or non-positive strike or volatility
/// - `InvalidStrike`: Non-finite query strike
/// - `InvalidExpiry`: Non-finite query time
/// - `InvalidGrid`: Grid dimensions or cell values violate the dense-grid invariant
/// - `Interpolation`: Wrapped interpolation error
///
/// # Examples
///
/// ```
/// use volsurf_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InsufficientData { axis: "strike", got: 1, need: 2 };
/// assert_eq!(format!("{}", err), "Insufficient data on strike axis: got 1, need 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Too few distinct values on a grid axis.
    #[error("Insufficient data on {axis} axis: got {got}, need {need}")]
    InsufficientData {
        /// Axis name (`"strike"` or `"expiry"`)
        axis: &'static str,
        /// Number of distinct values provided
        got: usize,
        /// Minimum number required
        need: usize,
    },

    /// Observation rejected before aggregation.
    #[error("Invalid observation at index {index}: strike = {strike}, volatility = {volatility}")]
    InvalidObservation {
        /// Position of the observation in the input
        index: usize,
        /// Observed strike
        strike: f64,
        /// Observed volatility
        volatility: f64,
    },

    /// Invalid query strike.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid query time to expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Grid shape or contents are inconsistent.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),
}
