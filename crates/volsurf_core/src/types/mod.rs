//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date` and `DayCountConvention` for valuation anchors and expiries
//! - `error`: Structured error types for date, interpolation, and solver operations
//!
//! # Re-exports
//!
//! - [`Date`], [`DayCountConvention`], [`time_to_maturity`] from `time`
//! - [`DateError`], [`InterpolationError`], [`SolverError`] from `error`

pub mod error;
pub mod time;

pub use error::{DateError, InterpolationError, SolverError};
pub use time::{time_to_maturity, Date, DayCountConvention};
