//! Batch configuration errors.

use thiserror::Error;
use volsurf_models::implied::ImpliedVolError;

/// Errors raised before a batch runs.
///
/// Failures of individual quotes never surface here; they are recorded as
/// [`QuoteFailure`](crate::QuoteFailure)s inside the result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchError {
    /// Lattice step count of zero.
    #[error("Invalid batch configuration: steps must be > 0")]
    ZeroSteps,

    /// Solver configuration rejected.
    #[error("Invalid batch configuration: {0}")]
    Solver(#[from] ImpliedVolError),
}
