//! Lattice construction errors.

use thiserror::Error;

/// Errors raised while building a binomial lattice.
///
/// # Examples
/// ```
/// use volsurf_models::lattice::LatticeError;
///
/// let err = LatticeError::InvalidStepCount { steps: 0 };
/// assert_eq!(format!("{}", err), "Invalid step count: 0");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Risk-neutral up probability outside [0, 1]: the time step is too
    /// coarse for the rate/dividend drift at this volatility.
    #[error("Inconsistent lattice parameters: p = {probability} with dt = {dt}")]
    ParameterInconsistency {
        /// Computed up probability
        probability: f64,
        /// Time step in years
        dt: f64,
    },

    /// Zero (or unrepresentable) number of time steps.
    #[error("Invalid step count: {steps}")]
    InvalidStepCount {
        /// Requested step count
        steps: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_inconsistency_display() {
        let err = LatticeError::ParameterInconsistency {
            probability: 1.5,
            dt: 0.25,
        };
        assert_eq!(
            format!("{}", err),
            "Inconsistent lattice parameters: p = 1.5 with dt = 0.25"
        );
    }

    #[test]
    fn test_invalid_step_count_display() {
        let err = LatticeError::InvalidStepCount { steps: 0 };
        assert_eq!(format!("{}", err), "Invalid step count: 0");
    }
}
