//! Implied volatility errors.

use crate::lattice::LatticeError;
use thiserror::Error;
use volsurf_core::types::SolverError;

/// Reasons an observed price cannot be turned into an implied volatility.
///
/// # Examples
/// ```
/// use volsurf_models::implied::ImpliedVolError;
///
/// let err = ImpliedVolError::ArbitrageViolation { price: 5.0, lower: 10.0, upper: 100.0 };
/// assert!(format!("{}", err).contains("outside no-arbitrage bounds"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImpliedVolError {
    /// Observed price not strictly between intrinsic value and the upper bound.
    #[error("Price {price} outside no-arbitrage bounds ({lower}, {upper})")]
    ArbitrageViolation {
        /// Observed price
        price: f64,
        /// Intrinsic value
        lower: f64,
        /// Spot for calls, discounted strike for puts
        upper: f64,
    },

    /// No volatility in the search range reprices the quote within tolerance.
    #[error("No implied volatility found after {iterations} iterations (residual {residual:e})")]
    NoSolution {
        /// Lattice evaluations performed inside the bracket
        iterations: usize,
        /// Smallest price residual seen
        residual: f64,
    },

    /// Lattice could not be built during the search.
    #[error("Lattice error: {0}")]
    Lattice(#[from] LatticeError),

    /// Unusable search configuration.
    #[error("Invalid implied volatility configuration: {0}")]
    InvalidConfig(String),
}

impl From<SolverError> for ImpliedVolError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::MaxIterationsExceeded {
                iterations,
                residual,
            }
            | SolverError::BracketCollapsed {
                iterations,
                residual,
                ..
            } => ImpliedVolError::NoSolution {
                iterations,
                residual,
            },
            SolverError::NoBracket { fa, fb, .. } => ImpliedVolError::NoSolution {
                iterations: 0,
                residual: fa.abs().min(fb.abs()),
            },
            SolverError::NumericalInstability(_) => ImpliedVolError::NoSolution {
                iterations: 0,
                residual: f64::NAN,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_iterations_becomes_no_solution() {
        let err: ImpliedVolError = SolverError::MaxIterationsExceeded {
            iterations: 100,
            residual: 1e-3,
        }
        .into();
        assert_eq!(
            err,
            ImpliedVolError::NoSolution {
                iterations: 100,
                residual: 1e-3
            }
        );
    }

    #[test]
    fn test_no_bracket_keeps_smallest_residual() {
        let err: ImpliedVolError = SolverError::NoBracket {
            a: 0.0,
            b: 4.0,
            fa: 0.5,
            fb: 3.0,
        }
        .into();
        match err {
            ImpliedVolError::NoSolution {
                iterations,
                residual,
            } => {
                assert_eq!(iterations, 0);
                assert_eq!(residual, 0.5);
            }
            _ => panic!("Expected NoSolution error"),
        }
    }

    #[test]
    fn test_lattice_error_passes_through() {
        let err: ImpliedVolError = LatticeError::InvalidStepCount { steps: 0 }.into();
        assert!(matches!(
            err,
            ImpliedVolError::Lattice(LatticeError::InvalidStepCount { steps: 0 })
        ));
        assert!(format!("{}", err).starts_with("Lattice error"));
    }
}
