//! Bracketed secant root finder with a bisection guard.

use super::SolverConfig;
use crate::types::SolverError;

/// Outcome of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    /// Abscissa where `|f(root)| <= tolerance`.
    pub root: f64,
    /// Function evaluations performed inside the bracket.
    pub iterations: usize,
    /// `|f(root)|`.
    pub residual: f64,
}

/// Regula falsi over a sign-changing bracket, guarded by bisection.
///
/// Each step proposes the secant point of the two bracket ends. The
/// bracket midpoint is used instead when the secant point falls outside
/// the open bracket, or when the previous step failed to at least halve
/// the bracket width. The bracket therefore always contains a sign change
/// and shrinks geometrically in the worst case.
///
/// Convergence is declared only on the residual, `|f(x)| <= tolerance`.
/// When the bracket collapses to adjacent floating point values first, the
/// search fails with [`SolverError::BracketCollapsed`] rather than returning
/// an unconverged point.
///
/// # Example
///
/// ```
/// use volsurf_core::math::solvers::{SafeguardedSecantSolver, SolverConfig};
///
/// let solver = SafeguardedSecantSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct SafeguardedSecantSolver {
    config: SolverConfig,
}

impl SafeguardedSecantSolver {
    /// Create a new solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find a root of an infallible `f` in the bracket `[a, b]`.
    ///
    /// # Returns
    ///
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have the same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Budget spent without meeting the tolerance
    /// * `Err(SolverError::BracketCollapsed)` - Bracket exhausted without meeting the tolerance
    /// * `Err(SolverError::NumericalInstability)` - `f` returned a non-finite value
    pub fn find_root<F>(&self, mut f: F, a: f64, b: f64) -> Result<RootResult, SolverError>
    where
        F: FnMut(f64) -> f64,
    {
        self.try_find_root(|x| Ok::<f64, SolverError>(f(x)), a, b)
    }

    /// Find a root of a fallible `f` in the bracket `[a, b]`.
    ///
    /// Errors raised by `f` are returned unchanged; solver failures are
    /// converted into the caller's error type through `From<SolverError>`.
    pub fn try_find_root<F, E>(&self, mut f: F, a: f64, b: f64) -> Result<RootResult, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<SolverError>,
    {
        let tol = self.config.tolerance;
        let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };

        let mut f_lo = finite(lo, f(lo)?)?;
        let mut f_hi = finite(hi, f(hi)?)?;
        if f_lo.abs() <= tol {
            return Ok(RootResult {
                root: lo,
                iterations: 0,
                residual: f_lo.abs(),
            });
        }
        if f_hi.abs() <= tol {
            return Ok(RootResult {
                root: hi,
                iterations: 0,
                residual: f_hi.abs(),
            });
        }

        if f_lo.signum() == f_hi.signum() {
            return Err(SolverError::NoBracket {
                a: lo,
                b: hi,
                fa: f_lo,
                fb: f_hi,
            }
            .into());
        }

        let mut best_residual = f_lo.abs().min(f_hi.abs());
        let mut force_bisection = false;

        for iteration in 1..=self.config.max_iterations {
            let width = hi - lo;
            let secant = hi - f_hi * width / (f_hi - f_lo);
            let x = if force_bisection || !(secant > lo && secant < hi) {
                lo + 0.5 * width
            } else {
                secant
            };

            if !(x > lo && x < hi) {
                return Err(SolverError::BracketCollapsed {
                    x,
                    iterations: iteration - 1,
                    residual: best_residual,
                }
                .into());
            }

            let fx = finite(x, f(x)?)?;
            if fx.abs() <= tol {
                return Ok(RootResult {
                    root: x,
                    iterations: iteration,
                    residual: fx.abs(),
                });
            }
            best_residual = best_residual.min(fx.abs());

            if fx.signum() == f_lo.signum() {
                lo = x;
                f_lo = fx;
            } else {
                hi = x;
                f_hi = fx;
            }

            force_bisection = hi - lo > 0.5 * width;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            residual: best_residual,
        }
        .into())
    }
}

fn finite(x: f64, fx: f64) -> Result<f64, SolverError> {
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(SolverError::NumericalInstability(format!(
            "objective returned {} at x = {}",
            fx, x
        )))
    }
}
