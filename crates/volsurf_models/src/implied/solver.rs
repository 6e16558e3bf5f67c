//! Lattice-based implied volatility inversion.

use super::{ImpliedVolConfig, ImpliedVolError};
use crate::instruments::{MarketContext, OptionContract, OptionKind, Quote};
use crate::lattice::{self, min_stable_volatility};
use volsurf_core::math::solvers::{SafeguardedSecantSolver, SolverConfig};

/// Relative margin kept above the lattice stability floor so that the
/// lower bracket end never sits on `p = 1` after rounding.
const STABILITY_MARGIN: f64 = 1e-6;

/// Open interval an observed option price must fall in.
///
/// Lower bound is intrinsic value. Upper bound is spot for calls and
/// `K exp(-rT)` for puts.
///
/// # Examples
/// ```
/// use volsurf_models::implied::no_arbitrage_bounds;
/// use volsurf_models::instruments::{MarketContext, OptionContract, OptionKind};
///
/// let call = OptionContract::american(90.0, 1.0, OptionKind::Call).unwrap();
/// let market = MarketContext::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// assert_eq!(no_arbitrage_bounds(&call, &market), (10.0, 100.0));
/// ```
pub fn no_arbitrage_bounds(contract: &OptionContract, market: &MarketContext) -> (f64, f64) {
    let lower = contract.intrinsic(market.spot());
    let upper = match contract.kind() {
        OptionKind::Call => market.spot(),
        OptionKind::Put => contract.strike() * market.discount_factor(contract.maturity()),
    };
    (lower, upper)
}

/// Finds the volatility at which the CRR lattice reproduces an observed price.
///
/// The objective `f(σ) = lattice(σ) - observed` is increasing in `σ`, so a
/// sign-changing bracket over the configured volatility range contains
/// exactly one root. The search converges only when the price residual is
/// within `tolerance · min(observed, 1)`, so quotes cheaper than one unit
/// are held to a relative rather than an absolute residual.
///
/// # Example
///
/// ```
/// use volsurf_core::types::Date;
/// use volsurf_models::implied::ImpliedVolSolver;
/// use volsurf_models::instruments::{MarketContext, OptionContract, OptionKind, Quote};
/// use volsurf_models::lattice::{price, DEFAULT_STEPS};
///
/// let contract = OptionContract::american(100.0, 1.0, OptionKind::Put).unwrap();
/// let market = MarketContext::new(100.0, 0.02, 0.0, 0.3).unwrap();
/// let observed = price(&contract, &market, DEFAULT_STEPS).unwrap();
///
/// let expiry = Date::from_ymd(2026, 1, 2).unwrap();
/// let quote = Quote::new(contract, market, observed, expiry);
/// let vol = ImpliedVolSolver::default().solve(&quote, DEFAULT_STEPS).unwrap();
/// assert!((vol - 0.3).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
}

impl ImpliedVolSolver {
    /// Create a solver.
    ///
    /// # Returns
    ///
    /// * `Err(ImpliedVolError::InvalidConfig)` - see [`ImpliedVolConfig::validate`]
    pub fn new(config: ImpliedVolConfig) -> Result<Self, ImpliedVolError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the search configuration.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Invert a quote's observed price on a lattice with `steps` time steps.
    ///
    /// The quote's own market volatility is ignored.
    ///
    /// # Returns
    ///
    /// * `Err(ImpliedVolError::ArbitrageViolation)` - price not finite or outside
    ///   [`no_arbitrage_bounds`]; no search is attempted
    /// * `Err(ImpliedVolError::NoSolution)` - root not bracketed by the search
    ///   range, or the tolerance was not met within the iteration budget
    /// * `Err(ImpliedVolError::Lattice)` - the lattice rejected `steps` or its parameters
    pub fn solve(&self, quote: &Quote, steps: usize) -> Result<f64, ImpliedVolError> {
        let contract = &quote.contract;
        let market = &quote.market;
        let observed = quote.observed_price;

        let (lower, upper) = no_arbitrage_bounds(contract, market);
        if !(observed.is_finite() && observed > lower && observed < upper) {
            return Err(ImpliedVolError::ArbitrageViolation {
                price: observed,
                lower,
                upper,
            });
        }

        let floor = min_stable_volatility(contract, market, steps) * (1.0 + STABILITY_MARGIN);
        let lo = self.config.min_volatility.max(floor);
        let hi = self.config.max_volatility;
        if lo >= hi {
            return Err(ImpliedVolError::NoSolution {
                iterations: 0,
                residual: f64::INFINITY,
            });
        }

        let objective = |sigma: f64| -> Result<f64, ImpliedVolError> {
            Ok(lattice::price(contract, &market.with_volatility(sigma), steps)? - observed)
        };
        let root_finder = SafeguardedSecantSolver::new(SolverConfig {
            tolerance: self.config.tolerance * observed.min(1.0),
            max_iterations: self.config.max_iterations,
        });
        let result = root_finder.try_find_root(objective, lo, hi)?;

        tracing::trace!(
            strike = contract.strike(),
            maturity = contract.maturity(),
            volatility = result.root,
            iterations = result.iterations,
            residual = result.residual,
            "implied volatility converged"
        );
        Ok(result.root)
    }
}

/// Invert a quote with the default [`ImpliedVolConfig`].
pub fn implied_volatility(quote: &Quote, steps: usize) -> Result<f64, ImpliedVolError> {
    ImpliedVolSolver::default().solve(quote, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{LatticeError, DEFAULT_STEPS};
    use approx::assert_relative_eq;
    use volsurf_core::types::Date;

    fn expiry() -> Date {
        Date::from_ymd(2026, 1, 2).unwrap()
    }

    fn quote(kind: OptionKind, strike: f64, observed: f64) -> Quote {
        let contract = OptionContract::american(strike, 1.0, kind).unwrap();
        let market = MarketContext::new(100.0, 0.02, 0.0, 0.0).unwrap();
        Quote::new(contract, market, observed, expiry())
    }

    fn lattice_quote(kind: OptionKind, strike: f64, vol: f64) -> Quote {
        let q = quote(kind, strike, 0.0);
        let observed =
            lattice::price(&q.contract, &q.market.with_volatility(vol), DEFAULT_STEPS).unwrap();
        q.with_price(observed)
    }

    // ========================================
    // Arbitrage Bound Tests
    // ========================================

    #[test]
    fn test_call_below_intrinsic() {
        match implied_volatility(&quote(OptionKind::Call, 90.0, 5.0), DEFAULT_STEPS).unwrap_err() {
            ImpliedVolError::ArbitrageViolation {
                price,
                lower,
                upper,
            } => {
                assert_eq!(price, 5.0);
                assert_eq!(lower, 10.0);
                assert_eq!(upper, 100.0);
            }
            _ => panic!("Expected ArbitrageViolation error"),
        }
    }

    #[test]
    fn test_price_equal_to_intrinsic_rejected() {
        let result = implied_volatility(&quote(OptionKind::Put, 110.0, 10.0), DEFAULT_STEPS);
        assert!(matches!(
            result,
            Err(ImpliedVolError::ArbitrageViolation { .. })
        ));
    }

    #[test]
    fn test_put_above_discounted_strike_rejected() {
        let upper = 100.0 * (-0.02_f64).exp();
        let result = implied_volatility(&quote(OptionKind::Put, 100.0, upper), DEFAULT_STEPS);
        assert!(matches!(
            result,
            Err(ImpliedVolError::ArbitrageViolation { .. })
        ));
    }

    #[test]
    fn test_non_finite_price_rejected() {
        for observed in [f64::NAN, f64::INFINITY, -1.0] {
            let result = implied_volatility(&quote(OptionKind::Call, 100.0, observed), 50);
            assert!(matches!(
                result,
                Err(ImpliedVolError::ArbitrageViolation { .. })
            ));
        }
    }

    // ========================================
    // Search Tests
    // ========================================

    #[test]
    fn test_round_trip_put() {
        let q = lattice_quote(OptionKind::Put, 105.0, 0.35);
        let vol = implied_volatility(&q, DEFAULT_STEPS).unwrap();
        assert_relative_eq!(vol, 0.35, epsilon = 1e-4);
    }

    #[test]
    fn test_price_above_range_has_no_solution() {
        // Call price just below spot needs far more than 400% volatility
        let result = implied_volatility(&quote(OptionKind::Call, 100.0, 99.9), DEFAULT_STEPS);
        match result.unwrap_err() {
            ImpliedVolError::NoSolution { iterations, .. } => assert_eq!(iterations, 0),
            _ => panic!("Expected NoSolution error"),
        }
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let config = ImpliedVolConfig {
            tolerance: 1e-14,
            max_iterations: 2,
            ..Default::default()
        };
        let solver = ImpliedVolSolver::new(config).unwrap();
        let q = lattice_quote(OptionKind::Put, 100.0, 0.25);
        match solver.solve(&q, DEFAULT_STEPS).unwrap_err() {
            ImpliedVolError::NoSolution { iterations, residual } => {
                assert_eq!(iterations, 2);
                assert!(residual > 1e-14);
            }
            _ => panic!("Expected NoSolution error"),
        }
    }

    #[test]
    fn test_far_out_of_the_money_quotes_recover_volatility() {
        // Prices below the absolute tolerance must not converge at the range floor
        let market = MarketContext::new(100.0, 0.02, 0.0, 0.0).unwrap();
        let cases = [
            OptionContract::american(70.0, 0.1, OptionKind::Put).unwrap(),
            OptionContract::american(140.0, 0.08, OptionKind::Call).unwrap(),
        ];

        for contract in cases {
            let observed =
                lattice::price(&contract, &market.with_volatility(0.2), DEFAULT_STEPS).unwrap();
            assert!(observed > 0.0 && observed < 1e-6);

            let q = Quote::new(contract, market, observed, expiry());
            let vol = implied_volatility(&q, DEFAULT_STEPS).unwrap();
            assert_relative_eq!(vol, 0.2, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_zero_steps_surfaces_lattice_error() {
        let q = lattice_quote(OptionKind::Put, 100.0, 0.25);
        assert_eq!(
            implied_volatility(&q, 0).unwrap_err(),
            ImpliedVolError::Lattice(LatticeError::InvalidStepCount { steps: 0 })
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ImpliedVolConfig {
            min_volatility: 1.0,
            max_volatility: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            ImpliedVolSolver::new(config),
            Err(ImpliedVolError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_lower_bracket_respects_stability_floor() {
        // |r - q| sqrt(dt) = 0.5 * sqrt(1/4) = 0.25 exceeds the configured min
        let contract = OptionContract::american(100.0, 1.0, OptionKind::Put).unwrap();
        let market = MarketContext::new(100.0, 0.5, 0.0, 0.0).unwrap();
        let observed = lattice::price(&contract, &market.with_volatility(0.6), 4).unwrap();
        let q = Quote::new(contract, market, observed, expiry());
        let vol = implied_volatility(&q, 4).unwrap();
        assert_relative_eq!(vol, 0.6, epsilon = 1e-4);
    }
}
