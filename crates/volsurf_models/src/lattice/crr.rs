//! Cox-Ross-Rubinstein binomial lattice.

use super::LatticeError;
use crate::instruments::{ExerciseStyle, MarketContext, OptionContract, OptionKind};
use num_traits::Float;

/// Default number of time steps.
///
/// Keeps the discretisation error of an at-the-money price well below the
/// implied-volatility price tolerance at O(steps²) cost per valuation.
pub const DEFAULT_STEPS: usize = 200;

/// Recombining CRR tree parameters for a fixed maturity and volatility.
///
/// - `dt = T / steps`
/// - `u = exp(σ √dt)`, `d = 1 / u`
/// - `p = (exp((r - q) dt) - d) / (u - d)`
///
/// Construction fails when `p` falls outside `[0, 1]`, which happens once
/// `σ < |r - q| √dt`.
///
/// # Examples
///
/// ```
/// use volsurf_models::instruments::{ExerciseStyle, OptionKind};
/// use volsurf_models::lattice::CrrLattice;
///
/// let lattice = CrrLattice::new(1.0_f64, 0.2, 0.05, 0.0, 100).unwrap();
/// let put = lattice.roll_back(100.0, 100.0, OptionKind::Put, ExerciseStyle::American);
/// assert!(put > 5.0 && put < 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrrLattice<T: Float> {
    steps: usize,
    steps_i32: i32,
    dt: T,
    up: T,
    down: T,
    probability: T,
    discount: T,
}

impl<T: Float> CrrLattice<T> {
    /// Build the tree parameters.
    ///
    /// `maturity` must be positive and `volatility` must be positive; callers
    /// handle the degenerate cases before reaching the tree (see [`price`]).
    ///
    /// # Returns
    ///
    /// * `Err(LatticeError::InvalidStepCount)` - `steps == 0`
    /// * `Err(LatticeError::ParameterInconsistency)` - `p` outside `[0, 1]` or not finite
    pub fn new(
        maturity: T,
        volatility: T,
        rate: T,
        dividend_yield: T,
        steps: usize,
    ) -> Result<Self, LatticeError> {
        let steps_i32 = i32::try_from(steps)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(LatticeError::InvalidStepCount { steps })?;
        let n = T::from(steps).ok_or(LatticeError::InvalidStepCount { steps })?;

        let dt = maturity / n;
        let up = (volatility * dt.sqrt()).exp();
        let down = up.recip();
        let growth = ((rate - dividend_yield) * dt).exp();
        let probability = (growth - down) / (up - down);

        if !(probability.is_finite() && probability >= T::zero() && probability <= T::one()) {
            return Err(LatticeError::ParameterInconsistency {
                probability: probability.to_f64().unwrap_or(f64::NAN),
                dt: dt.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            steps,
            steps_i32,
            dt,
            up,
            down,
            probability,
            discount: (-rate * dt).exp(),
        })
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time step in years.
    #[inline]
    pub fn dt(&self) -> T {
        self.dt
    }

    /// Up move multiplier `u`.
    #[inline]
    pub fn up(&self) -> T {
        self.up
    }

    /// Down move multiplier `d = 1/u`.
    #[inline]
    pub fn down(&self) -> T {
        self.down
    }

    /// Risk-neutral up probability.
    #[inline]
    pub fn probability(&self) -> T {
        self.probability
    }

    /// One-step discount factor `exp(-r dt)`.
    #[inline]
    pub fn discount(&self) -> T {
        self.discount
    }

    /// Backward induction from terminal payoffs to the root node.
    ///
    /// Each node holds `exp(-r dt) (p V_up + (1-p) V_down)`; American
    /// exercise takes the maximum of that and intrinsic value. Uses a single
    /// buffer of `steps + 1` values.
    pub fn roll_back(&self, spot: T, strike: T, kind: OptionKind, exercise: ExerciseStyle) -> T {
        let n = self.steps;
        let early = exercise.allows_early_exercise();

        // Node j at step i sits at spot * d^i * (u/d)^j.
        let ratio = self.up / self.down;
        let disc_p = self.discount * self.probability;
        let disc_q = self.discount * (T::one() - self.probability);

        let mut values = Vec::with_capacity(n + 1);
        let mut s = spot * self.down.powi(self.steps_i32);
        for _ in 0..=n {
            values.push(kind.intrinsic(s, strike));
            s = s * ratio;
        }

        let mut base = spot * self.down.powi(self.steps_i32 - 1);
        for i in (0..n).rev() {
            let mut s = base;
            for j in 0..=i {
                let continuation = disc_p * values[j + 1] + disc_q * values[j];
                values[j] = if early {
                    continuation.max(kind.intrinsic(s, strike))
                } else {
                    continuation
                };
                s = s * ratio;
            }
            base = base * self.up;
        }

        values[0]
    }
}

/// Price a vanilla option on a CRR lattice.
///
/// Zero maturity or non-positive volatility short-circuits to the
/// immediate-exercise payoff without building a tree.
///
/// # Returns
///
/// * `Err(LatticeError::InvalidStepCount)` - `steps == 0`
/// * `Err(LatticeError::ParameterInconsistency)` - `p` outside `[0, 1]`
///
/// # Examples
///
/// ```
/// use volsurf_models::instruments::{MarketContext, OptionContract, OptionKind};
/// use volsurf_models::lattice::{price, DEFAULT_STEPS};
///
/// let contract = OptionContract::american(100.0, 1.0, OptionKind::Put).unwrap();
/// let market = MarketContext::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let value = price(&contract, &market, DEFAULT_STEPS).unwrap();
/// assert!((value - 6.09).abs() < 0.02);
/// ```
pub fn price(
    contract: &OptionContract,
    market: &MarketContext,
    steps: usize,
) -> Result<f64, LatticeError> {
    if steps == 0 {
        return Err(LatticeError::InvalidStepCount { steps });
    }

    let spot = market.spot();
    if contract.maturity() <= 0.0 || market.volatility() <= 0.0 {
        return Ok(contract.intrinsic(spot));
    }

    let lattice = CrrLattice::new(
        contract.maturity(),
        market.volatility(),
        market.rate(),
        market.dividend_yield(),
        steps,
    )?;
    Ok(lattice.roll_back(spot, contract.strike(), contract.kind(), contract.exercise()))
}

/// Smallest volatility for which the CRR up probability stays in `[0, 1]`:
/// `|r - q| √(T / steps)`.
///
/// Returns 0 when `steps == 0`.
pub fn min_stable_volatility(
    contract: &OptionContract,
    market: &MarketContext,
    steps: usize,
) -> f64 {
    if steps == 0 {
        return 0.0;
    }
    let dt = contract.maturity() / steps as f64;
    (market.rate() - market.dividend_yield()).abs() * dt.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market(vol: f64) -> MarketContext {
        MarketContext::new(100.0, 0.05, 0.0, vol).unwrap()
    }

    // ========================================
    // Parameter Tests
    // ========================================

    #[test]
    fn test_parameters() {
        let lattice = CrrLattice::new(1.0_f64, 0.2, 0.05, 0.01, 4).unwrap();
        assert_relative_eq!(lattice.dt(), 0.25, epsilon = 1e-15);
        assert_relative_eq!(lattice.up(), 0.1_f64.exp(), epsilon = 1e-15);
        assert_relative_eq!(lattice.up() * lattice.down(), 1.0, epsilon = 1e-15);
        let expected_p = ((0.04_f64 * 0.25).exp() - (-0.1_f64).exp())
            / (0.1_f64.exp() - (-0.1_f64).exp());
        assert_relative_eq!(lattice.probability(), expected_p, epsilon = 1e-14);
        assert_relative_eq!(lattice.discount(), (-0.0125_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_zero_steps() {
        assert_eq!(
            CrrLattice::new(1.0_f64, 0.2, 0.05, 0.0, 0).unwrap_err(),
            LatticeError::InvalidStepCount { steps: 0 }
        );
    }

    #[test]
    fn test_probability_above_one() {
        // sigma < r * sqrt(dt): 0.001 < 0.10 * 1.0
        match CrrLattice::new(1.0_f64, 0.001, 0.10, 0.0, 1).unwrap_err() {
            LatticeError::ParameterInconsistency { probability, dt } => {
                assert!(probability > 1.0);
                assert_eq!(dt, 1.0);
            }
            _ => panic!("Expected ParameterInconsistency error"),
        }
    }

    #[test]
    fn test_probability_below_zero() {
        // negative drift: q well above r
        assert!(matches!(
            CrrLattice::new(1.0_f64, 0.001, 0.0, 0.10, 1),
            Err(LatticeError::ParameterInconsistency { probability, .. }) if probability < 0.0
        ));
    }

    // ========================================
    // Pricing Tests
    // ========================================

    #[test]
    fn test_one_step_by_hand() {
        let contract = OptionContract::european(100.0, 1.0, OptionKind::Call).unwrap();
        let m = MarketContext::new(100.0, 0.0, 0.0, 0.2).unwrap();
        let u = 0.2_f64.exp();
        let d = 1.0 / u;
        let p = (1.0 - d) / (u - d);
        let expected = p * (100.0 * u - 100.0);
        assert_relative_eq!(price(&contract, &m, 1).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_return_intrinsic() {
        let put = OptionContract::american(110.0, 0.0, OptionKind::Put).unwrap();
        assert_eq!(price(&put, &market(0.2), DEFAULT_STEPS).unwrap(), 10.0);

        let call = OptionContract::american(90.0, 1.0, OptionKind::Call).unwrap();
        assert_eq!(price(&call, &market(0.0), DEFAULT_STEPS).unwrap(), 10.0);
        assert_eq!(price(&call, &market(-0.3), DEFAULT_STEPS).unwrap(), 10.0);
    }

    #[test]
    fn test_zero_steps_checked_before_degenerate_shortcut() {
        let put = OptionContract::american(110.0, 0.0, OptionKind::Put).unwrap();
        assert!(matches!(
            price(&put, &market(0.2), 0),
            Err(LatticeError::InvalidStepCount { steps: 0 })
        ));
    }

    #[test]
    fn test_american_put_reference_value() {
        // Hull: S=K=50, r=10%, sigma=40%, T=5 months, American put ~ 4.28
        let contract = OptionContract::american(50.0, 5.0 / 12.0, OptionKind::Put).unwrap();
        let m = MarketContext::new(50.0, 0.10, 0.0, 0.40).unwrap();
        let value = price(&contract, &m, 500).unwrap();
        assert!((value - 4.28).abs() < 0.01, "got {}", value);
    }

    #[test]
    fn test_generic_over_f32() {
        let lattice = CrrLattice::new(1.0_f32, 0.2, 0.05, 0.0, 50).unwrap();
        let put = lattice.roll_back(100.0_f32, 100.0, OptionKind::Put, ExerciseStyle::European);
        let reference = CrrLattice::new(1.0_f64, 0.2, 0.05, 0.0, 50)
            .unwrap()
            .roll_back(100.0, 100.0, OptionKind::Put, ExerciseStyle::European);
        assert!((put as f64 - reference).abs() < 1e-3);
    }

    #[test]
    fn test_min_stable_volatility() {
        let contract = OptionContract::american(100.0, 1.0, OptionKind::Put).unwrap();
        let m = MarketContext::new(100.0, 0.05, 0.01, 0.2).unwrap();
        let floor = min_stable_volatility(&contract, &m, 100);
        assert_relative_eq!(floor, 0.04 * 0.1, epsilon = 1e-15);

        assert!(price(&contract, &m.with_volatility(floor * 1.001), 100).is_ok());
        assert!(price(&contract, &m.with_volatility(floor * 0.999), 100).is_err());
        assert_eq!(min_stable_volatility(&contract, &m, 0), 0.0);
    }
}
