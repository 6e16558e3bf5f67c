//! Black-Scholes-Merton closed form for European options on a dividend-paying asset.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The lattice converges to these prices for European exercise, which makes
//! this model the reference when checking tree discretisation error.

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::{MarketContext, OptionContract, OptionKind};

/// Below this maturity the option is priced at intrinsic value.
const EXPIRY_EPSILON: f64 = 1e-10;

/// Black-Scholes-Merton model with continuous dividend yield.
///
/// # Examples
/// ```
/// use volsurf_models::analytical::BlackScholesMerton;
///
/// let bs = BlackScholesMerton::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesMerton {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Continuous dividend yield (q)
    dividend_yield: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholesMerton {
    /// Creates a new model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(
        spot: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        if !(spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Model parameters taken from a [`MarketContext`].
    pub fn from_market(market: &MarketContext) -> Result<Self, AnalyticalError> {
        Self::new(
            market.spot(),
            market.rate(),
            market.dividend_yield(),
            market.volatility(),
        )
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift = (self.rate - self.dividend_yield + 0.5 * self.volatility * self.volatility)
            * expiry;
        ((self.spot / strike).ln() + drift) / vol_sqrt_t
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price.
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        self.price(OptionKind::Call, strike, expiry)
    }

    /// European put price.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        self.price(OptionKind::Put, strike, expiry)
    }

    /// European price for either option kind. Intrinsic value at expiry.
    pub fn price(&self, kind: OptionKind, strike: f64, expiry: f64) -> f64 {
        if expiry <= EXPIRY_EPSILON {
            return kind.intrinsic(self.spot, strike);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let forward_spot = self.spot * (-self.dividend_yield * expiry).exp();
        let discounted_strike = strike * (-self.rate * expiry).exp();

        match kind {
            OptionKind::Call => forward_spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionKind::Put => discounted_strike * norm_cdf(-d2) - forward_spot * norm_cdf(-d1),
        }
    }

    /// Price a contract. Only European exercise has a closed form.
    ///
    /// # Errors
    /// - `AnalyticalError::UnsupportedExerciseStyle` for American contracts
    pub fn price_contract(&self, contract: &OptionContract) -> Result<f64, AnalyticalError> {
        if contract.exercise().allows_early_exercise() {
            return Err(AnalyticalError::UnsupportedExerciseStyle {
                style: contract.exercise().to_string(),
            });
        }
        Ok(self.price(contract.kind(), contract.strike(), contract.maturity()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> BlackScholesMerton {
        BlackScholesMerton::new(100.0, 0.05, 0.0, 0.2).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_invalid_spot() {
        match BlackScholesMerton::new(0.0, 0.05, 0.0, 0.2).unwrap_err() {
            AnalyticalError::InvalidSpot { spot } => assert_eq!(spot, 0.0),
            _ => panic!("Expected InvalidSpot error"),
        }
    }

    #[test]
    fn test_new_invalid_volatility() {
        assert!(matches!(
            BlackScholesMerton::new(100.0, 0.05, 0.0, -0.1),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(BlackScholesMerton::new(100.0, 0.05, 0.0, f64::NAN).is_err());
    }

    // ==========================================================
    // Pricing Tests
    // ==========================================================

    #[test]
    fn test_reference_values() {
        // Hull: S=K=100, r=5%, sigma=20%, T=1
        assert_relative_eq!(model().price_call(100.0, 1.0), 10.4506, epsilon = 1e-3);
        assert_relative_eq!(model().price_put(100.0, 1.0), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_put_call_parity_with_dividends() {
        let bs = BlackScholesMerton::new(100.0, 0.03, 0.02, 0.25).unwrap();
        for strike in [80.0, 100.0, 120.0] {
            let lhs = bs.price_call(strike, 2.0) - bs.price_put(strike, 2.0);
            let rhs = 100.0 * (-0.04_f64).exp() - strike * (-0.06_f64).exp();
            assert_relative_eq!(lhs, rhs, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_expiry_zero_returns_intrinsic() {
        assert_eq!(model().price_call(90.0, 0.0), 10.0);
        assert_eq!(model().price_put(90.0, 0.0), 0.0);
    }

    #[test]
    fn test_price_contract_rejects_american() {
        let contract = OptionContract::american(100.0, 1.0, OptionKind::Put).unwrap();
        match model().price_contract(&contract).unwrap_err() {
            AnalyticalError::UnsupportedExerciseStyle { style } => assert_eq!(style, "American"),
            _ => panic!("Expected UnsupportedExerciseStyle error"),
        }

        let european = OptionContract::european(100.0, 1.0, OptionKind::Put).unwrap();
        assert_relative_eq!(
            model().price_contract(&european).unwrap(),
            model().price_put(100.0, 1.0),
            epsilon = 1e-15
        );
    }
}
