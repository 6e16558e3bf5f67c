//! Flat market state for a single underlying.

use super::InstrumentError;

/// Spot, continuously compounded rate, dividend yield and volatility.
///
/// All four are flat scalars. The volatility may be zero or negative, in
/// which case pricers treat the market as degenerate and return intrinsic
/// value.
///
/// # Examples
/// ```
/// use volsurf_models::instruments::MarketContext;
///
/// let market = MarketContext::new(100.0, 0.05, 0.01, 0.2).unwrap();
/// let bumped = market.with_volatility(0.25);
/// assert_eq!(bumped.volatility(), 0.25);
/// assert_eq!(bumped.spot(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketContext {
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
}

impl MarketContext {
    /// Create a market context.
    ///
    /// # Returns
    /// * `Err(InstrumentError::InvalidSpot)` - spot not finite and positive
    /// * `Err(InstrumentError::InvalidParameter)` - non-finite rate, yield or volatility
    pub fn new(
        spot: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, InstrumentError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(InstrumentError::InvalidSpot { spot });
        }
        for (name, value) in [
            ("rate", rate),
            ("dividend yield", dividend_yield),
            ("volatility", volatility),
        ] {
            if !value.is_finite() {
                return Err(InstrumentError::InvalidParameter {
                    message: format!("{} must be finite, got {}", name, value),
                });
            }
        }
        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Copy with a new volatility.
    #[inline]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Continuously compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Annualized volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// `exp(-r * t)`.
    #[inline]
    pub fn discount_factor(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }
}
