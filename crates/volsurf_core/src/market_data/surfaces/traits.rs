//! Volatility surface trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Implied volatility lookup by strike and time to expiry.
///
/// # Contract
///
/// - `volatility(strike, expiry)` returns the implied volatility σ(K, T),
///   with `expiry` as a year fraction from the surface's valuation anchor
/// - `strike_domain()` returns the range of strikes backed by data
/// - `expiry_domain()` returns the range of expiry times backed by data
///
/// # Invariants
///
/// - σ >= 0 for every finite (strike, expiry) pair
pub trait VolatilitySurface<T: Float> {
    /// Return the implied volatility for given strike and expiry.
    ///
    /// # Returns
    ///
    /// * `Ok(sigma)` - Implied volatility
    /// * `Err(MarketDataError::InvalidStrike)` - If strike is not finite
    /// * `Err(MarketDataError::InvalidExpiry)` - If expiry is not finite
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError>;

    /// Return the valid strike domain `(K_min, K_max)`.
    fn strike_domain(&self) -> (T, T);

    /// Return the valid expiry domain `(T_min, T_max)` in years.
    fn expiry_domain(&self) -> (T, T);
}
