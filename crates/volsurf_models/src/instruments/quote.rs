//! Observed option quotes.

use super::{MarketContext, OptionContract};
use volsurf_core::types::Date;

/// An observed option price together with everything needed to invert it.
///
/// The market's volatility is ignored by inversion; the expiry date places
/// the resulting implied volatility on a shared date axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quote {
    /// Contract terms
    pub contract: OptionContract,
    /// Market state at observation time
    pub market: MarketContext,
    /// Observed option price
    pub observed_price: f64,
    /// Calendar expiry of the contract
    pub expiry: Date,
}

impl Quote {
    /// Create a quote.
    pub fn new(
        contract: OptionContract,
        market: MarketContext,
        observed_price: f64,
        expiry: Date,
    ) -> Self {
        Self {
            contract,
            market,
            observed_price,
            expiry,
        }
    }

    /// Same quote with a different observed price.
    pub fn with_price(self, observed_price: f64) -> Self {
        Self {
            observed_price,
            ..self
        }
    }
}
