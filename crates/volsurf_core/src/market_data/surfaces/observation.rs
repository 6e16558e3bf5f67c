//! Implied volatility observations and the accessor trait the surface
//! builder consumes.

use crate::types::Date;

/// One implied volatility at a (strike, expiry) pair.
///
/// # Example
///
/// ```
/// use volsurf_core::market_data::surfaces::{SurfacePoint, VolatilityObservation};
/// use volsurf_core::types::Date;
///
/// let expiry = Date::from_ymd(2025, 6, 20).unwrap();
/// let obs = VolatilityObservation::new(100.0, expiry, 0.2);
/// assert_eq!(obs.strike(), 100.0);
/// assert_eq!(obs.expiry(), expiry);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatilityObservation {
    /// Strike price
    pub strike: f64,
    /// Expiry date
    pub expiry: Date,
    /// Annualized implied volatility
    pub volatility: f64,
}

impl VolatilityObservation {
    /// Create a new observation.
    pub fn new(strike: f64, expiry: Date, volatility: f64) -> Self {
        Self {
            strike,
            expiry,
            volatility,
        }
    }
}

/// Accessors for anything that can be placed on a volatility grid.
///
/// Implemented for [`VolatilityObservation`] and for `(strike, expiry, vol)`
/// tuples, so callers holding their own row types only need three getters.
pub trait SurfacePoint {
    /// Strike price.
    fn strike(&self) -> f64;
    /// Expiry date.
    fn expiry(&self) -> Date;
    /// Annualized implied volatility.
    fn volatility(&self) -> f64;
}

impl SurfacePoint for VolatilityObservation {
    #[inline]
    fn strike(&self) -> f64 {
        self.strike
    }

    #[inline]
    fn expiry(&self) -> Date {
        self.expiry
    }

    #[inline]
    fn volatility(&self) -> f64 {
        self.volatility
    }
}

impl SurfacePoint for (f64, Date, f64) {
    #[inline]
    fn strike(&self) -> f64 {
        self.0
    }

    #[inline]
    fn expiry(&self) -> Date {
        self.1
    }

    #[inline]
    fn volatility(&self) -> f64 {
        self.2
    }
}

impl<P: SurfacePoint + ?Sized> SurfacePoint for &P {
    #[inline]
    fn strike(&self) -> f64 {
        (**self).strike()
    }

    #[inline]
    fn expiry(&self) -> Date {
        (**self).expiry()
    }

    #[inline]
    fn volatility(&self) -> f64 {
        (**self).volatility()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_point() {
        let expiry = Date::from_ymd(2025, 1, 17).unwrap();
        let point = (95.0, expiry, 0.31);
        assert_eq!(point.strike(), 95.0);
        assert_eq!(point.expiry(), expiry);
        assert_eq!(point.volatility(), 0.31);
    }

    #[test]
    fn test_reference_point() {
        let obs = VolatilityObservation::new(100.0, Date::from_ymd(2025, 1, 17).unwrap(), 0.2);
        let by_ref: &VolatilityObservation = &obs;
        assert_eq!(SurfacePoint::volatility(&by_ref), 0.2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let obs = VolatilityObservation::new(100.0, Date::from_ymd(2025, 1, 17).unwrap(), 0.2);
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(json, r#"{"strike":100.0,"expiry":"2025-01-17","volatility":0.2}"#);
    }
}
