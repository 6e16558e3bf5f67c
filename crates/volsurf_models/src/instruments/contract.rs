//! Vanilla option contract terms.

use super::{ExerciseStyle, InstrumentError, OptionKind};
use volsurf_core::types::{Date, DayCountConvention};

/// Immutable terms of a vanilla option.
///
/// # Examples
/// ```
/// use volsurf_models::instruments::{ExerciseStyle, OptionContract, OptionKind};
///
/// let put = OptionContract::american(100.0, 0.5, OptionKind::Put).unwrap();
/// assert_eq!(put.exercise(), ExerciseStyle::American);
/// assert!(OptionContract::american(-1.0, 0.5, OptionKind::Put).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    strike: f64,
    kind: OptionKind,
    maturity: f64,
    exercise: ExerciseStyle,
}

impl OptionContract {
    /// Create a contract.
    ///
    /// # Returns
    /// * `Err(InstrumentError::InvalidStrike)` - strike not finite and positive
    /// * `Err(InstrumentError::InvalidMaturity)` - maturity not finite and non-negative
    pub fn new(
        strike: f64,
        maturity: f64,
        kind: OptionKind,
        exercise: ExerciseStyle,
    ) -> Result<Self, InstrumentError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if !(maturity.is_finite() && maturity >= 0.0) {
            return Err(InstrumentError::InvalidMaturity { maturity });
        }
        Ok(Self {
            strike,
            kind,
            maturity,
            exercise,
        })
    }

    /// American contract.
    pub fn american(strike: f64, maturity: f64, kind: OptionKind) -> Result<Self, InstrumentError> {
        Self::new(strike, maturity, kind, ExerciseStyle::American)
    }

    /// European contract.
    pub fn european(strike: f64, maturity: f64, kind: OptionKind) -> Result<Self, InstrumentError> {
        Self::new(strike, maturity, kind, ExerciseStyle::European)
    }

    /// American contract whose maturity is the `day_count` year fraction
    /// from `valuation` to `expiry`.
    ///
    /// # Examples
    /// ```
    /// use volsurf_core::types::{Date, DayCountConvention};
    /// use volsurf_models::instruments::{OptionContract, OptionKind};
    ///
    /// let valuation = Date::from_ymd(2025, 1, 1).unwrap();
    /// let expiry = Date::from_ymd(2026, 1, 1).unwrap();
    /// let call = OptionContract::from_dates(
    ///     100.0, OptionKind::Call, valuation, expiry, DayCountConvention::Actual365Fixed,
    /// ).unwrap();
    /// assert_eq!(call.maturity(), 1.0);
    /// ```
    pub fn from_dates(
        strike: f64,
        kind: OptionKind,
        valuation: Date,
        expiry: Date,
        day_count: DayCountConvention,
    ) -> Result<Self, InstrumentError> {
        Self::american(strike, day_count.year_fraction(valuation, expiry), kind)
    }

    /// Same terms with a different exercise style.
    pub fn with_exercise(self, exercise: ExerciseStyle) -> Self {
        Self { exercise, ..self }
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Call or put.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Exercise style.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Immediate exercise value at `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.kind.intrinsic(spot, self.strike)
    }
}
