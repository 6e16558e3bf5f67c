//! Call/put direction and intrinsic value.

use super::InstrumentError;
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// Direction of a vanilla option.
///
/// # Examples
/// ```
/// use volsurf_models::instruments::OptionKind;
///
/// assert_eq!(OptionKind::Call.intrinsic(110.0, 100.0), 10.0);
/// assert_eq!(OptionKind::Put.intrinsic(110.0, 100.0), 0.0);
/// assert_eq!("PUT".parse::<OptionKind>().unwrap(), OptionKind::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Right to buy: `max(S - K, 0)`
    Call,
    /// Right to sell: `max(K - S, 0)`
    Put,
}

impl OptionKind {
    /// Immediate exercise value at `spot`.
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionKind::Call => (spot - strike).max(T::zero()),
            OptionKind::Put => (strike - spot).max(T::zero()),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionKind::Put)
    }
}

impl FromStr for OptionKind {
    type Err = InstrumentError;

    /// Parses `call`/`c` and `put`/`p`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            _ => Err(InstrumentError::InvalidParameter {
                message: format!("unknown option type '{}'", s),
            }),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}
