//! Order-based gap filling of inverted volatilities.

use std::fmt;

/// Where a batch entry's volatility came from.
///
/// # Examples
/// ```
/// use volsurf_batch::VolatilitySource;
///
/// assert_eq!(VolatilitySource::ForwardFilled.to_string(), "forward_filled");
/// assert!(!VolatilitySource::BackwardFilled.is_solved());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VolatilitySource {
    /// Inverted from the quote's own price.
    Solved,
    /// Copied from the nearest preceding solved entry.
    ForwardFilled,
    /// Copied from the nearest following solved entry.
    BackwardFilled,
}

impl VolatilitySource {
    /// Returns whether the value was inverted rather than propagated.
    #[inline]
    pub fn is_solved(&self) -> bool {
        matches!(self, VolatilitySource::Solved)
    }

    /// Stable lowercase name, as written to output files.
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilitySource::Solved => "solved",
            VolatilitySource::ForwardFilled => "forward_filled",
            VolatilitySource::BackwardFilled => "backward_filled",
        }
    }
}

impl fmt::Display for VolatilitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fills missing values in input order.
///
/// Each gap takes the nearest preceding present value; gaps before the first
/// present value take the nearest following one. When every value is missing
/// the output is all `None`.
///
/// # Examples
/// ```
/// use volsurf_batch::fill::fill_in_order;
/// use volsurf_batch::VolatilitySource::*;
///
/// let filled = fill_in_order(&[None, Some(0.2), None, Some(0.3)]);
/// assert_eq!(
///     filled,
///     vec![
///         Some((0.2, BackwardFilled)),
///         Some((0.2, Solved)),
///         Some((0.2, ForwardFilled)),
///         Some((0.3, Solved)),
///     ]
/// );
/// ```
pub fn fill_in_order(values: &[Option<f64>]) -> Vec<Option<(f64, VolatilitySource)>> {
    let mut last = None;
    let mut filled: Vec<Option<(f64, VolatilitySource)>> = values
        .iter()
        .map(|value| match value {
            Some(v) => {
                last = Some(*v);
                Some((*v, VolatilitySource::Solved))
            }
            None => last.map(|v| (v, VolatilitySource::ForwardFilled)),
        })
        .collect();

    // Only a leading run can still be empty after the forward pass.
    if let Some(first) = values.iter().flatten().next() {
        for slot in filled.iter_mut().take_while(|slot| slot.is_none()) {
            *slot = Some((*first, VolatilitySource::BackwardFilled));
        }
    }

    filled
}
