//! Option exercise style definitions.

use std::fmt;

/// Option exercise style.
///
/// # Variants
/// - `American`: Exercise at any time up to expiry
/// - `European`: Exercise only at expiry
///
/// # Examples
/// ```
/// use volsurf_models::instruments::ExerciseStyle;
///
/// assert!(ExerciseStyle::American.allows_early_exercise());
/// assert!(!ExerciseStyle::European.allows_early_exercise());
/// assert_eq!(ExerciseStyle::default(), ExerciseStyle::American);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Exercise at any time up to expiry.
    #[default]
    American,

    /// Exercise only at expiry.
    European,
}

impl ExerciseStyle {
    /// Returns whether this is an American exercise style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns whether this is a European exercise style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns whether the holder may exercise before expiry.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        self.is_american()
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::American => write!(f, "American"),
            ExerciseStyle::European => write!(f, "European"),
        }
    }
}
