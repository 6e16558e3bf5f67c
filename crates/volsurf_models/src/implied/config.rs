//! Implied volatility search configuration.

use super::ImpliedVolError;

/// Search domain and convergence settings for [`ImpliedVolSolver`](super::ImpliedVolSolver).
///
/// # Example
///
/// ```
/// use volsurf_models::implied::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert_eq!(config.max_volatility, 4.0);
/// assert!(config.validate().is_ok());
///
/// let bad = ImpliedVolConfig { min_volatility: 5.0, ..config };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpliedVolConfig {
    /// Price residual at which the search converges, scaled by the observed
    /// price when that is below 1.
    pub tolerance: f64,

    /// Maximum lattice evaluations inside the bracket.
    pub max_iterations: usize,

    /// Lower end of the volatility search range.
    pub min_volatility: f64,

    /// Upper end of the volatility search range.
    pub max_volatility: f64,
}

impl Default for ImpliedVolConfig {
    /// Default values:
    /// - `tolerance`: 1e-6
    /// - `max_iterations`: 100
    /// - `min_volatility`: 1e-4
    /// - `max_volatility`: 4.0 (400%)
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            min_volatility: 1e-4,
            max_volatility: 4.0,
        }
    }
}

impl ImpliedVolConfig {
    /// Check that the configuration describes a usable search.
    ///
    /// # Returns
    ///
    /// * `Err(ImpliedVolError::InvalidConfig)` - non-positive tolerance, zero
    ///   iteration budget, or a range that is not `0 < min < max`
    pub fn validate(&self) -> Result<(), ImpliedVolError> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(ImpliedVolError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(ImpliedVolError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        if !(self.min_volatility > 0.0
            && self.min_volatility < self.max_volatility
            && self.max_volatility.is_finite())
        {
            return Err(ImpliedVolError::InvalidConfig(format!(
                "volatility range must satisfy 0 < min < max, got [{}, {}]",
                self.min_volatility, self.max_volatility
            )));
        }
        Ok(())
    }
}
