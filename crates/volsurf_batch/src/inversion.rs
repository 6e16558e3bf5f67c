//! Batch implied volatility inversion.

use crate::error::BatchError;
use crate::fill::{fill_in_order, VolatilitySource};
use crate::parallel::{ordered_map, should_parallelize, DEFAULT_PARALLEL_THRESHOLD};
use volsurf_core::market_data::surfaces::VolatilityObservation;
use volsurf_core::types::Date;
use volsurf_models::implied::{ImpliedVolConfig, ImpliedVolError, ImpliedVolSolver};
use volsurf_models::instruments::Quote;
use volsurf_models::lattice::DEFAULT_STEPS;

/// Settings for a batch run.
///
/// # Example
///
/// ```
/// use volsurf_batch::BatchConfig;
///
/// let config = BatchConfig::default();
/// assert_eq!(config.steps, 200);
/// assert_eq!(config.parallel_threshold, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatchConfig {
    /// Lattice time steps per valuation.
    pub steps: usize,
    /// Minimum number of quotes before inverting on the rayon pool.
    pub parallel_threshold: usize,
    /// Implied volatility search settings.
    pub solver: ImpliedVolConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            solver: ImpliedVolConfig::default(),
        }
    }
}

/// A quote that could not be inverted.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteFailure {
    /// Position of the quote in the input.
    pub index: usize,
    /// Why inversion failed.
    pub error: ImpliedVolError,
}

/// One output row per input quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionEntry {
    /// Quote strike.
    pub strike: f64,
    /// Quote expiry.
    pub expiry: Date,
    /// Solved or filled volatility; `None` only when no quote solved.
    pub volatility: Option<f64>,
    /// Origin of `volatility`.
    pub source: Option<VolatilitySource>,
}

/// Result of inverting a batch of quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchInversion {
    entries: Vec<InversionEntry>,
    failures: Vec<QuoteFailure>,
}

impl BatchInversion {
    /// Entries in input order.
    pub fn entries(&self) -> &[InversionEntry] {
        &self.entries
    }

    /// Per-quote failures in input order.
    pub fn failures(&self) -> &[QuoteFailure] {
        &self.failures
    }

    /// Number of quotes in the batch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of quotes whose price was inverted directly.
    pub fn solved_count(&self) -> usize {
        self.entries.len() - self.failures.len()
    }

    /// Fraction of quotes that failed, in `[0, 1]`; 0 for an empty batch.
    pub fn failure_rate(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.failures.len() as f64 / self.entries.len() as f64
        }
    }

    /// Volatility per entry, `None` where unresolved.
    pub fn volatilities(&self) -> Vec<Option<f64>> {
        self.entries.iter().map(|e| e.volatility).collect()
    }

    /// Resolved entries as surface builder input.
    pub fn observations(&self) -> Vec<VolatilityObservation> {
        self.entries
            .iter()
            .filter_map(|e| {
                e.volatility
                    .map(|vol| VolatilityObservation::new(e.strike, e.expiry, vol))
            })
            .collect()
    }
}

/// Inverts quotes independently and fills the gaps left by failures.
///
/// # Example
///
/// ```
/// use volsurf_batch::{BatchConfig, BatchInverter};
///
/// let inverter = BatchInverter::new(BatchConfig::default()).unwrap();
/// let result = inverter.invert(&[]);
/// assert!(result.is_empty());
/// assert_eq!(result.failure_rate(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct BatchInverter {
    config: BatchConfig,
    solver: ImpliedVolSolver,
}

impl BatchInverter {
    /// Create an inverter.
    ///
    /// # Returns
    ///
    /// * `Err(BatchError::ZeroSteps)` - `steps == 0`
    /// * `Err(BatchError::Solver)` - invalid solver configuration
    pub fn new(config: BatchConfig) -> Result<Self, BatchError> {
        if config.steps == 0 {
            return Err(BatchError::ZeroSteps);
        }
        let solver = ImpliedVolSolver::new(config.solver)?;
        Ok(Self { config, solver })
    }

    /// Returns the batch configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Invert every quote, then fill missing volatilities in input order.
    pub fn invert(&self, quotes: &[Quote]) -> BatchInversion {
        let parallel = should_parallelize(quotes.len(), self.config.parallel_threshold);
        tracing::debug!(quotes = quotes.len(), parallel, steps = self.config.steps, "inverting batch");

        let steps = self.config.steps;
        let results = ordered_map(quotes, parallel, |quote| self.solver.solve(quote, steps));

        let mut solved = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(vol) => solved.push(Some(vol)),
                Err(error) => {
                    tracing::debug!(index, strike = quotes[index].contract.strike(), %error, "quote failed");
                    failures.push(QuoteFailure { index, error });
                    solved.push(None);
                }
            }
        }

        let entries = quotes
            .iter()
            .zip(fill_in_order(&solved))
            .map(|(quote, filled)| InversionEntry {
                strike: quote.contract.strike(),
                expiry: quote.expiry,
                volatility: filled.map(|(vol, _)| vol),
                source: filled.map(|(_, source)| source),
            })
            .collect();

        let inversion = BatchInversion { entries, failures };
        tracing::info!(
            quotes = inversion.len(),
            failures = inversion.failures.len(),
            failure_rate = inversion.failure_rate(),
            "batch inversion complete"
        );
        inversion
    }
}

/// Invert quotes with default solver settings on a lattice of `steps` steps.
///
/// A zero step count is not rejected up front; every quote then fails with
/// a lattice error and the result holds no volatilities.
pub fn invert_all(quotes: &[Quote], steps: usize) -> BatchInversion {
    let config = BatchConfig {
        steps,
        ..BatchConfig::default()
    };
    let inverter = BatchInverter {
        config,
        solver: ImpliedVolSolver::default(),
    };
    inverter.invert(quotes)
}
