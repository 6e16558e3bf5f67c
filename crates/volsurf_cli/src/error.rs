//! CLI error types.

use crate::config::ConfigError;
use thiserror::Error;
use volsurf_batch::BatchError;
use volsurf_core::market_data::MarketDataError;
use volsurf_core::types::DateError;
use volsurf_models::instruments::InstrumentError;
use volsurf_models::lattice::LatticeError;

/// Errors surfaced by `volsurf` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Bad command line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Quote file row that cannot be read.
    #[error("Invalid quote on line {line}: {message}")]
    InvalidQuote {
        /// 1-based line in the input file, header included
        line: u64,
        /// What was wrong with the row
        message: String,
    },

    /// No quote survived inversion, so there is nothing to build a surface from.
    #[error("No implied volatilities resolved from {quotes} quotes")]
    NoObservations {
        /// Number of quotes in the batch
        quotes: usize,
    },

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid date.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid contract or market terms.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Lattice pricing failure.
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// Batch set-up failure.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// Surface construction or query failure.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
