//! Volsurf CLI - quote inversion, surface sampling and lattice pricing
//!
//! Library half of the `volsurf` binary. Commands are exposed here so they
//! can be driven from integration tests.
//!
//! # Commands
//!
//! - `volsurf invert --quotes <file>` - Implied volatility per quote
//! - `volsurf surface --quotes <file>` - Sampled volatility surface
//! - `volsurf price --strike <K> ...` - Single American lattice price
//!
//! # Configuration
//!
//! Settings come from a TOML file, `VOLSURF_*` environment variables and
//! command line flags, in increasing order of precedence. See [`config`].

#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod io;

pub use error::{CliError, Result};

use config::LogLevel;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `level` when set.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
