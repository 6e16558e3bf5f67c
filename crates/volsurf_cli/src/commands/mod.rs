//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod invert;
pub mod price;
pub mod surface;

use crate::{CliError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Output encodings for tabular results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated rows with a header
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: csv, json",
                other
            ))),
        }
    }
}

/// Buffered writer to `path`, or stdout when no path is given.
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(writer)
}
