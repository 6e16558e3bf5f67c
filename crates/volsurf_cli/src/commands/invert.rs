//! Invert command implementation
//!
//! Loads a quote file and writes one implied volatility per quote.

use std::io::Write;
use std::path::Path;
use tracing::{info, warn};
use volsurf_batch::{BatchInversion, BatchInverter};

use super::open_output;
use crate::config::VolsurfConfig;
use crate::io::{load_quotes, write_inversion};
use crate::Result;

/// Load `quotes` and invert them with the configured lattice and solver.
pub fn invert_file(config: &VolsurfConfig, quotes: &Path) -> Result<BatchInversion> {
    let valuation = config.valuation_date_or_today();
    let quotes = load_quotes(quotes, valuation, config.surface.day_count)?;
    info!(quotes = quotes.len(), %valuation, steps = config.lattice.steps, "Loaded quotes");

    let inverter = BatchInverter::new(config.batch_config())?;
    Ok(inverter.invert(&quotes))
}

/// Run the invert command
pub fn run(config: &VolsurfConfig, quotes: &Path, output: Option<&Path>) -> Result<()> {
    let inversion = invert_file(config, quotes)?;

    if inversion.failure_rate() > 0.0 {
        warn!(
            failed = inversion.failures().len(),
            total = inversion.len(),
            "Some quotes could not be inverted; gaps were filled from neighbouring quotes"
        );
    }

    let mut writer = open_output(output)?;
    write_inversion(&mut writer, &inversion)?;
    writer.flush()?;

    info!(
        solved = inversion.solved_count(),
        failure_rate = inversion.failure_rate(),
        "Inversion complete"
    );
    Ok(())
}
