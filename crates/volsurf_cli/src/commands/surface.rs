//! Surface command implementation
//!
//! Inverts a quote file, builds the variance surface and prints a sampled mesh.

use std::io::Write;
use std::path::Path;
use tracing::info;
use volsurf_core::market_data::surfaces::{BlackVarianceSurface, SurfaceSample, VolSurfaceBuilder};

use super::{invert::invert_file, open_output, OutputFormat};
use crate::config::VolsurfConfig;
use crate::io::{write_sample_csv, write_sample_json};
use crate::{CliError, Result};

/// Sampling options for the surface command
#[derive(Debug, Clone, Default)]
pub struct SampleOptions {
    /// Strikes per row; config default when unset
    pub num_strikes: Option<usize>,
    /// Sampled times; config default when unset
    pub num_times: Option<usize>,
    /// Lower strike bound
    pub strike_min: Option<f64>,
    /// Upper strike bound
    pub strike_max: Option<f64>,
}

/// Invert `quotes` and build the surface from the resolved volatilities.
pub fn build_from_file(config: &VolsurfConfig, quotes: &Path) -> Result<BlackVarianceSurface> {
    let inversion = invert_file(config, quotes)?;
    let observations = inversion.observations();
    if observations.is_empty() {
        return Err(CliError::NoObservations {
            quotes: inversion.len(),
        });
    }

    let surface = VolSurfaceBuilder::new(config.valuation_date_or_today())
        .with_interpolation(config.surface.interpolation)
        .with_day_count(config.surface.day_count)
        .build(&observations)?;

    info!(
        strikes = surface.grid().num_strikes(),
        expiries = surface.grid().num_expiries(),
        interpolation = %surface.interpolation(),
        "Surface built"
    );
    Ok(surface)
}

/// Sample `surface` on the requested mesh.
pub fn sample(
    config: &VolsurfConfig,
    surface: &BlackVarianceSurface,
    options: &SampleOptions,
) -> Result<SurfaceSample> {
    let num_strikes = options.num_strikes.unwrap_or(config.surface.num_strikes);
    let num_times = options.num_times.unwrap_or(config.surface.num_times);
    let strike_range = match (options.strike_min, options.strike_max) {
        (None, None) => None,
        (lo, hi) => Some((
            lo.unwrap_or(surface.min_strike()),
            hi.unwrap_or(surface.max_strike()),
        )),
    };
    Ok(surface.sample(num_strikes, num_times, strike_range)?)
}

/// Run the surface command
pub fn run(
    config: &VolsurfConfig,
    quotes: &Path,
    options: &SampleOptions,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let surface = build_from_file(config, quotes)?;
    let sample = sample(config, &surface, options)?;

    let mut writer = open_output(output)?;
    match format {
        OutputFormat::Csv => write_sample_csv(&mut writer, &sample)?,
        OutputFormat::Json => write_sample_json(&mut writer, &sample)?,
    }
    writer.flush()?;
    Ok(())
}
