//! Volsurf CLI - implied volatility surfaces from American option quotes
//!
//! # Commands
//!
//! - `volsurf invert` - Invert quotes to implied volatilities
//! - `volsurf surface` - Build and sample the volatility surface
//! - `volsurf price` - Price one option on the CRR lattice

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use volsurf_cli::commands::{self, price::PriceRequest, surface::SampleOptions};
use volsurf_cli::config::{build_config, CliArgs};
use volsurf_cli::{init_tracing, Result};
use volsurf_core::types::Date;

/// Volsurf implied volatility CLI
#[derive(Parser)]
#[command(name = "volsurf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VOLSURF_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Lattice time steps
    #[arg(long, global = true)]
    steps: Option<usize>,

    /// Valuation date (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    valuation_date: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invert option quotes to implied volatilities
    Invert {
        /// Quote file (CSV)
        #[arg(short, long)]
        quotes: PathBuf,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the volatility surface and print a sampled grid
    Surface {
        /// Quote file (CSV)
        #[arg(short, long)]
        quotes: PathBuf,

        /// Number of sampled strikes
        #[arg(long)]
        num_strikes: Option<usize>,

        /// Number of sampled times
        #[arg(long)]
        num_times: Option<usize>,

        /// Lowest sampled strike
        #[arg(long)]
        strike_min: Option<f64>,

        /// Highest sampled strike
        #[arg(long)]
        strike_max: Option<f64>,

        /// Output format (csv, json)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Price a single option on the CRR lattice
    Price {
        /// Spot price
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(long)]
        strike: f64,

        /// Risk-free rate (continuous)
        #[arg(long, default_value = "0.0")]
        rate: f64,

        /// Dividend yield (continuous)
        #[arg(long, default_value = "0.0")]
        dividend: f64,

        /// Volatility
        #[arg(long)]
        vol: f64,

        /// Maturity in years
        #[arg(long)]
        maturity: f64,

        /// Option type (call, put)
        #[arg(long, default_value = "put")]
        kind: String,

        /// Price the European contract instead of the American one
        #[arg(long)]
        european: bool,

        /// Output format (csv, json)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let valuation_date = cli
        .valuation_date
        .as_deref()
        .map(Date::parse)
        .transpose()?;
    let args = CliArgs {
        config_file: cli.config,
        log_level: cli.log_level,
        steps: cli.steps,
        valuation_date,
    };
    let config = build_config(&args)?;

    init_tracing(config.log_level);
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Invert { quotes, output } => {
            commands::invert::run(&config, &quotes, output.as_deref())
        }
        Commands::Surface {
            quotes,
            num_strikes,
            num_times,
            strike_min,
            strike_max,
            format,
            output,
        } => {
            let options = SampleOptions {
                num_strikes,
                num_times,
                strike_min,
                strike_max,
            };
            commands::surface::run(&config, &quotes, &options, &format, output.as_deref())
        }
        Commands::Price {
            spot,
            strike,
            rate,
            dividend,
            vol,
            maturity,
            kind,
            european,
            format,
        } => {
            let request = PriceRequest {
                spot,
                strike,
                rate,
                dividend,
                volatility: vol,
                maturity,
                kind,
                european,
            };
            commands::price::run(&request, config.lattice.steps, &format)
        }
    }
}
