//! Price command implementation
//!
//! Prices a single option on the CRR lattice, with the Black-Scholes
//! European value alongside for reference.

use serde::Serialize;
use tracing::info;
use volsurf_models::analytical::BlackScholesMerton;
use volsurf_models::instruments::{ExerciseStyle, MarketContext, OptionContract, OptionKind};
use volsurf_models::lattice::price;

use super::OutputFormat;
use crate::{CliError, Result};

/// Contract and market inputs for the price command
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRequest {
    /// Spot price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Dividend yield
    pub dividend: f64,
    /// Volatility
    pub volatility: f64,
    /// Maturity in years
    pub maturity: f64,
    /// `call` or `put`
    pub kind: String,
    /// Price the European contract instead
    pub european: bool,
}

/// Lattice and reference prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceReport {
    /// Lattice price of the requested contract
    pub lattice: f64,
    /// Black-Scholes price of the European contract
    pub black_scholes: f64,
    /// `lattice - black_scholes`
    pub early_exercise_premium: f64,
    /// Lattice steps used
    pub steps: usize,
}

/// Price `request` on a lattice of `steps` steps.
pub fn evaluate(request: &PriceRequest, steps: usize) -> Result<PriceReport> {
    let kind: OptionKind = request.kind.parse()?;
    let exercise = if request.european {
        ExerciseStyle::European
    } else {
        ExerciseStyle::American
    };
    let contract = OptionContract::new(request.strike, request.maturity, kind, exercise)?;
    let market = MarketContext::new(request.spot, request.rate, request.dividend, request.volatility)?;

    let lattice = price(&contract, &market, steps)?;
    let black_scholes = if request.volatility > 0.0 {
        BlackScholesMerton::from_market(&market)
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?
            .price(kind, request.strike, request.maturity)
    } else {
        contract.intrinsic(request.spot)
    };

    Ok(PriceReport {
        lattice,
        black_scholes,
        early_exercise_premium: lattice - black_scholes,
        steps,
    })
}

/// Run the price command
pub fn run(request: &PriceRequest, steps: usize, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    info!(kind = %request.kind, strike = request.strike, steps, "Pricing on CRR lattice");

    let report = evaluate(request, steps)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => {
            println!("lattice,black_scholes,early_exercise_premium,steps");
            println!(
                "{},{},{},{}",
                report.lattice, report.black_scholes, report.early_exercise_premium, report.steps
            );
        }
    }
    Ok(())
}
