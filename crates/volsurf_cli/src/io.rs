//! Quote file loading and result writers.
//!
//! Quote files are CSV with a header row:
//!
//! ```text
//! strike,option_type,expiration,underlying_price,dividend_yield,risk_free_rate,last_price
//! 95,put,2025-06-20,100.0,0.01,0.03,2.41
//! ```

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};
use volsurf_batch::BatchInversion;
use volsurf_core::market_data::surfaces::SurfaceSample;
use volsurf_core::types::{Date, DayCountConvention};
use volsurf_models::instruments::{MarketContext, OptionContract, OptionKind, Quote};

/// One row of a quote file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteRecord {
    /// Strike price
    pub strike: f64,
    /// `call` or `put`, case-insensitive
    pub option_type: String,
    /// Expiry date, `YYYY-MM-DD`
    pub expiration: String,
    /// Spot of the underlying
    pub underlying_price: f64,
    /// Continuous dividend yield
    pub dividend_yield: f64,
    /// Continuously compounded risk-free rate
    pub risk_free_rate: f64,
    /// Observed option price
    pub last_price: f64,
}

impl QuoteRecord {
    /// Turn the row into an American quote priced from `valuation`.
    ///
    /// Parse failures come back as `CliError::InvalidQuote`; rejected contract
    /// or market terms as `CliError::Instrument`.
    pub fn to_quote(
        &self,
        line: u64,
        valuation: Date,
        day_count: DayCountConvention,
    ) -> Result<Quote> {
        let kind: OptionKind = self.option_type.parse().map_err(|e| CliError::InvalidQuote {
            line,
            message: format!("{}", e),
        })?;
        let expiry = Date::parse(&self.expiration).map_err(|e| CliError::InvalidQuote {
            line,
            message: e.to_string(),
        })?;

        let contract = OptionContract::from_dates(self.strike, kind, valuation, expiry, day_count)?;
        let market = MarketContext::new(
            self.underlying_price,
            self.risk_free_rate,
            self.dividend_yield,
            0.0,
        )?;
        Ok(Quote::new(contract, market, self.last_price, expiry))
    }
}

/// Read quotes from CSV.
///
/// Rows that cannot be parsed abort the read. Rows whose terms are rejected
/// (non-positive strike or spot, expiry before `valuation`) are skipped with
/// a warning.
pub fn read_quotes<R: Read>(
    reader: R,
    valuation: Date,
    day_count: DayCountConvention,
) -> Result<Vec<Quote>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut quotes = Vec::new();
    let mut skipped = 0usize;
    for result in csv_reader.deserialize::<QuoteRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                return Err(CliError::InvalidQuote {
                    line,
                    message: e.to_string(),
                });
            }
        };
        let line = quotes.len() as u64 + skipped as u64 + 2;

        match record.to_quote(line, valuation, day_count) {
            Ok(quote) => quotes.push(quote),
            Err(CliError::Instrument(e)) => {
                warn!(line, error = %e, "skipping quote");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(loaded = quotes.len(), skipped, "quotes read");
    Ok(quotes)
}

/// Read quotes from a CSV file.
pub fn load_quotes(path: &Path, valuation: Date, day_count: DayCountConvention) -> Result<Vec<Quote>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    read_quotes(file, valuation, day_count)
}

#[derive(Serialize)]
struct InversionRow<'a> {
    strike: f64,
    expiry: String,
    volatility: Option<f64>,
    source: Option<&'a str>,
}

/// Write `strike,expiry,volatility,source` rows, one per quote.
pub fn write_inversion<W: Write>(writer: W, inversion: &BatchInversion) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in inversion.entries() {
        csv_writer.serialize(InversionRow {
            strike: entry.strike,
            expiry: entry.expiry.to_string(),
            volatility: entry.volatility,
            source: entry.source.map(|s| s.as_str()),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct SampleRow {
    time: f64,
    expiry: String,
    strike: f64,
    volatility: f64,
}

/// Write a surface sample as `time,expiry,strike,volatility` rows, time-major.
pub fn write_sample_csv<W: Write>(writer: W, sample: &SurfaceSample) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (time, expiry, strike, volatility) in sample.rows() {
        csv_writer.serialize(SampleRow {
            time,
            expiry: expiry.to_string(),
            strike,
            volatility,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a surface sample as pretty-printed JSON.
pub fn write_sample_json<W: Write>(mut writer: W, sample: &SurfaceSample) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, sample)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use volsurf_batch::invert_all;
    use volsurf_models::instruments::ExerciseStyle;

    const HEADER: &str =
        "strike,option_type,expiration,underlying_price,dividend_yield,risk_free_rate,last_price\n";

    fn valuation() -> Date {
        Date::from_ymd(2025, 1, 2).unwrap()
    }

    #[test]
    fn test_read_quotes() {
        let data = format!(
            "{}95,put,2025-07-02,100,0.01,0.03,2.5\n105, CALL ,2026-01-02,100,0.01,0.03,6.0\n",
            HEADER
        );
        let quotes = read_quotes(data.as_bytes(), valuation(), DayCountConvention::Actual365Fixed)
            .unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].contract.kind(), OptionKind::Put);
        assert_eq!(quotes[0].contract.exercise(), ExerciseStyle::American);
        assert_eq!(quotes[0].contract.maturity(), 181.0 / 365.0);
        assert_eq!(quotes[0].market.dividend_yield(), 0.01);
        assert_eq!(quotes[1].contract.kind(), OptionKind::Call);
        assert_eq!(quotes[1].expiry, Date::from_ymd(2026, 1, 2).unwrap());
        assert_eq!(quotes[1].observed_price, 6.0);
    }

    #[test]
    fn test_expired_quote_skipped() {
        let data = format!(
            "{}95,put,2024-12-20,100,0.01,0.03,2.5\n100,put,2025-07-02,100,0.01,0.03,5.0\n",
            HEADER
        );
        let quotes = read_quotes(data.as_bytes(), valuation(), DayCountConvention::Actual365Fixed)
            .unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].contract.strike(), 100.0);
    }

    #[test]
    fn test_unknown_option_type_rejected() {
        let data = format!("{}95,straddle,2025-07-02,100,0.01,0.03,2.5\n", HEADER);
        let result = read_quotes(data.as_bytes(), valuation(), DayCountConvention::Actual365Fixed);
        match result.unwrap_err() {
            CliError::InvalidQuote { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("straddle"));
            }
            other => panic!("Expected InvalidQuote, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_number_rejected() {
        let data = format!("{}abc,put,2025-07-02,100,0.01,0.03,2.5\n", HEADER);
        let result = read_quotes(data.as_bytes(), valuation(), DayCountConvention::Actual365Fixed);
        assert!(matches!(result, Err(CliError::InvalidQuote { line: 2, .. })));
    }

    #[test]
    fn test_bad_date_rejected() {
        let data = format!("{}95,put,20/06/2025,100,0.01,0.03,2.5\n", HEADER);
        let result = read_quotes(data.as_bytes(), valuation(), DayCountConvention::Actual365Fixed);
        assert!(matches!(result, Err(CliError::InvalidQuote { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = load_quotes(
            Path::new("/nonexistent/quotes.csv"),
            valuation(),
            DayCountConvention::Actual365Fixed,
        );
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_write_inversion_with_unresolved_rows() {
        let data = format!("{}95,put,2025-07-02,100,0.01,0.03,-1.0\n", HEADER);
        let quotes = read_quotes(data.as_bytes(), valuation(), DayCountConvention::Actual365Fixed)
            .unwrap();
        let inversion = invert_all(&quotes, 50);

        let mut out = Vec::new();
        write_inversion(&mut out, &inversion).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "strike,expiry,volatility,source\n95.0,2025-07-02,,\n");
    }

    #[test]
    fn test_write_sample() {
        let sample = SurfaceSample {
            strikes: vec![90.0, 110.0],
            times: vec![0.5],
            expiries: vec![Date::from_ymd(2025, 7, 3).unwrap()],
            volatilities: vec![vec![0.25, 0.2]],
        };

        let mut csv_out = Vec::new();
        write_sample_csv(&mut csv_out, &sample).unwrap();
        let text = String::from_utf8(csv_out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time,expiry,strike,volatility");
        assert_eq!(lines[1], "0.5,2025-07-03,90.0,0.25");
        assert_eq!(lines.len(), 3);

        let mut json_out = Vec::new();
        write_sample_json(&mut json_out, &sample).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json_out).unwrap();
        assert_eq!(parsed["expiries"][0], "2025-07-03");
        assert_eq!(parsed["volatilities"][0][1], 0.2);
    }
}
