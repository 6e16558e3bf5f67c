//! Option contracts, market state and quotes.
//!
//! This module provides:
//! - [`OptionKind`]: Call or put, with intrinsic value
//! - [`ExerciseStyle`]: American or European
//! - [`OptionContract`]: Validated contract terms
//! - [`MarketContext`]: Flat spot, rate, dividend yield and volatility
//! - [`Quote`]: Observed price plus contract, market and expiry date
//! - [`InstrumentError`]: Construction errors

mod contract;
mod error;
mod exercise;
mod market;
mod option_kind;
mod quote;

pub use contract::OptionContract;
pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use market::MarketContext;
pub use option_kind::OptionKind;
pub use quote::Quote;
