//! # volsurf_models (L2: Models)
//!
//! Option contracts, lattice pricing and implied volatility.
//!
//! This crate provides:
//! - Contract, market and quote types (`instruments`)
//! - Cox-Ross-Rubinstein lattice for American and European exercise (`lattice`)
//! - Implied volatility inversion against the lattice (`implied`)
//! - Black-Scholes-Merton closed form for validation (`analytical`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use volsurf_core::types::Date;
//! use volsurf_models::implied::implied_volatility;
//! use volsurf_models::instruments::{MarketContext, OptionContract, OptionKind, Quote};
//! use volsurf_models::lattice::{price, DEFAULT_STEPS};
//!
//! let contract = OptionContract::american(95.0, 0.5, OptionKind::Put).unwrap();
//! let market = MarketContext::new(100.0, 0.03, 0.01, 0.0).unwrap();
//! let observed = price(&contract, &market.with_volatility(0.28), DEFAULT_STEPS).unwrap();
//!
//! let quote = Quote::new(contract, market, observed, Date::from_ymd(2025, 7, 1).unwrap());
//! let vol = implied_volatility(&quote, DEFAULT_STEPS).unwrap();
//! assert!((vol - 0.28).abs() < 1e-4);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for contracts, markets, quotes and solver configuration

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod implied;
pub mod instruments;
pub mod lattice;
