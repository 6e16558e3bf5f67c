//! # volsurf_batch (L3: Orchestration)
//!
//! Inverts many option quotes into implied volatilities without letting one
//! bad quote abort the batch.
//!
//! - Each quote is inverted independently on the CRR lattice, on the rayon
//!   pool once the batch reaches [`BatchConfig::parallel_threshold`]
//! - Failures are recorded as [`QuoteFailure`]s and leave a gap
//! - Gaps are filled in input order, forward then backward (see [`fill`])
//! - [`BatchInversion::observations`] feeds the surface builder
//!
//! ## Usage Examples
//!
//! ```rust
//! use volsurf_batch::invert_all;
//! use volsurf_core::types::Date;
//! use volsurf_models::instruments::{MarketContext, OptionContract, OptionKind, Quote};
//!
//! let market = MarketContext::new(100.0, 0.02, 0.0, 0.0).unwrap();
//! let expiry = Date::from_ymd(2025, 12, 19).unwrap();
//! let contract = OptionContract::american(90.0, 1.0, OptionKind::Call).unwrap();
//!
//! // Below intrinsic: fails, and no other quote can fill it
//! let result = invert_all(&[Quote::new(contract, market, 5.0, expiry)], 200);
//! assert_eq!(result.failure_rate(), 1.0);
//! assert!(result.observations().is_empty());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod fill;
pub mod inversion;
pub mod parallel;

pub use error::BatchError;
pub use fill::VolatilitySource;
pub use inversion::{
    invert_all, BatchConfig, BatchInversion, BatchInverter, InversionEntry, QuoteFailure,
};
