//! Closed-form European pricing used as the lattice reference.
//!
//! - [`BlackScholesMerton`]: lognormal dynamics with continuous dividend yield
//! - [`norm_cdf`] / [`norm_pdf`]: standard normal functions (erfc-based CDF)

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::BlackScholesMerton;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
