//! Implied volatility inversion against the CRR lattice.
//!
//! [`ImpliedVolSolver`] checks the observed price against
//! [`no_arbitrage_bounds`], then searches the volatility range of its
//! [`ImpliedVolConfig`] with a safeguarded secant over lattice prices.

mod config;
mod error;
mod solver;

pub use config::ImpliedVolConfig;
pub use error::ImpliedVolError;
pub use solver::{implied_volatility, no_arbitrage_bounds, ImpliedVolSolver};
