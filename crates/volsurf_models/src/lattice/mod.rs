//! Binomial lattice pricing for vanilla options.
//!
//! ## Available Lattices
//!
//! - [`CrrLattice`]: Cox-Ross-Rubinstein recombining tree, American or European exercise
//!
//! [`price`] is the entry point used by the implied-volatility solver; it
//! handles the degenerate cases (zero maturity, non-positive volatility)
//! before any tree is built.

mod crr;
mod error;

pub use crr::{min_stable_volatility, price, CrrLattice, DEFAULT_STEPS};
pub use error::LatticeError;
