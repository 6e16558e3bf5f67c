//! Root-finding solvers.
//!
//! ## Available Solvers
//!
//! - [`SafeguardedSecantSolver`]: bracketed secant with a bisection guard;
//!   needs no derivative and accepts fallible objectives, which is what the
//!   implied-volatility search over a lattice pricer requires
//!
//! ## Configuration
//!
//! [`SolverConfig`] carries:
//! - `tolerance`: Residual tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)

mod config;
mod safeguarded_secant;

pub use config::SolverConfig;
pub use safeguarded_secant::{RootResult, SafeguardedSecantSolver};
