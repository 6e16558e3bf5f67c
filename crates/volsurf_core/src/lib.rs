//! # volsurf_core: Foundation for implied volatility surfaces
//!
//! ## Layer 1 (Foundation) Role
//!
//! volsurf_core is the bottom layer of the workspace, providing:
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `DateError`, `InterpolationError`, `SolverError` (`types::error`)
//! - 1D and 2D interpolators (`math::interpolators`)
//! - A bracketed root finder (`math::solvers`)
//! - Volatility grid construction and surface queries (`market_data`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other volsurf_* crates:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derives
//! - tracing: Diagnostics from the surface builder
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use volsurf_core::market_data::surfaces::{SurfaceInterpolation, VolSurfaceBuilder};
//! use volsurf_core::types::{Date, DayCountConvention};
//!
//! let valuation = Date::from_ymd(2024, 1, 2).unwrap();
//! let june = Date::from_ymd(2024, 6, 21).unwrap();
//! let dec = Date::from_ymd(2024, 12, 20).unwrap();
//!
//! let t = DayCountConvention::Actual365Fixed.year_fraction(valuation, june);
//! assert!(t > 0.45 && t < 0.48);
//!
//! let points = [(90.0, june, 0.25), (110.0, june, 0.21), (90.0, dec, 0.24), (110.0, dec, 0.22)];
//! let surface = VolSurfaceBuilder::new(valuation)
//!     .with_interpolation(SurfaceInterpolation::Bilinear)
//!     .build(&points)
//!     .unwrap();
//! assert!((surface.black_vol_at(june, 90.0).unwrap() - 0.25).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, DayCountConvention,
//!   observations, interpolation tags and surface samples

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
