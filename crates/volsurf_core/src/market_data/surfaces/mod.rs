//! Volatility surface construction and lookup.
//!
//! This module provides:
//! - [`VolatilitySurface`]: Generic trait for implied volatility lookup
//! - [`VolatilityObservation`] and [`SurfacePoint`]: builder inputs
//! - [`VolatilityGrid`]: Dense strike × expiry variance grid
//! - [`VolSurfaceBuilder`]: Aggregation and gap filling of scattered points
//! - [`BlackVarianceSurface`]: Clamped bilinear or bicubic query over the grid

mod black_variance;
mod builder;
mod grid;
mod observation;
mod traits;

pub use black_variance::{BlackVarianceSurface, SurfaceInterpolation, SurfaceSample};
pub use builder::{build_surface, VolSurfaceBuilder};
pub use grid::VolatilityGrid;
pub use observation::{SurfacePoint, VolatilityObservation};
pub use traits::VolatilitySurface;
