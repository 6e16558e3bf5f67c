//! Market data structures for implied volatility.
//!
//! # Components
//!
//! - [`surfaces`]: Observations, variance grid, surface builder and query
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use volsurf_core::market_data::surfaces::{SurfaceInterpolation, VolSurfaceBuilder};
//! use volsurf_core::types::Date;
//!
//! let valuation = Date::from_ymd(2025, 1, 2).unwrap();
//! let e1 = Date::from_ymd(2025, 3, 21).unwrap();
//! let e2 = Date::from_ymd(2025, 6, 20).unwrap();
//! let points = [
//!     (95.0, e1, 0.22),
//!     (105.0, e1, 0.19),
//!     (95.0, e2, 0.23),
//!     (105.0, e2, 0.21),
//! ];
//!
//! let surface = VolSurfaceBuilder::new(valuation).build(&points).unwrap();
//! let vol = surface.black_vol(0.3, 100.0).unwrap();
//! assert!(vol > 0.19 && vol < 0.23);
//! ```

pub mod error;
pub mod surfaces;

pub use error::MarketDataError;
pub use surfaces::{
    BlackVarianceSurface, SurfaceInterpolation, SurfacePoint, VolSurfaceBuilder, VolatilityGrid,
    VolatilityObservation, VolatilitySurface,
};
