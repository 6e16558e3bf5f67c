//! Interpolation methods for volatility grids.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points
//! - [`CubicSplineInterpolator`]: Natural cubic spline with C² continuity
//! - [`BilinearInterpolator`]: 2D grid interpolation, linear on each axis
//! - [`BicubicInterpolator`]: 2D grid interpolation, natural spline on each axis
//!
//! ## Core Traits
//!
//! 1D interpolators implement [`Interpolator`], 2D interpolators implement
//! [`Interpolator2D`]. Neither extrapolates: queries outside the domain return
//! `InterpolationError::OutOfBounds`, and callers clamp first when they need
//! flat extrapolation.
//!
//! ## Example
//!
//! ```
//! use volsurf_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let interp = LinearInterpolator::new(&xs, &ys).unwrap();
//! let (x_min, x_max) = interp.domain();
//! assert_eq!(x_min, 0.0);
//! assert_eq!(x_max, 3.0);
//!
//! // Interpolate at x = 1.5 (between y=1.0 and y=4.0)
//! let y = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//! ```

mod bicubic;
mod bilinear;
mod cubic_spline;
mod linear;
mod traits;

pub use bicubic::BicubicInterpolator;
pub use bilinear::BilinearInterpolator;
pub use cubic_spline::CubicSplineInterpolator;
pub use linear::LinearInterpolator;
pub use traits::{Interpolator, Interpolator2D};
