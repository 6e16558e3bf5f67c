//! Bicubic spline 2D interpolation for surfaces.

use super::bilinear::validate_grid;
use super::traits::out_of_bounds;
use super::{CubicSplineInterpolator, Interpolator, Interpolator2D, LinearInterpolator};
use crate::types::InterpolationError;
use num_traits::Float;

/// One axis of a bicubic grid: a natural spline, or a straight line when
/// the axis carries only two nodes.
#[derive(Debug, Clone)]
enum AxisSpline<T: Float> {
    Linear(LinearInterpolator<T>),
    Cubic(CubicSplineInterpolator<T>),
}

impl<T: Float> AxisSpline<T> {
    fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() < 3 {
            Ok(AxisSpline::Linear(LinearInterpolator::new(xs, ys)?))
        } else {
            Ok(AxisSpline::Cubic(CubicSplineInterpolator::new(xs, ys)?))
        }
    }

    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        match self {
            AxisSpline::Linear(interp) => interp.interpolate(x),
            AxisSpline::Cubic(interp) => interp.interpolate(x),
        }
    }
}

/// Bicubic interpolator built from natural cubic splines on each axis.
///
/// Each grid row `zs[i]` gets a spline along `y` at construction time. A
/// query evaluates every row spline at `y` and then runs a spline through
/// the resulting column along `x`. The interpolant is exact at grid nodes.
/// Axes with exactly two nodes fall back to linear interpolation.
///
/// # Example
///
/// ```
/// use volsurf_core::math::interpolators::{BicubicInterpolator, Interpolator2D};
///
/// let xs: [f64; 3] = [0.0, 1.0, 2.0];
/// let ys = [0.0, 1.0, 2.0];
/// let zs = [
///     &[0.0, 1.0, 4.0][..],
///     &[1.0, 2.0, 5.0][..],
///     &[4.0, 5.0, 8.0][..],
/// ];
///
/// let interp = BicubicInterpolator::new(&xs, &ys, &zs).unwrap();
/// assert!((interp.interpolate(1.0, 2.0).unwrap() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BicubicInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    rows: Vec<AxisSpline<T>>,
}

impl<T: Float> BicubicInterpolator<T> {
    /// Construct a bicubic interpolator from grid data laid out as
    /// `zs[i][j] = z(xs[i], ys[j])`.
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 2 points on an axis
    /// * `Err(InterpolationError::NonMonotonicData)` - Axis not strictly increasing
    /// * `Err(InterpolationError::InvalidInput)` - Grid dimensions don't match axis lengths
    pub fn new(xs: &[T], ys: &[T], zs: &[&[T]]) -> Result<Self, InterpolationError> {
        validate_grid(xs, ys, zs)?;

        let rows = zs
            .iter()
            .map(|row| AxisSpline::new(ys, row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            rows,
        })
    }

    /// Returns a reference to the x-axis coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns a reference to the y-axis coordinates.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }
}

impl<T: Float> Interpolator2D<T> for BicubicInterpolator<T> {
    fn interpolate(&self, x: T, y: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain_x();
        if !(x >= x_min && x <= x_max) {
            return Err(out_of_bounds(x, x_min, x_max));
        }

        let column = self
            .rows
            .iter()
            .map(|row| row.interpolate(y))
            .collect::<Result<Vec<_>, _>>()?;

        AxisSpline::new(&self.xs, &column)?.interpolate(x)
    }

    #[inline]
    fn domain_x(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    #[inline]
    fn domain_y(&self) -> (T, T) {
        (self.ys[0], self.ys[self.ys.len() - 1])
    }
}
