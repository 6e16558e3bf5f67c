//! Bilinear 2D interpolation for surfaces.

use super::traits::{find_segment, out_of_bounds, validate_axis};
use super::Interpolator2D;
use crate::types::InterpolationError;
use num_traits::Float;

/// Bilinear interpolator for 2D grid data.
///
/// Stores a 2D grid of values z(x, y) and performs bilinear interpolation
/// to compute values at arbitrary (x, y) coordinates within the grid.
///
/// # Grid Layout
///
/// The grid is stored as `zs[i][j] = z(xs[i], ys[j])` where:
/// - `xs` defines the x-axis coordinates (rows)
/// - `ys` defines the y-axis coordinates (columns)
///
/// # Example
///
/// ```
/// use volsurf_core::math::interpolators::{BilinearInterpolator, Interpolator2D};
///
/// let xs: [f64; 3] = [0.0, 1.0, 2.0];
/// let ys = [0.0, 1.0];
/// let zs = [
///     &[0.0, 1.0][..],
///     &[2.0, 3.0][..],
///     &[4.0, 5.0][..],
/// ];
///
/// let interp = BilinearInterpolator::new(&xs, &ys, &zs).unwrap();
/// let z = interp.interpolate(0.5, 0.5).unwrap();
/// assert!((z - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BilinearInterpolator<T: Float> {
    /// X-axis coordinates
    xs: Vec<T>,
    /// Y-axis coordinates
    ys: Vec<T>,
    /// Grid values: zs[i][j] = z(xs[i], ys[j])
    zs: Vec<Vec<T>>,
}

/// Validate axis lengths, monotonicity and grid shape shared by 2D interpolators.
pub(super) fn validate_grid<T: Float>(
    xs: &[T],
    ys: &[T],
    zs: &[&[T]],
) -> Result<(), InterpolationError> {
    validate_axis(xs, 2)?;
    validate_axis(ys, 2)?;

    if zs.len() != xs.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "Grid rows ({}) must match x-axis length ({})",
            zs.len(),
            xs.len()
        )));
    }

    for (i, row) in zs.iter().enumerate() {
        if row.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid row {} length ({}) must match y-axis length ({})",
                i,
                row.len(),
                ys.len()
            )));
        }
    }
    Ok(())
}

impl<T: Float> BilinearInterpolator<T> {
    /// Construct a bilinear interpolator from grid data.
    ///
    /// # Arguments
    ///
    /// * `xs` - Strictly increasing x-axis coordinates, length >= 2
    /// * `ys` - Strictly increasing y-axis coordinates, length >= 2
    /// * `zs` - Slice of rows, one per x coordinate
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 2 points on an axis
    /// * `Err(InterpolationError::NonMonotonicData)` - Axis not strictly increasing
    /// * `Err(InterpolationError::InvalidInput)` - Grid dimensions don't match axis lengths
    pub fn new(xs: &[T], ys: &[T], zs: &[&[T]]) -> Result<Self, InterpolationError> {
        validate_grid(xs, ys, zs)?;

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs: zs.iter().map(|row| row.to_vec()).collect(),
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

    /// Returns a reference to the grid values.
    #[inline]
    pub fn zs(&self) -> &[Vec<T>] {
        &self.zs
    }
}

impl<T: Float> Interpolator2D<T> for BilinearInterpolator<T> {
    /// Interpolate using
    /// `z = (1-u)(1-v)*z00 + u*(1-v)*z10 + (1-u)*v*z01 + u*v*z11`
    /// where `u` and `v` are the normalised coordinates within the grid cell.
    fn interpolate(&self, x: T, y: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain_x();
        let (y_min, y_max) = self.domain_y();

        if !(x >= x_min && x <= x_max) {
            return Err(out_of_bounds(x, x_min, x_max));
        }
        if !(y >= y_min && y <= y_max) {
            return Err(out_of_bounds(y, y_min, y_max));
        }

        let i = find_segment(&self.xs, x);
        let j = find_segment(&self.ys, y);

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[j], self.ys[j + 1]);

        let z00 = self.zs[i][j];
        let z10 = self.zs[i + 1][j];
        let z01 = self.zs[i][j + 1];
        let z11 = self.zs[i + 1][j + 1];

        let u = (x - x0) / (x1 - x0);
        let v = (y - y0) / (y1 - y0);

        let one = T::one();
        Ok((one - u) * (one - v) * z00
            + u * (one - v) * z10
            + (one - u) * v * z01
            + u * v * z11)
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
