//! Linear interpolation implementation.

use super::traits::{find_segment, out_of_bounds, validate_axis};
use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Stores (x, y) knots sorted by x and interpolates linearly between
/// adjacent knots. Also serves as the fallback for spline axes that carry
/// only two nodes.
///
/// # Example
///
/// ```
/// use volsurf_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 2.0, 3.0], &[0.0, 2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 3.0));
/// assert!((interp.interpolate(1.5).unwrap() - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    /// Sorted x-coordinates
    xs: Vec<T>,
    /// Corresponding y-values (in same order as xs after sorting)
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct a linear interpolator from x and y data points.
    ///
    /// Knots are sorted by x-coordinate; duplicate x-coordinates are rejected.
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 2 data points
    /// * `Err(InterpolationError::InvalidInput)` - Mismatched array lengths
    /// * `Err(InterpolationError::NonMonotonicData)` - Repeated x-coordinate
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let (sorted_xs, sorted_ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        validate_axis(&sorted_xs, 2)?;

        Ok(Self {
            xs: sorted_xs,
            ys: sorted_ys,
        })
    }

    /// Returns a reference to the sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns a reference to the y-values (in sorted x order).
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the interpolator has no data points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// Interpolate using `y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)`.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if !(x >= x_min && x <= x_max) {
            return Err(out_of_bounds(x, x_min, x_max));
        }

        let i = find_segment(&self.xs, x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let t = (x - x0) / (x1 - x0);
        Ok(y0 + (y1 - y0) * t)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_with_minimum_points() {
        let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert_eq!(interp.len(), 2);
        assert!(!interp.is_empty());
    }

    #[test]
    fn test_new_insufficient_data() {
        match LinearInterpolator::new(&[1.0], &[2.0]) {
            Err(InterpolationError::InsufficientData { got, need }) => {
                assert_eq!(got, 1);
                assert_eq!(need, 2);
            }
            other => panic!("Expected InsufficientData error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_mismatched_lengths() {
        match LinearInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 1.0]) {
            Err(InterpolationError::InvalidInput(msg)) => assert!(msg.contains("same length")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_duplicate_x() {
        let result = LinearInterpolator::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]);
        assert!(matches!(
            result,
            Err(InterpolationError::NonMonotonicData { .. })
        ));
    }

    #[test]
    fn test_new_auto_sorts_unsorted_data() {
        let interp = LinearInterpolator::new(&[2.0, 0.0, 1.0], &[4.0, 0.0, 2.0]).unwrap();
        assert_eq!(interp.xs(), &[0.0, 1.0, 2.0]);
        assert_eq!(interp.ys(), &[0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_interpolate_at_knots_and_between() {
        let interp = LinearInterpolator::new(&[0.0, 1.0, 3.0], &[1.0, 3.0, 7.0]).unwrap();
        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(3.0).unwrap(), 7.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_out_of_bounds() {
        let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(matches!(
            interp.interpolate(1.5),
            Err(InterpolationError::OutOfBounds { .. })
        ));
        assert!(interp.interpolate(f64::NAN).is_err());
    }

    #[test]
    fn test_with_f32() {
        let interp = LinearInterpolator::new(&[0.0_f32, 2.0], &[0.0_f32, 4.0]).unwrap();
        assert!((interp.interpolate(1.0_f32).unwrap() - 2.0).abs() < 1e-6);
    }
}
