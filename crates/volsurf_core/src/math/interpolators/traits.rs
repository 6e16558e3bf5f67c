//! Interpolator trait definitions.

use crate::types::InterpolationError;
use num_traits::Float;
use std::cmp::Ordering;

/// One-dimensional interpolation over sorted knots.
///
/// Implementations are generic over `T: Float` so the same code serves `f64`
/// surfaces and `f32` benchmarks.
pub trait Interpolator<T: Float> {
    /// Interpolate the value at `x`.
    ///
    /// Returns `InterpolationError::OutOfBounds` when `x` lies outside
    /// [`domain`](Self::domain); interpolators never extrapolate.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Return the valid interpolation range `(x_min, x_max)`.
    fn domain(&self) -> (T, T);
}

/// Two-dimensional interpolation over a rectangular grid `z(x, y)`.
pub trait Interpolator2D<T: Float> {
    /// Interpolate the value at `(x, y)`.
    fn interpolate(&self, x: T, y: T) -> Result<T, InterpolationError>;

    /// Return the valid range along the x-axis (grid rows).
    fn domain_x(&self) -> (T, T);

    /// Return the valid range along the y-axis (grid columns).
    fn domain_y(&self) -> (T, T);
}

/// Check that `xs` is strictly increasing and has at least `need` points.
pub(crate) fn validate_axis<T: Float>(xs: &[T], need: usize) -> Result<(), InterpolationError> {
    if xs.len() < need {
        return Err(InterpolationError::InsufficientData {
            got: xs.len(),
            need,
        });
    }
    for (i, w) in xs.windows(2).enumerate() {
        if w[1].partial_cmp(&w[0]) != Some(Ordering::Greater) {
            return Err(InterpolationError::NonMonotonicData { index: i + 1 });
        }
    }
    Ok(())
}

/// Find the segment index `i` such that `xs[i] <= x < xs[i+1]`,
/// clamped to the valid range `[0, n-2]`.
#[inline]
pub(crate) fn find_segment<T: Float>(xs: &[T], x: T) -> usize {
    let pos = xs.partition_point(|&xi| xi <= x);
    if pos == 0 {
        0
    } else if pos >= xs.len() {
        xs.len() - 2
    } else {
        pos - 1
    }
}

/// Build an `OutOfBounds` error from generic floats.
pub(crate) fn out_of_bounds<T: Float>(x: T, min: T, max: T) -> InterpolationError {
    InterpolationError::OutOfBounds {
        x: x.to_f64().unwrap_or(f64::NAN),
        min: min.to_f64().unwrap_or(f64::NAN),
        max: max.to_f64().unwrap_or(f64::NAN),
    }
}
