//! Natural cubic spline interpolation.

use super::traits::{find_segment, out_of_bounds, validate_axis};
use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Polynomial coefficients for a cubic spline segment.
///
/// Represents a cubic polynomial: `y = a + b*(x-xi) + c*(x-xi)² + d*(x-xi)³`
#[derive(Debug, Clone, Copy)]
struct SplineCoeffs<T: Float> {
    a: T,
    b: T,
    c: T,
    d: T,
}

/// Natural cubic spline interpolator with C² continuity.
///
/// Second derivatives vanish at both boundary knots. Passes exactly through
/// every knot, which is what keeps a bicubic surface exact at grid nodes.
///
/// # Construction
///
/// Data points are sorted by x-coordinate. At least 3 data points are required.
///
/// # Example
///
/// ```
/// use volsurf_core::math::interpolators::{Interpolator, CubicSplineInterpolator};
///
/// let interp = CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
/// assert!((interp.interpolate(2.0).unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSplineInterpolator<T: Float> {
    /// Sorted x-coordinates
    xs: Vec<T>,
    /// Polynomial coefficients for each segment
    coeffs: Vec<SplineCoeffs<T>>,
}

impl<T: Float> CubicSplineInterpolator<T> {
    /// Construct a natural cubic spline from x and y data points.
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 3 data points
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

        validate_axis(&sorted_xs, 3)?;

        let coeffs = Self::compute_coefficients(&sorted_xs, &sorted_ys);

        Ok(Self {
            xs: sorted_xs,
            coeffs,
        })
    }

    /// Compute natural cubic spline coefficients using the Thomas algorithm.
    ///
    /// Solves the tridiagonal system for the interior second derivatives
    /// `M[1..n-1]` (with `M[0] = M[n-1] = 0`), then converts them to
    /// per-segment polynomial coefficients.
    fn compute_coefficients(xs: &[T], ys: &[T]) -> Vec<SplineCoeffs<T>> {
        let n = xs.len();
        let two = T::one() + T::one();
        let six = two + two + two;

        let h: Vec<T> = (0..n - 1).map(|i| xs[i + 1] - xs[i]).collect();

        // Interior rows i = 1..n-1:
        // h[i-1]*M[i-1] + 2*(h[i-1]+h[i])*M[i] + h[i]*M[i+1] = rhs[i]
        let interior = n - 2;
        let mut diag: Vec<T> = Vec::with_capacity(interior);
        let mut rhs: Vec<T> = Vec::with_capacity(interior);
        for i in 1..n - 1 {
            diag.push(two * (h[i - 1] + h[i]));
            rhs.push(six * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]));
        }

        // Forward elimination. Row k (interior index) has sub-diagonal h[k],
        // super-diagonal h[k+1].
        let mut c_prime: Vec<T> = vec![T::zero(); interior];
        let mut d_prime: Vec<T> = vec![T::zero(); interior];
        c_prime[0] = if interior > 1 { h[1] / diag[0] } else { T::zero() };
        d_prime[0] = rhs[0] / diag[0];
        for k in 1..interior {
            let denom = diag[k] - h[k] * c_prime[k - 1];
            c_prime[k] = if k + 1 < interior {
                h[k + 1] / denom
            } else {
                T::zero()
            };
            d_prime[k] = (rhs[k] - h[k] * d_prime[k - 1]) / denom;
        }

        // Back substitution
        let mut m: Vec<T> = vec![T::zero(); n];
        m[interior] = d_prime[interior - 1];
        for k in (0..interior - 1).rev() {
            m[k + 1] = d_prime[k] - c_prime[k] * m[k + 2];
        }

        (0..n - 1)
            .map(|i| SplineCoeffs {
                a: ys[i],
                b: (ys[i + 1] - ys[i]) / h[i] - h[i] * (two * m[i] + m[i + 1]) / six,
                c: m[i] / two,
                d: (m[i + 1] - m[i]) / (six * h[i]),
            })
            .collect()
    }

    /// Returns a reference to the sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
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

impl<T: Float> Interpolator<T> for CubicSplineInterpolator<T> {
    /// Evaluate `a + b*dx + c*dx² + d*dx³` on the segment containing `x`.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if !(x >= x_min && x <= x_max) {
            return Err(out_of_bounds(x, x_min, x_max));
        }

        let i = find_segment(&self.xs, x);
        let coeffs = &self.coeffs[i];
        let dx = x - self.xs[i];

        Ok(coeffs.a + dx * (coeffs.b + dx * (coeffs.c + dx * coeffs.d)))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
