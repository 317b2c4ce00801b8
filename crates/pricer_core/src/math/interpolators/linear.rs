//! Linear interpolation implementation.

use num_traits::Float;

/// Linear interpolation through `(x0, y0)` and `(x1, y1)` evaluated at `x`.
///
/// Computes `y0 + (x - x0) * (y1 - y0) / (x1 - x0)`. When the two abscissae
/// coincide the left ordinate is returned.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::lerp;
///
/// assert_eq!(lerp(0.0, 1.0, 10.0, 2.0, 5.0), 1.5);
/// assert_eq!(lerp(3.0, 7.0, 3.0, 9.0, 3.0), 7.0);
/// ```
#[inline]
pub fn lerp<T: Float>(x0: T, y0: T, x1: T, y1: T, x: T) -> T {
    let width = x1 - x0;
    if width == T::zero() {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / width
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_midpoint() {
        assert_relative_eq!(lerp(1.0_f64, 0.02, 3.0, 0.04, 2.0), 0.03, epsilon = 1e-15);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        assert_eq!(lerp(0.0, 0.051, 91.0, 0.052, 0.0), 0.051);
        assert_eq!(lerp(0.0_f32, 1.5, 2.0, 2.5, 2.0), 2.5);
    }

    #[test]
    fn test_lerp_extrapolates_linearly() {
        assert_relative_eq!(lerp(0.0_f64, 0.0, 1.0, 1.0, 2.0), 2.0);
    }
}
