//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function built on the error function
//! - `norm_pdf`: Probability density function

use num_traits::Float;
use statrs::function::erf::erf;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * (1 + erf(x / sqrt(2)))
///
/// # Accuracy
/// Absolute error is about 1e-11, well inside the lattice convergence
/// tolerances this is used as a reference for.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.959963984540054) - 0.975).abs() < 1e-10);
/// assert!(norm_cdf(-8.0) < 1e-10);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804014327).abs() < 1e-15);
/// assert_eq!(norm_pdf(1.5_f64), norm_pdf(-1.5_f64));
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap_or_else(T::zero);
    let scale = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::zero);
    scale * (-half * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_norm_cdf_known_values() {
        assert_relative_eq!(norm_cdf(1.0), 0.841_344_746_068_542_9, epsilon = 1e-10);
        assert_relative_eq!(norm_cdf(-1.0), 0.158_655_253_931_457_05, epsilon = 1e-10);
    }

    #[test]
    fn test_norm_pdf_f32() {
        assert!((norm_pdf(0.0_f32) - 0.398_942_3).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_cdf_symmetry(x in -10.0f64..10.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-10);
        }

        #[test]
        fn prop_cdf_monotone(x in -6.0f64..6.0, dx in 1e-3f64..1.0) {
            prop_assert!(norm_cdf(x + dx) >= norm_cdf(x));
        }
    }
}
