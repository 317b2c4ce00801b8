//! Interpolation methods for term structures.
//!
//! - [`lerp`]: Linear interpolation between two points, generic over
//!   `T: num_traits::Float`
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::lerp;
//!
//! // Halfway between 1% and 3%
//! assert!((lerp(0.0_f64, 0.01, 10.0, 0.03, 5.0) - 0.02).abs() < 1e-15);
//! ```

mod linear;

pub use linear::lerp;
