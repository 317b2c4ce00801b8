//! Numerical helpers shared by the curve layer.
//!
//! - [`interpolators`]: Piecewise linear interpolation with flat extrapolation

pub mod interpolators;
