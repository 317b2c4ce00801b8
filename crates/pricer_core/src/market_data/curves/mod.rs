//! Term structures quoted per tenor date.
//!
//! This module provides:
//! - [`RateCurve`]: Zero-rate curve with continuously compounded discount factors
//! - [`VolCurve`]: Lognormal volatility per expiry
//! - [`names`]: Identifiers of the curves the pricer expects to find
//!
//! Both curves keep their tenors in insertion order, interpolate linearly in
//! calendar days between tenors and extrapolate flat outside them.

pub mod names;
mod rate;
mod term_structure;
mod vol;

pub use rate::RateCurve;
pub use vol::VolCurve;
