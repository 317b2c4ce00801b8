//! Closed-form formulas for European options.
//!
//! This module provides:
//! - Standard normal CDF/PDF (`distributions`)
//! - Black-Scholes call/put prices and vega (`black_scholes`)
//!
//! The closed form is used both to value the Black cross-check trades and
//! to validate lattice convergence.

pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
