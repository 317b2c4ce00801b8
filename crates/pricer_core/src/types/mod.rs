//! Core time and error types.
//!
//! This module provides:
//! - `time`: Calendar date type and day count conventions
//! - `error`: Structured error types for dates and pricing operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`DayCountConvention`], [`DAYS_PER_YEAR`] from `time`
//! - [`PricingError`], [`DateError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError};
pub use time::{Date, DayCountConvention, DAYS_PER_YEAR};
