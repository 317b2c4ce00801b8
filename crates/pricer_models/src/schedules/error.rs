//! Schedule generation error types.

use pricer_core::types::time::Date;
use pricer_core::types::DateError;
use thiserror::Error;

/// Errors that can occur during schedule generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    /// Start date must be before end date.
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// Frequency outside (0, 1] years or not a whole number of months.
    #[error("Frequency {frequency} is invalid: expected a coupon period in (0, 1] years of whole months")]
    InvalidFrequency {
        /// The coupon period in years.
        frequency: f64,
    },

    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow: {0}")]
    DateOverflow(#[from] DateError),
}
