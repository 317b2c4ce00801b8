//! Period definition for scheduled instruments.

use pricer_core::types::time::{Date, DayCountConvention};
use std::fmt;

/// A single accrual period, paid on its end date.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Period;
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let period = Period::new(
///     Date::from_ymd(2024, 1, 15).unwrap(),
///     Date::from_ymd(2024, 7, 15).unwrap(),
/// );
///
/// assert!((period.year_fraction(DayCountConvention::Act360) - 0.5056).abs() < 0.001); // 182/360
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// Start date of the accrual period.
    start: Date,
    /// End date of the accrual period, also the payment date.
    end: Date,
}

impl Period {
    /// Creates a new period.
    #[inline]
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Returns the accrual start date.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the accrual end date.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns the payment date.
    #[inline]
    pub fn payment(&self) -> Date {
        self.end
    }

    /// Returns the accrual fraction under the given convention.
    #[inline]
    pub fn year_fraction(&self, day_count: DayCountConvention) -> f64 {
        day_count.year_fraction(self.start, self.end)
    }

    /// Returns the number of calendar days in the period.
    #[inline]
    pub fn days(&self) -> i64 {
        self.end - self.start
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.start, self.end)
    }
}
