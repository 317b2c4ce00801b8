//! Calendar dates and day count conventions.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate with
//!   day/month/year arithmetic and signed day-count subtraction
//! - `DayCountConvention`: ACT/365 Fixed and ACT/360 year fractions
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = start.add_months(6).unwrap();
//! assert_eq!(end, Date::from_ymd(2024, 7, 1).unwrap());
//!
//! // 182 days / 365
//! let yf = DayCountConvention::Act365Fixed.year_fraction(start, end);
//! assert!((yf - 0.4986).abs() < 0.001);
//! ```

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Day-count denominator used for discounting and time to expiry.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// A `Date` is always a valid calendar date. Arithmetic produces a new
/// normalised value and never mutates the receiver.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Arguments
    /// * `year` - Year (e.g., 2024)
    /// * `month` - Month (1-12)
    /// * `day` - Day (1-31, depending on month)
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s.trim(), e)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day number counted from 0001-01-01 (day 1).
    ///
    /// Differences of day numbers equal date subtraction, which makes this
    /// a convenient abscissa for interpolating along a date axis.
    #[inline]
    pub fn day_number(&self) -> i64 {
        i64::from(self.0.num_days_from_ce())
    }

    /// Returns true if the date falls in a leap year.
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Adds a signed number of calendar days.
    ///
    /// Month and year boundaries are crossed as needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2023, 12, 31).unwrap();
    /// assert_eq!(d.add_days(1).unwrap(), Date::from_ymd(2024, 1, 1).unwrap());
    /// assert_eq!(d.add_days(-365).unwrap(), Date::from_ymd(2022, 12, 31).unwrap());
    /// ```
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("{} {:+} days", self, days)))
    }

    /// Adds a signed number of calendar months.
    ///
    /// The day is clamped to the length of the target month, so
    /// 31 January plus one month is the last day of February.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2024, 1, 31).unwrap();
    /// assert_eq!(d.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    /// assert_eq!(d.add_months(-2).unwrap(), Date::from_ymd(2023, 11, 30).unwrap());
    /// ```
    pub fn add_months(self, months: i32) -> Result<Self, DateError> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("{} {:+} months", self, months)))
    }

    /// Adds a signed number of years.
    ///
    /// 29 February maps to 28 February when the target year is not a leap year.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert_eq!(d.add_years(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
    /// assert_eq!(d.add_years(4).unwrap(), Date::from_ymd(2028, 2, 29).unwrap());
    /// ```
    pub fn add_years(self, years: i32) -> Result<Self, DateError> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| DateError::OutOfRange(format!("{} {:+} years", self, years)))?;
        self.add_months(months)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

/// Day Count Convention (year fraction convention).
///
/// # Variants
/// - `Act365Fixed`: Actual days / 365, used for discounting and option expiry
/// - `Act360`: Actual days / 360, used for swap fixed-leg accruals
///
/// # Usage
///
/// ```
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 7, 1).unwrap();
///
/// let yf = DayCountConvention::Act360.year_fraction(start, end);
/// assert!((yf - 182.0 / 360.0).abs() < 1e-12);
///
/// // Reversed dates give a negative fraction
/// assert!(DayCountConvention::Act360.year_fraction(end, start) < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    #[default]
    Act365Fixed,

    /// Actual/360: actual_days / 360.0
    Act360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::Act365Fixed.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::Act360.name(), "ACT/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act365Fixed => "ACT/365",
            DayCountConvention::Act360 => "ACT/360",
        }
    }

    /// Returns the denominator in days.
    #[inline]
    pub fn days_in_year(&self) -> f64 {
        match self {
            DayCountConvention::Act365Fixed => DAYS_PER_YEAR,
            DayCountConvention::Act360 => 360.0,
        }
    }

    /// Calculates the signed year fraction from `start` to `end`.
    ///
    /// # Arguments
    /// * `start` - Start date
    /// * `end` - End date
    ///
    /// # Returns
    /// Year fraction as f64. Negative if `start > end`.
    #[inline]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        (end - start) as f64 / self.days_in_year()
    }
}

impl FromStr for DayCountConvention {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACT/365" | "ACT365" | "ACT/365F" => Ok(DayCountConvention::Act365Fixed),
            "ACT/360" | "ACT360" => Ok(DayCountConvention::Act360),
            other => Err(DateError::ParseError(format!(
                "unknown day count convention '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    // ========================================
    // Construction and parsing
    // ========================================

    #[test]
    fn test_date_from_ymd_invalid() {
        assert!(Date::from_ymd(2024, 2, 30).is_err());
        assert!(Date::from_ymd(2024, 13, 1).is_err());
        assert!(Date::from_ymd(2024, 0, 1).is_err());
    }

    #[test]
    fn test_date_parse_trims() {
        assert_eq!(Date::parse(" 2024-03-15 ").unwrap(), date(2024, 3, 15));
    }

    #[test]
    fn test_date_parse_invalid() {
        let err = Date::parse("2024/03/15").unwrap_err();
        assert!(matches!(err, DateError::ParseError(_)));
    }

    #[test]
    fn test_date_display() {
        assert_eq!(date(2024, 3, 5).to_string(), "2024-03-05");
    }

    // ========================================
    // Arithmetic
    // ========================================

    #[test]
    fn test_add_days_crosses_leap_day() {
        assert_eq!(date(2024, 2, 28).add_days(1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2023, 2, 28).add_days(1).unwrap(), date(2023, 3, 1));
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(date(2023, 1, 31).add_months(1).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 3, 31).add_months(6).unwrap(), date(2024, 9, 30));
        assert_eq!(date(2024, 11, 15).add_months(3).unwrap(), date(2025, 2, 15));
    }

    #[test]
    fn test_add_years_leap_day() {
        assert_eq!(date(2024, 2, 29).add_years(-1).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 6, 1).add_years(2).unwrap(), date(2026, 6, 1));
    }

    #[test]
    fn test_add_days_out_of_range() {
        let err = date(2024, 1, 1).add_days(i64::MAX).unwrap_err();
        assert!(matches!(err, DateError::OutOfRange(_)));
    }

    #[test]
    fn test_subtraction_signed() {
        let a = date(2024, 1, 1);
        let b = date(2025, 1, 1);
        assert_eq!(b - a, 366);
        assert_eq!(a - b, -366);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(date(2024, 5, 1).is_leap_year());
        assert!(!date(2100, 5, 1).is_leap_year());
    }

    // ========================================
    // Day count conventions
    // ========================================

    #[test]
    fn test_act_365_one_year() {
        let yf = DayCountConvention::Act365Fixed.year_fraction(date(2025, 1, 1), date(2026, 1, 1));
        assert_eq!(yf, 1.0);
    }

    #[test]
    fn test_dcc_from_str() {
        assert_eq!(
            "act/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert!("30/360".parse::<DayCountConvention>().is_err());
    }

    proptest! {
        #[test]
        fn prop_add_days_then_subtract(offset in -20_000i64..20_000) {
            let base = date(2024, 1, 1);
            let shifted = base.add_days(offset).unwrap();
            prop_assert_eq!(shifted - base, offset);
        }

        #[test]
        fn prop_add_months_stays_valid(day in 1u32..=31, months in -240i32..240) {
            let base = Date::from_ymd(2024, 1, day).unwrap();
            let shifted = base.add_months(months).unwrap();
            prop_assert!(shifted.day() <= day);
        }
    }
}
