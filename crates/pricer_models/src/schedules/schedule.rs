//! Schedule implementation.

use super::error::ScheduleError;
use super::period::Period;
use pricer_core::types::time::Date;

/// Largest distance of `12 * frequency` from an integer still read as whole months.
const WHOLE_MONTH_TOLERANCE: f64 = 1e-9;

/// Coupon dates from start to end, stepped by a whole number of months.
///
/// The first date is the accrual start; every later date pays a coupon.
/// Dates are generated as `start + k * step` rather than by repeated
/// stepping, so a month-end start does not drift after a short month.
/// If the last step does not land on `end`, `end` closes a short final period.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Schedule;
/// use pricer_core::types::time::Date;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 10, 1).unwrap();
/// let schedule = Schedule::generate(start, end, 0.5).unwrap();
///
/// // 6M regular period then a 3M stub
/// let dates: Vec<String> = schedule.dates().iter().map(|d| d.to_string()).collect();
/// assert_eq!(dates, ["2024-01-01", "2024-07-01", "2024-10-01"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    dates: Vec<Date>,
    step_months: i32,
}

impl Schedule {
    /// Generates a schedule.
    ///
    /// # Arguments
    ///
    /// * `start` - Accrual start date
    /// * `end` - Maturity date
    /// * `frequency` - Coupon period in years (0.5 = semi-annual, 1.0 = annual)
    ///
    /// # Errors
    ///
    /// - `ScheduleError::InvalidDateRange` if `start >= end`
    /// - `ScheduleError::InvalidFrequency` if `frequency` is outside (0, 1]
    ///   or is not a whole number of months
    pub fn generate(start: Date, end: Date, frequency: f64) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }
        if !frequency.is_finite() || frequency <= 0.0 || frequency > 1.0 {
            return Err(ScheduleError::InvalidFrequency { frequency });
        }
        let months = 12.0 * frequency;
        let step_months = months.round() as i32;
        if step_months < 1 || (months - months.round()).abs() > WHOLE_MONTH_TOLERANCE {
            return Err(ScheduleError::InvalidFrequency { frequency });
        }

        let mut dates = vec![start];
        let mut k = 1;
        loop {
            let next = start.add_months(k * step_months)?;
            if next >= end {
                break;
            }
            dates.push(next);
            k += 1;
        }
        dates.push(end);

        Ok(Self { dates, step_months })
    }

    /// Returns every schedule date, accrual start first.
    #[inline]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the accrual start date.
    #[inline]
    pub fn start(&self) -> Date {
        self.dates[0]
    }

    /// Returns the maturity date.
    #[inline]
    pub fn end(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Returns the regular step in months.
    #[inline]
    pub fn step_months(&self) -> i32 {
        self.step_months
    }

    /// Returns the accrual periods between consecutive dates.
    pub fn periods(&self) -> Vec<Period> {
        self.dates
            .windows(2)
            .map(|w| Period::new(w[0], w[1]))
            .collect()
    }

    /// Returns the periods still paying on or after `value_date`.
    ///
    /// Past coupons are dropped; a period paying exactly on `value_date`
    /// is kept.
    pub fn live_periods(&self, value_date: Date) -> impl Iterator<Item = Period> + '_ {
        self.dates
            .windows(2)
            .map(|w| Period::new(w[0], w[1]))
            .filter(move |p| p.payment() >= value_date)
    }
}
