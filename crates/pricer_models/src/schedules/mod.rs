//! Coupon schedule generation for bonds and swaps.
//!
//! This module provides:
//! - [`Schedule`]: Ordered coupon dates from start to end
//! - [`Period`]: A single accrual period paying on its end date
//! - [`ScheduleError`]: Validation failures (date range, frequency)
//!
//! # Examples
//!
//! ```
//! use pricer_models::schedules::Schedule;
//! use pricer_core::types::time::Date;
//!
//! // Semi-annual schedule over two years
//! let schedule = Schedule::generate(
//!     Date::from_ymd(2024, 1, 15).unwrap(),
//!     Date::from_ymd(2026, 1, 15).unwrap(),
//!     0.5,
//! )
//! .unwrap();
//!
//! assert_eq!(schedule.periods().len(), 4);
//! assert_eq!(schedule.dates().len(), 5);
//! ```

mod error;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use period::Period;
pub use schedule::Schedule;
