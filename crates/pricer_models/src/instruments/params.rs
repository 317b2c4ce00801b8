//! Common trade parameters.
//!
//! This module provides the validated parameter blocks shared by
//! trades of the same family: [`FixedIncomeParams`] for bonds and
//! swaps, [`OptionParams`] for lattice and closed-form options.

use pricer_core::market_data::curves::names::discount_curve_for;
use pricer_core::types::time::{Date, DayCountConvention};

use super::direction::Direction;
use super::error::InstrumentError;
use crate::schedules::Schedule;

/// Contractual terms shared by bonds and swaps.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{Direction, FixedIncomeParams};
/// use pricer_core::types::time::Date;
///
/// let params = FixedIncomeParams::new(
///     1_000_000.0,
///     0.03,
///     0.5,
///     Date::from_ymd(2024, 1, 1).unwrap(),
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     "USD-GOV-2Y",
///     "USD-SOFR",
///     Direction::Long,
/// )
/// .unwrap();
///
/// assert_eq!(params.schedule().periods().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedIncomeParams {
    notional: f64,
    rate: f64,
    frequency: f64,
    underlying: String,
    curve_name: String,
    direction: Direction,
    schedule: Schedule,
}

impl FixedIncomeParams {
    /// Creates fixed income terms and generates the coupon schedule.
    ///
    /// # Arguments
    /// * `notional` - Face amount (must be positive)
    /// * `rate` - Coupon or fixed rate as a decimal
    /// * `frequency` - Coupon period in years, in (0, 1]
    /// * `start` - Accrual start date
    /// * `end` - Maturity date
    /// * `underlying` - Instrument code
    /// * `curve_name` - Discounting curve
    /// * `direction` - Trade side
    ///
    /// # Errors
    /// - `InstrumentError::InvalidNotional` for a non-positive notional
    /// - `InstrumentError::Schedule` if start >= end or the frequency is invalid
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        notional: f64,
        rate: f64,
        frequency: f64,
        start: Date,
        end: Date,
        underlying: impl Into<String>,
        curve_name: impl Into<String>,
        direction: Direction,
    ) -> Result<Self, InstrumentError> {
        check_notional(notional)?;
        let schedule = Schedule::generate(start, end, frequency)?;
        Ok(Self {
            notional,
            rate,
            frequency,
            underlying: underlying.into(),
            curve_name: curve_name.into(),
            direction,
            schedule,
        })
    }

    /// Returns the notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the coupon or fixed rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the coupon period in years.
    #[inline]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Returns the instrument code.
    #[inline]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Returns the discounting curve name.
    #[inline]
    pub fn curve_name(&self) -> &str {
        &self.curve_name
    }

    /// Returns the trade side.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the coupon schedule.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

/// Terms shared by lattice and closed-form options.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{Direction, OptionParams};
/// use pricer_core::types::time::Date;
///
/// let params = OptionParams::new(
///     1.0,
///     Date::from_ymd(2025, 6, 30).unwrap(),
///     "AAPL",
///     "USD-SOFR",
///     "LOGVOL",
///     Direction::Long,
/// )
/// .unwrap();
/// assert_eq!(params.vol_name(), "LOGVOL");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParams {
    notional: f64,
    expiry: Date,
    underlying: String,
    curve_name: String,
    vol_name: String,
    direction: Direction,
}

impl OptionParams {
    /// Creates option terms.
    ///
    /// # Errors
    /// `InstrumentError::InvalidNotional` for a non-positive notional.
    pub fn new(
        notional: f64,
        expiry: Date,
        underlying: impl Into<String>,
        curve_name: impl Into<String>,
        vol_name: impl Into<String>,
        direction: Direction,
    ) -> Result<Self, InstrumentError> {
        check_notional(notional)?;
        Ok(Self {
            notional,
            expiry,
            underlying: underlying.into(),
            curve_name: curve_name.into(),
            vol_name: vol_name.into(),
            direction,
        })
    }

    /// Returns the notional (number of units).
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the expiry date.
    #[inline]
    pub fn expiry(&self) -> Date {
        self.expiry
    }

    /// Returns the underlying stock name.
    #[inline]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Returns the discounting curve name.
    #[inline]
    pub fn curve_name(&self) -> &str {
        &self.curve_name
    }

    /// Returns the volatility curve name.
    #[inline]
    pub fn vol_name(&self) -> &str {
        &self.vol_name
    }

    /// Returns the trade side.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Time from `as_of` to expiry in years (ACT/365).
    #[inline]
    pub fn time_to_expiry(&self, as_of: Date) -> f64 {
        DayCountConvention::Act365Fixed.year_fraction(as_of, self.expiry)
    }
}

/// Resolves the discounting curve from an instrument code's currency prefix.
///
/// # Errors
/// `InstrumentError::UnknownCurrency` if the prefix has no curve.
///
/// # Examples
/// ```
/// use pricer_models::instruments::resolve_discount_curve;
///
/// assert_eq!(resolve_discount_curve("SGD-GOV-5Y").unwrap(), "SGD-SORA");
/// assert!(resolve_discount_curve("EUR-GOV-5Y").is_err());
/// ```
pub fn resolve_discount_curve(code: &str) -> Result<&'static str, InstrumentError> {
    discount_curve_for(code).ok_or_else(|| InstrumentError::UnknownCurrency {
        code: code.to_string(),
    })
}

fn check_notional(notional: f64) -> Result<(), InstrumentError> {
    if !notional.is_finite() || notional <= 0.0 {
        return Err(InstrumentError::InvalidNotional { notional });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedules::ScheduleError;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_income_rejects_bad_notional() {
        let result = FixedIncomeParams::new(
            0.0,
            0.03,
            0.5,
            date(2024, 1, 1),
            date(2026, 1, 1),
            "USD-GOV",
            "USD-SOFR",
            Direction::Long,
        );
        assert_eq!(result, Err(InstrumentError::InvalidNotional { notional: 0.0 }));
    }

    #[test]
    fn test_fixed_income_rejects_bad_schedule() {
        let result = FixedIncomeParams::new(
            1e6,
            0.03,
            2.0,
            date(2024, 1, 1),
            date(2026, 1, 1),
            "USD-GOV",
            "USD-SOFR",
            Direction::Long,
        );
        assert!(matches!(
            result,
            Err(InstrumentError::Schedule(ScheduleError::InvalidFrequency { .. }))
        ));
    }

    #[test]
    fn test_option_time_to_expiry() {
        let params = OptionParams::new(
            10.0,
            date(2026, 1, 1),
            "AAPL",
            "USD-SOFR",
            "LOGVOL",
            Direction::Short,
        )
        .unwrap();
        assert_eq!(params.time_to_expiry(date(2025, 1, 1)), 1.0);
        assert!(OptionParams::new(f64::NAN, date(2026, 1, 1), "A", "B", "C", Direction::Long).is_err());
    }
}
