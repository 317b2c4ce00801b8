//! Zero-rate curve implementation.

use super::term_structure::TermStructure;
use crate::types::{Date, DayCountConvention};

/// Zero-rate term structure keyed by tenor date.
///
/// Rates are continuously compounded and quoted as decimals (0.04 = 4%).
/// Tenors must be added in non-decreasing order; a tenor that is already
/// present is ignored.
///
/// # Interpolation
///
/// - Before the first tenor: the first rate (flat extrapolation)
/// - After the last tenor: the last rate (flat extrapolation)
/// - On a stored tenor: the stored rate
/// - Between tenors: linear in calendar days
///
/// # Example
///
/// ```
/// use pricer_core::market_data::RateCurve;
/// use pricer_core::types::Date;
///
/// let t0 = Date::from_ymd(2024, 1, 1).unwrap();
/// let mut curve = RateCurve::new("USD-SOFR");
/// curve.add_rate(t0.add_days(100).unwrap(), 0.02);
/// curve.add_rate(t0.add_days(200).unwrap(), 0.03);
///
/// assert_eq!(curve.rate(t0), 0.02);
/// assert!((curve.rate(t0.add_days(150).unwrap()) - 0.025).abs() < 1e-15);
/// assert_eq!(curve.rate(t0.add_days(900).unwrap()), 0.03);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateCurve {
    points: TermStructure,
}

impl RateCurve {
    /// Creates an empty curve with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            points: TermStructure::new(name),
        }
    }

    /// Returns the curve name.
    #[inline]
    pub fn name(&self) -> &str {
        self.points.name()
    }

    /// Adds a rate at `tenor` if that tenor is not already on the curve.
    ///
    /// Returns `true` when the point was inserted.
    pub fn add_rate(&mut self, tenor: Date, rate: f64) -> bool {
        self.points.insert(tenor, rate)
    }

    /// Returns the interpolated zero rate at `date`.
    #[inline]
    pub fn rate(&self, date: Date) -> f64 {
        self.points.value_at(date)
    }

    /// Returns the discount factor for a cashflow at `date` seen from `value_date`.
    ///
    /// `exp(-rate(date) * (date - value_date) / 365)`. A `value_date` after
    /// `date` yields a factor above one.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::market_data::RateCurve;
    /// use pricer_core::types::Date;
    ///
    /// let t0 = Date::from_ymd(2025, 1, 1).unwrap();
    /// let t1 = Date::from_ymd(2026, 1, 1).unwrap();
    /// let mut curve = RateCurve::new("USD-SOFR");
    /// curve.add_rate(t1, 0.05);
    ///
    /// assert!((curve.discount_factor(t1, t0) - (-0.05_f64).exp()).abs() < 1e-15);
    /// assert!(curve.discount_factor(t0, t1) > 1.0);
    /// ```
    #[inline]
    pub fn discount_factor(&self, date: Date, value_date: Date) -> f64 {
        let t = DayCountConvention::Act365Fixed.year_fraction(value_date, date);
        (-self.rate(date) * t).exp()
    }

    /// Parallel-shifts every rate by `delta`.
    pub fn shock(&mut self, delta: f64) {
        self.points.shock(delta);
    }

    /// Iterates over the stored `(tenor, rate)` points in insertion order.
    pub fn pillars(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.points.pillars()
    }

    /// Returns the number of tenor points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the curve has no tenor points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.len() == 0
    }
}
