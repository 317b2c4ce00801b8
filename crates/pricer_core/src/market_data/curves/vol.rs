//! Volatility term structure.

use super::term_structure::TermStructure;
use crate::types::Date;

/// Lognormal volatility per expiry date.
///
/// Shares the interpolation rules of [`RateCurve`](super::RateCurve):
/// flat outside the tenor range and linear in calendar days between tenors.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::VolCurve;
/// use pricer_core::types::Date;
///
/// let t0 = Date::from_ymd(2024, 1, 1).unwrap();
/// let mut vol = VolCurve::new("LOGVOL");
/// vol.add_vol(t0.add_days(182).unwrap(), 0.20);
/// vol.add_vol(t0.add_days(365).unwrap(), 0.25);
///
/// vol.shock(0.01);
/// assert!((vol.vol(t0) - 0.21).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolCurve {
    points: TermStructure,
}

impl VolCurve {
    /// Creates an empty volatility curve with the given name.
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

    /// Adds a volatility at `tenor` unless that tenor is already present.
    pub fn add_vol(&mut self, tenor: Date, vol: f64) -> bool {
        self.points.insert(tenor, vol)
    }

    /// Returns the interpolated volatility at `date`.
    #[inline]
    pub fn vol(&self, date: Date) -> f64 {
        self.points.value_at(date)
    }

    /// Shifts every volatility by `delta`.
    pub fn shock(&mut self, delta: f64) {
        self.points.shock(delta);
    }

    /// Iterates over the stored `(tenor, vol)` points.
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vol_interpolation_and_extrapolation() {
        let t0 = Date::from_ymd(2024, 1, 1).unwrap();
        let mut vol = VolCurve::new("LOGVOL");
        vol.add_vol(t0.add_days(100).unwrap(), 0.30);
        vol.add_vol(t0.add_days(300).unwrap(), 0.20);

        assert_eq!(vol.vol(t0), 0.30);
        assert_relative_eq!(vol.vol(t0.add_days(200).unwrap()), 0.25, epsilon = 1e-15);
        assert_eq!(vol.vol(t0.add_days(5000).unwrap()), 0.20);
    }

    #[test]
    fn test_clone_is_independent() {
        let t0 = Date::from_ymd(2024, 1, 1).unwrap();
        let mut base = VolCurve::new("LOGVOL");
        base.add_vol(t0, 0.2);

        let mut bumped = base.clone();
        bumped.shock(0.05);

        assert_eq!(base.vol(t0), 0.2);
        assert_relative_eq!(bumped.vol(t0), 0.25, epsilon = 1e-15);
    }
}
