//! Market snapshot: every curve and reference price as of one date.
//!
//! A [`MarketSnapshot`] owns all of its curves. `Clone` therefore produces a
//! fully independent copy, which is how risk scenarios are built: copy the
//! base snapshot, then shock the copy.

use std::collections::BTreeMap;
use std::fmt;

use super::curves::{RateCurve, VolCurve};
use super::error::MarketDataError;
use crate::types::Date;

/// Named rate curves, volatility curves and reference prices as of a date.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{MarketSnapshot, RateCurve};
/// use pricer_core::types::Date;
///
/// let as_of = Date::from_ymd(2024, 1, 1).unwrap();
/// let mut base = MarketSnapshot::new(as_of);
/// let mut curve = RateCurve::new("USD-SOFR");
/// curve.add_rate(as_of, 0.04);
/// base.insert_curve(curve).unwrap();
/// base.insert_stock_price("AAPL", 190.0);
///
/// // Scenario copies never touch the base snapshot
/// let mut up = base.clone();
/// up.shock_curve("USD-SOFR", 0.0001).unwrap();
/// up.shock_stock_price("AAPL", 1.0).unwrap();
///
/// assert_eq!(base.curve("USD-SOFR").unwrap().rate(as_of), 0.04);
/// assert_eq!(base.stock_price("AAPL").unwrap(), 190.0);
/// assert_eq!(up.stock_price("AAPL").unwrap(), 191.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSnapshot {
    as_of: Date,
    curves: BTreeMap<String, RateCurve>,
    vol_curves: BTreeMap<String, VolCurve>,
    bond_prices: BTreeMap<String, f64>,
    stock_prices: BTreeMap<String, f64>,
}

impl MarketSnapshot {
    /// Creates an empty snapshot for the given as-of date.
    pub fn new(as_of: Date) -> Self {
        Self {
            as_of,
            curves: BTreeMap::new(),
            vol_curves: BTreeMap::new(),
            bond_prices: BTreeMap::new(),
            stock_prices: BTreeMap::new(),
        }
    }

    /// Returns the as-of (valuation) date.
    #[inline]
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Registers a rate curve under its own name, replacing any previous one.
    ///
    /// # Errors
    ///
    /// `MarketDataError::EmptyCurve` if the curve has no tenor points.
    pub fn insert_curve(&mut self, curve: RateCurve) -> Result<(), MarketDataError> {
        if curve.is_empty() {
            return Err(MarketDataError::EmptyCurve {
                name: curve.name().to_string(),
            });
        }
        self.curves.insert(curve.name().to_string(), curve);
        Ok(())
    }

    /// Registers a volatility curve under its own name.
    ///
    /// # Errors
    ///
    /// `MarketDataError::EmptyCurve` if the curve has no tenor points.
    pub fn insert_vol_curve(&mut self, curve: VolCurve) -> Result<(), MarketDataError> {
        if curve.is_empty() {
            return Err(MarketDataError::EmptyCurve {
                name: curve.name().to_string(),
            });
        }
        self.vol_curves.insert(curve.name().to_string(), curve);
        Ok(())
    }

    /// Sets the reference price of a bond.
    pub fn insert_bond_price(&mut self, name: impl Into<String>, price: f64) {
        self.bond_prices.insert(name.into(), price);
    }

    /// Sets the reference price of a stock.
    pub fn insert_stock_price(&mut self, name: impl Into<String>, price: f64) {
        self.stock_prices.insert(name.into(), price);
    }

    /// Looks up a rate curve.
    pub fn curve(&self, name: &str) -> Result<&RateCurve, MarketDataError> {
        self.curves
            .get(name)
            .ok_or_else(|| MarketDataError::CurveNotFound {
                name: name.to_string(),
            })
    }

    /// Looks up a volatility curve.
    pub fn vol_curve(&self, name: &str) -> Result<&VolCurve, MarketDataError> {
        self.vol_curves
            .get(name)
            .ok_or_else(|| MarketDataError::VolCurveNotFound {
                name: name.to_string(),
            })
    }

    /// Looks up a stock reference price.
    pub fn stock_price(&self, name: &str) -> Result<f64, MarketDataError> {
        self.stock_prices
            .get(name)
            .copied()
            .ok_or_else(|| MarketDataError::PriceNotFound {
                name: name.to_string(),
            })
    }

    /// Looks up a bond reference price.
    pub fn bond_price(&self, name: &str) -> Result<f64, MarketDataError> {
        self.bond_prices
            .get(name)
            .copied()
            .ok_or_else(|| MarketDataError::PriceNotFound {
                name: name.to_string(),
            })
    }

    /// Returns true if a rate curve with this name is registered.
    pub fn has_curve(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    /// Names of every registered rate curve, sorted.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    /// Names of every registered volatility curve, sorted.
    pub fn vol_curve_names(&self) -> impl Iterator<Item = &str> {
        self.vol_curves.keys().map(String::as_str)
    }

    // Scenario mutators. Apply them to an owned copy, never to a snapshot
    // that other workers are reading.

    /// Parallel-shifts the named rate curve by `delta`.
    pub fn shock_curve(&mut self, name: &str, delta: f64) -> Result<(), MarketDataError> {
        self.curves
            .get_mut(name)
            .map(|curve| curve.shock(delta))
            .ok_or_else(|| MarketDataError::CurveNotFound {
                name: name.to_string(),
            })
    }

    /// Shifts every point of the named volatility curve by `delta`.
    pub fn shock_vol_curve(&mut self, name: &str, delta: f64) -> Result<(), MarketDataError> {
        self.vol_curves
            .get_mut(name)
            .map(|curve| curve.shock(delta))
            .ok_or_else(|| MarketDataError::VolCurveNotFound {
                name: name.to_string(),
            })
    }

    /// Adds `delta` to one stock reference price.
    pub fn shock_stock_price(&mut self, name: &str, delta: f64) -> Result<(), MarketDataError> {
        self.stock_prices
            .get_mut(name)
            .map(|price| *price += delta)
            .ok_or_else(|| MarketDataError::PriceNotFound {
                name: name.to_string(),
            })
    }

    /// Adds `delta` to every stock reference price.
    pub fn shock_all_stock_prices(&mut self, delta: f64) {
        for price in self.stock_prices.values_mut() {
            *price += delta;
        }
    }
}

impl fmt::Display for MarketSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "market as of {}", self.as_of)?;
        for curve in self.curves.values() {
            writeln!(f, "rate curve {}", curve.name())?;
            for (tenor, rate) in curve.pillars() {
                writeln!(f, "  {}: {:.4}%", tenor, rate * 100.0)?;
            }
        }
        for curve in self.vol_curves.values() {
            writeln!(f, "vol curve {}", curve.name())?;
            for (tenor, vol) in curve.pillars() {
                writeln!(f, "  {}: {:.4}%", tenor, vol * 100.0)?;
            }
        }
        for (name, price) in &self.bond_prices {
            writeln!(f, "bond {}: {}", name, price)?;
        }
        for (name, price) in &self.stock_prices {
            writeln!(f, "stock {}: {}", name, price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> Date {
        Date::from_ymd(2024, 1, 1).unwrap()
    }

    fn snapshot() -> MarketSnapshot {
        let mut market = MarketSnapshot::new(as_of());
        let mut usd = RateCurve::new("USD-SOFR");
        usd.add_rate(as_of().add_days(365).unwrap(), 0.05);
        market.insert_curve(usd).unwrap();
        let mut vol = VolCurve::new("LOGVOL");
        vol.add_vol(as_of().add_days(365).unwrap(), 0.2);
        market.insert_vol_curve(vol).unwrap();
        market.insert_stock_price("AAPL", 100.0);
        market.insert_stock_price("MSFT", 300.0);
        market.insert_bond_price("USD-GOV-2Y", 99.5);
        market
    }

    #[test]
    fn test_lookup_errors() {
        let market = snapshot();
        assert!(matches!(
            market.curve("SGD-SORA"),
            Err(MarketDataError::CurveNotFound { .. })
        ));
        assert!(matches!(
            market.vol_curve("NOPE"),
            Err(MarketDataError::VolCurveNotFound { .. })
        ));
        assert!(matches!(
            market.stock_price("NOPE"),
            Err(MarketDataError::PriceNotFound { .. })
        ));
        assert_eq!(market.bond_price("USD-GOV-2Y").unwrap(), 99.5);
    }

    #[test]
    fn test_empty_curve_rejected() {
        let mut market = snapshot();
        let err = market.insert_curve(RateCurve::new("EMPTY")).unwrap_err();
        assert_eq!(
            err,
            MarketDataError::EmptyCurve {
                name: "EMPTY".to_string()
            }
        );
        assert!(market.insert_vol_curve(VolCurve::new("EMPTY")).is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let base = snapshot();
        let mut copy = base.clone();
        copy.shock_curve("USD-SOFR", 0.01).unwrap();
        copy.shock_vol_curve("LOGVOL", 0.01).unwrap();
        copy.shock_all_stock_prices(5.0);

        let t = as_of();
        assert_eq!(base.curve("USD-SOFR").unwrap().rate(t), 0.05);
        assert_eq!(base.vol_curve("LOGVOL").unwrap().vol(t), 0.2);
        assert_eq!(base.stock_price("MSFT").unwrap(), 300.0);
        assert_eq!(copy.stock_price("MSFT").unwrap(), 305.0);
        assert_ne!(base, copy);
    }

    #[test]
    fn test_shock_missing_curve_fails() {
        let mut market = snapshot();
        assert!(market.shock_curve("SGD-SORA", 0.0001).is_err());
        assert!(market.shock_vol_curve("SMILE", 0.01).is_err());
        assert!(market.shock_stock_price("TSLA", 1.0).is_err());
    }

    #[test]
    fn test_names_sorted() {
        let mut market = snapshot();
        let mut sgd = RateCurve::new("SGD-SORA");
        sgd.add_rate(as_of(), 0.03);
        market.insert_curve(sgd).unwrap();
        let names: Vec<&str> = market.curve_names().collect();
        assert_eq!(names, vec!["SGD-SORA", "USD-SOFR"]);
        assert!(market.has_curve("SGD-SORA"));
        assert_eq!(market.vol_curve_names().count(), 1);
    }

    #[test]
    fn test_display_lists_everything() {
        let text = snapshot().to_string();
        assert!(text.starts_with("market as of 2024-01-01"));
        assert!(text.contains("rate curve USD-SOFR"));
        assert!(text.contains("vol curve LOGVOL"));
        assert!(text.contains("stock AAPL: 100"));
        assert!(text.contains("bond USD-GOV-2Y: 99.5"));
    }
}
