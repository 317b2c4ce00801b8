//! Fixed-coupon bond.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::time::Date;
use pricer_core::types::PricingError;

use super::direction::Direction;
use super::params::FixedIncomeParams;
use super::traits::{PresentValue, TradeModel};

/// Reference price (per 100 face) against which the bond payoff is measured.
pub const BOND_TRADE_PRICE: f64 = 100.0;

/// Fixed-coupon bullet bond.
///
/// Pays `rate * frequency * 100` per 100 face on every schedule date after
/// the accrual start, plus the principal at maturity. Cashflows paying
/// before the valuation date are dropped.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{Bond, Direction, FixedIncomeParams, TradeModel};
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
/// let bond = Bond::new("T1", params);
///
/// assert_eq!(bond.name(), "long_bond_USD-GOV-2Y_3.00%");
/// assert_eq!(bond.coupon(), 1.5);
/// // Clean price of 101 is a gain of 1% of notional
/// assert!((bond.payoff(101.0) - 10_000.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bond {
    id: String,
    name: String,
    params: FixedIncomeParams,
}

impl Bond {
    /// Creates a bond from validated terms.
    pub fn new(id: impl Into<String>, params: FixedIncomeParams) -> Self {
        let name = format!(
            "{}_bond_{}_{:.2}%",
            params.direction(),
            params.underlying(),
            params.rate() * 100.0
        );
        Self {
            id: id.into(),
            name,
            params,
        }
    }

    /// Returns the contractual terms.
    #[inline]
    pub fn params(&self) -> &FixedIncomeParams {
        &self.params
    }

    /// Coupon paid per 100 face each period.
    #[inline]
    pub fn coupon(&self) -> f64 {
        self.params.rate() * self.params.frequency() * 100.0
    }

    /// Live cashflows per 100 face as `(payment date, amount)`.
    ///
    /// The maturity flow combines the last coupon and the principal.
    pub fn cashflows(&self, value_date: Date) -> Vec<(Date, f64)> {
        let end = self.params.schedule().end();
        self.params
            .schedule()
            .live_periods(value_date)
            .map(|period| {
                let amount = if period.payment() == end {
                    self.coupon() + 100.0
                } else {
                    self.coupon()
                };
                (period.payment(), amount)
            })
            .collect()
    }
}

impl TradeModel for Bond {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn notional(&self) -> f64 {
        self.params.notional()
    }

    fn direction(&self) -> Direction {
        self.params.direction()
    }

    fn underlying(&self) -> &str {
        self.params.underlying()
    }

    fn curve_name(&self) -> &str {
        self.params.curve_name()
    }

    fn payoff(&self, price: f64) -> f64 {
        self.sign() * self.notional() * (price - BOND_TRADE_PRICE) / 100.0
    }
}

impl PresentValue for Bond {
    fn present_value(&self, market: &MarketSnapshot) -> Result<f64, PricingError> {
        let value_date = market.as_of();
        let curve = market.curve(self.curve_name())?;
        let per_hundred: f64 = self
            .cashflows(value_date)
            .into_iter()
            .map(|(date, amount)| amount * curve.discount_factor(date, value_date))
            .sum();
        Ok(self.sign() * self.notional() * per_hundred / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::names::USD_SOFR;
    use pricer_core::market_data::{MarketDataError, RateCurve};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn bond(direction: Direction) -> Bond {
        let params = FixedIncomeParams::new(
            1_000_000.0,
            0.03,
            0.5,
            date(2024, 1, 1),
            date(2026, 1, 1),
            "USD-GOV-2Y",
            USD_SOFR,
            direction,
        )
        .unwrap();
        Bond::new("B1", params)
    }

    fn flat_market(as_of: Date, rate: f64) -> MarketSnapshot {
        let mut curve = RateCurve::new(USD_SOFR);
        curve.add_rate(as_of, rate);
        let mut market = MarketSnapshot::new(as_of);
        market.insert_curve(curve).unwrap();
        market
    }

    // ========================================
    // Cashflows
    // ========================================

    #[test]
    fn test_cashflows_from_accrual_start() {
        let flows = bond(Direction::Long).cashflows(date(2024, 1, 1));
        let days: Vec<i64> = flows.iter().map(|(d, _)| *d - date(2024, 1, 1)).collect();
        assert_eq!(days, vec![182, 366, 547, 731]);
        assert_eq!(flows[3].1, 101.5);
    }

    #[test]
    fn test_past_coupons_dropped() {
        let flows = bond(Direction::Long).cashflows(date(2025, 3, 1));
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].0, date(2025, 7, 1));
    }

    // ========================================
    // Valuation
    // ========================================

    #[test]
    fn test_present_value_matches_hand_formula() {
        let as_of = date(2024, 1, 1);
        let market = flat_market(as_of, 0.04);
        let df = |days: f64| (-0.04 * days / 365.0).exp();
        let expected = 10_000.0 * (1.5 * (df(182.0) + df(366.0) + df(547.0)) + 101.5 * df(731.0));

        let pv = bond(Direction::Long).present_value(&market).unwrap();
        assert_relative_eq!(pv, expected, epsilon = 1e-6);
        assert_relative_eq!(pv, 980_101.706_458, epsilon = 1e-5);
    }

    #[test]
    fn test_short_flips_sign() {
        let market = flat_market(date(2024, 1, 1), 0.04);
        let long = bond(Direction::Long).present_value(&market).unwrap();
        let short = bond(Direction::Short).present_value(&market).unwrap();
        assert_relative_eq!(long, -short);
    }

    #[test]
    fn test_missing_curve() {
        let market = MarketSnapshot::new(date(2024, 1, 1));
        assert_eq!(
            bond(Direction::Long).present_value(&market),
            Err(PricingError::MarketData(MarketDataError::CurveNotFound {
                name: USD_SOFR.to_string()
            }))
        );
    }
}
