//! Fixed-for-floating interest rate swap.

use pricer_core::market_data::{MarketSnapshot, RateCurve};
use pricer_core::types::time::{Date, DayCountConvention};
use pricer_core::types::PricingError;

use super::direction::Direction;
use super::params::FixedIncomeParams;
use super::traits::{PresentValue, TradeModel};

/// Day count for fixed-leg accruals.
const FIXED_LEG_DAY_COUNT: DayCountConvention = DayCountConvention::Act360;

/// Single-curve fixed-for-floating swap.
///
/// The fixed leg is `fixed_rate * annuity`; the floating leg collapses to
/// `notional * (1 - df(end))` since the same curve projects and discounts.
/// The unsigned value is the receiver's (fixed minus floating); `Pay`
/// negates it.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{Direction, FixedIncomeParams, Swap, TradeModel};
/// use pricer_core::types::time::Date;
///
/// let params = FixedIncomeParams::new(
///     10_000_000.0,
///     0.04,
///     0.5,
///     Date::from_ymd(2024, 1, 1).unwrap(),
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     "USD-SWAP-2Y",
///     "USD-SOFR",
///     Direction::Pay,
/// )
/// .unwrap();
/// let swap = Swap::new("S1", params);
///
/// assert_eq!(swap.name(), "pay_swap_USD-SWAP-2Y_4.00%");
/// // Payoff is measured on the receiver side and flipped for `Pay`
/// assert!((swap.payoff(0.05) - (-100_000.0)).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swap {
    id: String,
    name: String,
    params: FixedIncomeParams,
}

impl Swap {
    /// Creates a swap from validated terms.
    pub fn new(id: impl Into<String>, params: FixedIncomeParams) -> Self {
        let name = format!(
            "{}_swap_{}_{:.2}%",
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

    /// Returns the fixed rate.
    #[inline]
    pub fn fixed_rate(&self) -> f64 {
        self.params.rate()
    }

    /// Present value of one unit of rate paid on the live fixed schedule,
    /// scaled by notional: Σ τᵢ · dfᵢ · N.
    ///
    /// # Errors
    /// `PricingError::MarketData` if the discounting curve is missing.
    pub fn annuity(&self, market: &MarketSnapshot) -> Result<f64, PricingError> {
        let curve = market.curve(self.curve_name())?;
        Ok(self.annuity_on(curve, market.as_of()))
    }

    fn annuity_on(&self, curve: &RateCurve, value_date: Date) -> f64 {
        let unit: f64 = self
            .params
            .schedule()
            .live_periods(value_date)
            .map(|p| {
                p.year_fraction(FIXED_LEG_DAY_COUNT) * curve.discount_factor(p.payment(), value_date)
            })
            .sum();
        unit * self.notional()
    }

    /// Fixed leg value, unsigned.
    ///
    /// # Errors
    /// `PricingError::MarketData` if the discounting curve is missing.
    pub fn fixed_leg(&self, market: &MarketSnapshot) -> Result<f64, PricingError> {
        Ok(self.fixed_rate() * self.annuity(market)?)
    }

    /// Floating leg value, unsigned: N · (1 - df(end)).
    ///
    /// # Errors
    /// `PricingError::MarketData` if the discounting curve is missing.
    pub fn floating_leg(&self, market: &MarketSnapshot) -> Result<f64, PricingError> {
        let curve = market.curve(self.curve_name())?;
        let end = self.params.schedule().end();
        Ok(self.notional() * (1.0 - curve.discount_factor(end, market.as_of())))
    }
}

impl TradeModel for Swap {
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
        self.sign() * (price - self.fixed_rate()) * self.notional()
    }
}

impl PresentValue for Swap {
    fn present_value(&self, market: &MarketSnapshot) -> Result<f64, PricingError> {
        let curve = market.curve(self.curve_name())?;
        let value_date = market.as_of();
        let fixed = self.fixed_rate() * self.annuity_on(curve, value_date);
        let end = self.params.schedule().end();
        let floating = self.notional() * (1.0 - curve.discount_factor(end, value_date));
        Ok(self.sign() * (fixed - floating))
    }
}
