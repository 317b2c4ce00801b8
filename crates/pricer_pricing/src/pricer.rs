//! Trade valuation dispatch.
//!
//! [`TradePricer`] picks the valuation engine from the trade's variant:
//! analytic trades use their own closed form, lattice trades go through the
//! binomial tree and are scaled by notional and direction here.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::PricingError;
use pricer_models::instruments::{PresentValue, Trade, TradeModel, TreeOption};

use crate::lattice::{BinomialTreePricer, LatticeConfig, LatticeModel, ModelSetup};

/// Values any portfolio trade against a market snapshot.
///
/// Each pricer owns its tree, so worker threads can hold independent
/// instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::TradePricer;
/// use pricer_pricing::lattice::LatticeConfig;
/// use pricer_models::instruments::{Bond, Direction, FixedIncomeParams, Trade};
/// use pricer_core::market_data::{MarketSnapshot, RateCurve};
/// use pricer_core::types::time::Date;
///
/// let as_of = Date::from_ymd(2024, 1, 1).unwrap();
/// let mut curve = RateCurve::new("USD-SOFR");
/// curve.add_rate(as_of, 0.04);
/// let mut market = MarketSnapshot::new(as_of);
/// market.insert_curve(curve).unwrap();
///
/// let params = FixedIncomeParams::new(
///     1e6, 0.03, 0.5, as_of, Date::from_ymd(2026, 1, 1).unwrap(),
///     "USD-GOV-2Y", "USD-SOFR", Direction::Long,
/// ).unwrap();
/// let trade = Trade::from(Bond::new("B1", params));
///
/// let pricer = TradePricer::from_config(LatticeConfig::default());
/// let pv = pricer.price(&market, &trade).unwrap();
/// assert!((pv - 980_101.706_458).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TradePricer<M = LatticeModel> {
    tree: BinomialTreePricer<M>,
}

impl TradePricer<LatticeModel> {
    /// Creates a pricer with a configured tree.
    pub fn from_config(config: LatticeConfig) -> Self {
        Self {
            tree: BinomialTreePricer::from_config(config),
        }
    }
}

impl Default for TradePricer<LatticeModel> {
    fn default() -> Self {
        Self::from_config(LatticeConfig::default())
    }
}

impl<M: ModelSetup> TradePricer<M> {
    /// Creates a pricer around an existing tree.
    pub fn new(tree: BinomialTreePricer<M>) -> Self {
        Self { tree }
    }

    /// Returns the tree used for lattice trades.
    #[inline]
    pub fn tree(&self) -> &BinomialTreePricer<M> {
        &self.tree
    }

    /// Present value of a trade, signed by direction.
    ///
    /// # Errors
    ///
    /// - `PricingError::MarketData` if a curve, vol curve or price is missing
    /// - `PricingError::ModelFailure` if the lattice cannot be built
    pub fn price(&self, market: &MarketSnapshot, trade: &Trade) -> Result<f64, PricingError> {
        match trade {
            Trade::Analytic(analytic) => analytic.present_value(market),
            Trade::Lattice(option) => self.price_lattice(market, option),
        }
    }

    /// Lattice value of an option scaled by notional and direction.
    ///
    /// # Errors
    ///
    /// See [`price`](Self::price).
    pub fn price_lattice(
        &self,
        market: &MarketSnapshot,
        option: &TreeOption,
    ) -> Result<f64, PricingError> {
        let unit = self.tree.price(market, option)?;
        Ok(unit * option.notional() * option.sign())
    }
}
