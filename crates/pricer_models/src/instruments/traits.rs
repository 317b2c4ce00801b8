//! Trade capability traits.
//!
//! # Design
//!
//! The trade set is closed, so dispatch goes through the [`Trade`](super::Trade)
//! enum rather than trait objects. The traits here name the three capabilities
//! a trade can have:
//!
//! - [`TradeModel`]: static contractual data and the payoff, for every trade
//! - [`PresentValue`]: closed-form or discounted-cashflow valuation
//! - [`LatticeProduct`]: node-level hooks consumed by a binomial tree
//!
//! Valuation with a lattice lives in `pricer_pricing`; this crate only
//! describes what a trade pays.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::time::Date;
use pricer_core::types::PricingError;

use super::direction::Direction;

/// Contractual data every trade exposes.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{Direction, TradeModel};
///
/// struct Cash {
///     amount: f64,
/// }
///
/// impl TradeModel for Cash {
///     fn id(&self) -> &str { "cash-1" }
///     fn name(&self) -> &str { "long_cash" }
///     fn notional(&self) -> f64 { self.amount }
///     fn direction(&self) -> Direction { Direction::Long }
///     fn underlying(&self) -> &str { "USD" }
///     fn curve_name(&self) -> &str { "USD-SOFR" }
///     fn payoff(&self, _price: f64) -> f64 { self.amount }
/// }
///
/// let cash = Cash { amount: 5.0 };
/// assert_eq!(cash.sign(), 1.0);
/// assert_eq!(cash.vol_name(), None);
/// ```
pub trait TradeModel {
    /// Trade identifier from the trade feed.
    fn id(&self) -> &str;

    /// Descriptive name, e.g. `long_bond_USD-GOV-2Y_3.00%`.
    fn name(&self) -> &str;

    /// Notional amount.
    fn notional(&self) -> f64;

    /// Trade side.
    fn direction(&self) -> Direction;

    /// Instrument code or underlying stock name.
    fn underlying(&self) -> &str;

    /// Discounting curve name.
    fn curve_name(&self) -> &str;

    /// Volatility curve name, if the trade depends on one.
    fn vol_name(&self) -> Option<&str> {
        None
    }

    /// Signed payoff at the given market price, scaled by notional.
    fn payoff(&self, price: f64) -> f64;

    /// +1.0 or -1.0 depending on the trade side.
    #[inline]
    fn sign(&self) -> f64 {
        self.direction().sign()
    }
}

/// Direct valuation against a market snapshot.
pub trait PresentValue {
    /// Present value as of `market.as_of()`, signed by direction.
    ///
    /// # Errors
    /// `PricingError::MarketData` if a curve, vol curve or price is missing.
    fn present_value(&self, market: &MarketSnapshot) -> Result<f64, PricingError>;
}

/// Hooks a binomial tree needs from an option.
///
/// Values are per unit of notional and unsigned; the caller scales the
/// root value by notional and direction.
pub trait LatticeProduct {
    /// Expiry date.
    fn expiry(&self) -> Date;

    /// Intrinsic value per unit at `spot`, used for the leaves.
    fn intrinsic(&self, spot: f64) -> f64;

    /// Value at an interior node.
    ///
    /// # Arguments
    ///
    /// * `spot` - Underlying price at the node
    /// * `time` - Node time in years from the valuation date
    /// * `continuation` - Discounted expected value of the two child nodes
    fn value_at_node(&self, spot: f64, time: f64, continuation: f64) -> f64;
}
