//! Trade definitions.
//!
//! This module provides the trades of a portfolio and the closed enum
//! that dispatches over them.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects):
//! - [`Trade`] separates [`AnalyticTrade`]s, valued directly against a
//!   market snapshot, from lattice trades ([`TreeOption`]) that need a tree
//! - The category is fixed when a trade is built, so pricing picks the
//!   engine with a `match` on the tag
//!
//! # Trade Types
//!
//! - [`Bond`]: Fixed-coupon bullet bond
//! - [`Swap`]: Single-curve fixed-for-floating swap
//! - [`BlackOption`]: Closed-form European call/put (lattice cross-check)
//! - [`TreeOption`]: European/American vanilla or call spread on a lattice
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{
//!     Bond, Direction, FixedIncomeParams, PresentValue, Trade, TradeModel,
//! };
//! use pricer_core::market_data::{MarketSnapshot, RateCurve};
//! use pricer_core::types::time::Date;
//!
//! let as_of = Date::from_ymd(2024, 1, 1).unwrap();
//! let params = FixedIncomeParams::new(
//!     100.0,
//!     0.0,
//!     1.0,
//!     as_of,
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     "USD-ZERO-1Y",
//!     "USD-SOFR",
//!     Direction::Long,
//! )
//! .unwrap();
//! let trade = Trade::from(Bond::new("Z1", params));
//!
//! let mut curve = RateCurve::new("USD-SOFR");
//! curve.add_rate(as_of, 0.0);
//! let mut market = MarketSnapshot::new(as_of);
//! market.insert_curve(curve).unwrap();
//!
//! // Zero-coupon bond under a zero curve is worth its face
//! let pv = trade.as_analytic().unwrap().present_value(&market).unwrap();
//! assert!((pv - 100.0).abs() < 1e-12);
//! assert!(!trade.is_lattice());
//! ```

mod black;
mod bond;
mod direction;
mod error;
mod exercise;
mod params;
mod payoff;
mod swap;
mod traits;
mod tree_option;

pub use black::{BlackOption, BLACK_ID_SUFFIX};
pub use bond::{Bond, BOND_TRADE_PRICE};
pub use direction::Direction;
pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use params::{resolve_discount_curve, FixedIncomeParams, OptionParams};
pub use payoff::{OptionType, Payoff};
pub use swap::Swap;
pub use traits::{LatticeProduct, PresentValue, TradeModel};
pub use tree_option::TreeOption;

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::PricingError;

/// Trades valued directly against a market snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalyticTrade {
    /// Fixed-coupon bond
    Bond(Bond),
    /// Interest rate swap
    Swap(Swap),
    /// Closed-form European option
    Black(BlackOption),
}

/// Delegates a `TradeModel` method to whichever variant is held.
macro_rules! delegate_analytic {
    ($self:ident, $trade:ident => $body:expr) => {
        match $self {
            AnalyticTrade::Bond($trade) => $body,
            AnalyticTrade::Swap($trade) => $body,
            AnalyticTrade::Black($trade) => $body,
        }
    };
}

impl TradeModel for AnalyticTrade {
    fn id(&self) -> &str {
        delegate_analytic!(self, t => t.id())
    }

    fn name(&self) -> &str {
        delegate_analytic!(self, t => t.name())
    }

    fn notional(&self) -> f64 {
        delegate_analytic!(self, t => t.notional())
    }

    fn direction(&self) -> Direction {
        delegate_analytic!(self, t => t.direction())
    }

    fn underlying(&self) -> &str {
        delegate_analytic!(self, t => t.underlying())
    }

    fn curve_name(&self) -> &str {
        delegate_analytic!(self, t => t.curve_name())
    }

    fn vol_name(&self) -> Option<&str> {
        delegate_analytic!(self, t => t.vol_name())
    }

    fn payoff(&self, price: f64) -> f64 {
        delegate_analytic!(self, t => t.payoff(price))
    }
}

impl PresentValue for AnalyticTrade {
    fn present_value(&self, market: &MarketSnapshot) -> Result<f64, PricingError> {
        delegate_analytic!(self, t => t.present_value(market))
    }
}

/// A portfolio trade, tagged by valuation style.
///
/// # Variants
/// - `Analytic`: Valued by [`PresentValue`]
/// - `Lattice`: Valued by a binomial tree through [`LatticeProduct`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trade {
    /// Closed-form or cashflow trade
    Analytic(AnalyticTrade),
    /// Binomial-tree option
    Lattice(TreeOption),
}

impl Trade {
    /// Returns whether the trade needs a lattice.
    #[inline]
    pub fn is_lattice(&self) -> bool {
        matches!(self, Trade::Lattice(_))
    }

    /// Returns the analytic trade, if any.
    pub fn as_analytic(&self) -> Option<&AnalyticTrade> {
        match self {
            Trade::Analytic(trade) => Some(trade),
            Trade::Lattice(_) => None,
        }
    }

    /// Returns the lattice option, if any.
    pub fn as_lattice(&self) -> Option<&TreeOption> {
        match self {
            Trade::Lattice(option) => Some(option),
            Trade::Analytic(_) => None,
        }
    }
}

macro_rules! delegate_trade {
    ($self:ident, $trade:ident => $body:expr) => {
        match $self {
            Trade::Analytic($trade) => $body,
            Trade::Lattice($trade) => $body,
        }
    };
}

impl TradeModel for Trade {
    fn id(&self) -> &str {
        delegate_trade!(self, t => t.id())
    }

    fn name(&self) -> &str {
        delegate_trade!(self, t => t.name())
    }

    fn notional(&self) -> f64 {
        delegate_trade!(self, t => t.notional())
    }

    fn direction(&self) -> Direction {
        delegate_trade!(self, t => t.direction())
    }

    fn underlying(&self) -> &str {
        delegate_trade!(self, t => t.underlying())
    }

    fn curve_name(&self) -> &str {
        delegate_trade!(self, t => t.curve_name())
    }

    fn vol_name(&self) -> Option<&str> {
        delegate_trade!(self, t => t.vol_name())
    }

    fn payoff(&self, price: f64) -> f64 {
        delegate_trade!(self, t => t.payoff(price))
    }
}

impl From<Bond> for Trade {
    fn from(bond: Bond) -> Self {
        Trade::Analytic(AnalyticTrade::Bond(bond))
    }
}

impl From<Swap> for Trade {
    fn from(swap: Swap) -> Self {
        Trade::Analytic(AnalyticTrade::Swap(swap))
    }
}

impl From<BlackOption> for Trade {
    fn from(option: BlackOption) -> Self {
        Trade::Analytic(AnalyticTrade::Black(option))
    }
}

impl From<TreeOption> for Trade {
    fn from(option: TreeOption) -> Self {
        Trade::Lattice(option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::time::Date;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn option_params() -> OptionParams {
        OptionParams::new(
            1.0,
            date(2025, 6, 30),
            "AAPL",
            "USD-SOFR",
            "LOGVOL",
            Direction::Long,
        )
        .unwrap()
    }

    #[test]
    fn test_category_is_fixed_by_variant() {
        let lattice: Trade = TreeOption::new(
            "E1",
            Payoff::vanilla(OptionType::Call, 100.0).unwrap(),
            ExerciseStyle::European,
            option_params(),
        )
        .into();
        let black: Trade =
            BlackOption::new("E1_Black_price", OptionType::Call, 100.0, option_params())
                .unwrap()
                .into();

        assert!(lattice.is_lattice());
        assert!(lattice.as_analytic().is_none());
        assert!(black.as_lattice().is_none());
        assert_eq!(black.id(), "E1_Black_price");
    }

    #[test]
    fn test_trade_delegates_metadata() {
        let params = FixedIncomeParams::new(
            5e6,
            0.02,
            0.25,
            date(2024, 3, 1),
            date(2027, 3, 1),
            "SGD-SWAP-3Y",
            "SGD-SORA",
            Direction::Pay,
        )
        .unwrap();
        let trade: Trade = Swap::new("S9", params).into();

        assert_eq!(trade.id(), "S9");
        assert_eq!(trade.notional(), 5e6);
        assert_eq!(trade.sign(), -1.0);
        assert_eq!(trade.curve_name(), "SGD-SORA");
        assert_eq!(trade.vol_name(), None);
        assert_eq!(trade.underlying(), "SGD-SWAP-3Y");
    }
}
