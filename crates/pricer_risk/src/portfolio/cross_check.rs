//! Lattice convergence check against the closed-form companions.

use std::collections::HashMap;

use pricer_core::market_data::MarketSnapshot;
use pricer_models::instruments::{
    AnalyticTrade, ExerciseStyle, PresentValue, Trade, TradeModel, BLACK_ID_SUFFIX,
};
use pricer_pricing::lattice::{BinomialTreePricer, LatticeModel};
use pricer_pricing::TradePricer;
use tracing::warn;

use super::error::PortfolioError;

/// Tree value of one European option at one step count, next to its
/// closed-form value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeCheck {
    /// Lattice trade id
    pub trade_id: String,
    /// Tree step count
    pub steps: usize,
    /// Tree present value
    pub tree_pv: f64,
    /// Closed-form present value
    pub closed_form_pv: f64,
    /// `|tree_pv - closed_form_pv|`
    pub abs_error: f64,
}

/// Compares every European lattice option with its Black companion.
///
/// The companion is the analytic trade whose id is the option's id plus
/// [`BLACK_ID_SUFFIX`]. Options without one are skipped, as are options
/// that fail to price (logged).
///
/// # Errors
///
/// `PortfolioError::Lattice` if a step count is out of range.
pub fn lattice_pricing_errors(
    market: &MarketSnapshot,
    trades: &[Trade],
    model: LatticeModel,
    steps: &[usize],
) -> Result<Vec<LatticeCheck>, PortfolioError> {
    let pricers = steps
        .iter()
        .map(|&n| -> Result<_, PortfolioError> {
            Ok((n, TradePricer::new(BinomialTreePricer::new(model, n)?)))
        })
        .collect::<Result<Vec<_>, PortfolioError>>()?;

    let companions: HashMap<&str, &AnalyticTrade> = trades
        .iter()
        .filter_map(Trade::as_analytic)
        .filter(|trade| matches!(trade, AnalyticTrade::Black(_)))
        .map(|trade| (trade.id(), trade))
        .collect();

    let mut checks = Vec::new();
    for option in trades.iter().filter_map(Trade::as_lattice) {
        if option.exercise() != ExerciseStyle::European {
            continue;
        }
        let key = format!("{}{}", option.id(), BLACK_ID_SUFFIX);
        let Some(black) = companions.get(key.as_str()) else {
            continue;
        };
        let closed_form_pv = match black.present_value(market) {
            Ok(pv) => pv,
            Err(err) => {
                warn!(trade = black.id(), error = %err, "closed-form check skipped");
                continue;
            }
        };
        for (n, pricer) in &pricers {
            match pricer.price_lattice(market, option) {
                Ok(tree_pv) => checks.push(LatticeCheck {
                    trade_id: option.id().to_string(),
                    steps: *n,
                    tree_pv,
                    closed_form_pv,
                    abs_error: (tree_pv - closed_form_pv).abs(),
                }),
                Err(err) => {
                    warn!(trade = option.id(), steps = *n, error = %err, "lattice check failed")
                }
            }
        }
    }
    Ok(checks)
}
