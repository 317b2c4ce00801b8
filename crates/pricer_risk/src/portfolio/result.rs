//! Per-trade results and portfolio totals.

use pricer_core::types::time::Date;
use pricer_models::instruments::{Trade, TradeModel};

use crate::parallel::parallel_sum;

/// Valuation and risk of one trade.
///
/// A failed trade keeps its identity and carries the error message; its
/// numbers are zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeResult {
    /// Valuation date
    pub value_date: Date,
    /// Trade id
    pub trade_id: String,
    /// Descriptive trade name
    pub trade_name: String,
    /// Present value, signed by direction
    pub pv: f64,
    /// DV01 under the trade's discount curve
    pub dv01: f64,
    /// Vega under the trade's vol curve, 0 for trades without one
    pub vega: f64,
    /// Failure message, if the trade could not be valued
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl TradeResult {
    /// Result of a successful valuation.
    pub fn valued(value_date: Date, trade: &Trade, pv: f64, dv01: f64, vega: f64) -> Self {
        Self {
            value_date,
            trade_id: trade.id().to_string(),
            trade_name: trade.name().to_string(),
            pv,
            dv01,
            vega,
            error: None,
        }
    }

    /// Result of a failed valuation.
    pub fn failed(value_date: Date, trade: &Trade, error: impl Into<String>) -> Self {
        Self {
            value_date,
            trade_id: trade.id().to_string(),
            trade_name: trade.name().to_string(),
            pv: 0.0,
            dv01: 0.0,
            vega: 0.0,
            error: Some(error.into()),
        }
    }

    /// Whether the trade was valued.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Sums over the successfully valued trades of a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioTotals {
    /// Number of trades in the run
    pub trades: usize,
    /// Number of trades that failed
    pub failed: usize,
    /// Total present value
    pub pv: f64,
    /// Total DV01
    pub dv01: f64,
    /// Total vega
    pub vega: f64,
}

impl PortfolioTotals {
    /// Aggregates a run's results.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_risk::portfolio::{PortfolioTotals, TradeResult};
    /// # use pricer_core::types::time::Date;
    /// # let date = Date::from_ymd(2024, 1, 1).unwrap();
    /// # let row = |id: &str, pv: f64, error: Option<&str>| TradeResult {
    /// #     value_date: date, trade_id: id.into(), trade_name: id.into(),
    /// #     pv, dv01: -1.0, vega: 0.0, error: error.map(Into::into),
    /// # };
    ///
    /// let results = vec![row("A", 10.0, None), row("B", 0.0, Some("no curve")), row("C", 5.0, None)];
    /// let totals = PortfolioTotals::from_results(&results);
    ///
    /// assert_eq!(totals.trades, 3);
    /// assert_eq!(totals.failed, 1);
    /// assert_eq!(totals.pv, 15.0);
    /// assert_eq!(totals.dv01, -2.0);
    /// ```
    pub fn from_results(results: &[TradeResult]) -> Self {
        let ok = |r: &TradeResult, value: f64| if r.is_ok() { value } else { 0.0 };
        Self {
            trades: results.len(),
            failed: results.iter().filter(|r| !r.is_ok()).count(),
            pv: parallel_sum(results, |r| ok(r, r.pv)),
            dv01: parallel_sum(results, |r| ok(r, r.dv01)),
            vega: parallel_sum(results, |r| ok(r, r.vega)),
        }
    }
}
