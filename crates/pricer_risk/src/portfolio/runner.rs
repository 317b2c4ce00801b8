//! Portfolio valuation across execution substrates.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use pricer_models::instruments::{Trade, TradeModel};
use tracing::{debug, info, warn};

use super::error::PortfolioError;
use super::result::TradeResult;
use crate::parallel::{parallel_map, TaskGroup, TaskScheduler};
use crate::scenarios::{RiskEngine, RiskType};

/// Where the per-trade work runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One trade after another on the calling thread
    #[default]
    Sequential,
    /// Global rayon pool
    Rayon,
    /// Dedicated [`TaskScheduler`] with this many workers
    Scheduler {
        /// Worker thread count
        workers: usize,
    },
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => f.write_str("sequential"),
            ExecutionMode::Rayon => f.write_str("rayon"),
            ExecutionMode::Scheduler { workers } => write!(f, "scheduler({})", workers),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    /// Parses `sequential`, `rayon` or `scheduler`; the scheduler gets one
    /// worker per available core.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "rayon" => Ok(ExecutionMode::Rayon),
            "scheduler" => Ok(ExecutionMode::Scheduler {
                workers: default_workers(),
            }),
            other => Err(format!("unknown execution mode: {}", other)),
        }
    }
}

/// Worker count matching the machine's available parallelism.
pub(crate) fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Values and risks a list of trades against one [`RiskEngine`].
///
/// For every trade the runner computes the base PV, DV01 under the trade's
/// own discount curve, and vega under its vol curve. A trade that fails is
/// logged and reported as failed; the rest of the run continues.
///
/// Results are index-aligned with the input regardless of the order in
/// which workers finish.
///
/// # Examples
///
/// ```
/// use pricer_risk::portfolio::{ExecutionMode, PortfolioRunner};
/// use pricer_risk::scenarios::{RiskEngine, ShockConfig};
/// use pricer_pricing::TradePricer;
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
/// let shocks = ShockConfig::default().with_curves(["USD-SOFR"]);
/// let engine = RiskEngine::new(market, shocks, TradePricer::default()).unwrap();
/// let runner = PortfolioRunner::new(engine, ExecutionMode::Scheduler { workers: 2 });
///
/// let bond = |id: &str, direction| {
///     let params = FixedIncomeParams::new(
///         1e6, 0.03, 0.5, as_of, Date::from_ymd(2026, 1, 1).unwrap(),
///         "USD-GOV-2Y", "USD-SOFR", direction,
///     ).unwrap();
///     Trade::from(Bond::new(id, params))
/// };
/// let results = runner.run(&[bond("L", Direction::Long), bond("S", Direction::Short)]).unwrap();
///
/// assert_eq!(results[0].trade_id, "L");
/// assert!(results[0].dv01 < 0.0);
/// assert!((results[0].pv + results[1].pv).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct PortfolioRunner {
    engine: Arc<RiskEngine>,
    mode: ExecutionMode,
    parallel_risk: bool,
}

impl PortfolioRunner {
    /// Creates a runner. Scenario revaluations inside a trade run
    /// sequentially unless [`with_parallel_risk`](Self::with_parallel_risk)
    /// is set.
    pub fn new(engine: RiskEngine, mode: ExecutionMode) -> Self {
        Self {
            engine: Arc::new(engine),
            mode,
            parallel_risk: false,
        }
    }

    /// Runs scenario revaluations of each trade on the rayon pool.
    pub fn with_parallel_risk(mut self, parallel: bool) -> Self {
        self.parallel_risk = parallel;
        self
    }

    /// Risk engine shared by every task.
    #[inline]
    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Execution substrate.
    #[inline]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Values one trade.
    pub fn evaluate(&self, trade: &Trade) -> TradeResult {
        evaluate(&self.engine, trade, self.parallel_risk)
    }

    /// Values every trade, in input order.
    ///
    /// # Errors
    ///
    /// `PortfolioError::Scheduler` if the worker pool cannot be started or
    /// rejects a task. Individual trade failures are not errors.
    pub fn run(&self, trades: &[Trade]) -> Result<Vec<TradeResult>, PortfolioError> {
        info!(trades = trades.len(), mode = %self.mode, "pricing portfolio");
        let results = match self.mode {
            ExecutionMode::Sequential => trades.iter().map(|t| self.evaluate(t)).collect(),
            ExecutionMode::Rayon => parallel_map(trades, |t| self.evaluate(t)),
            ExecutionMode::Scheduler { workers } => self.run_scheduled(trades, workers)?,
        };

        let failed = results.iter().filter(|r| !r.is_ok()).count();
        info!(
            trades = results.len(),
            failed,
            "portfolio priced"
        );
        Ok(results)
    }

    fn run_scheduled(
        &self,
        trades: &[Trade],
        workers: usize,
    ) -> Result<Vec<TradeResult>, PortfolioError> {
        let mut scheduler = TaskScheduler::new(workers)?;
        let group = TaskGroup::new();
        let slots: Arc<Mutex<Vec<Option<TradeResult>>>> =
            Arc::new(Mutex::new(vec![None; trades.len()]));

        for (index, trade) in trades.iter().enumerate() {
            let engine = Arc::clone(&self.engine);
            let slots = Arc::clone(&slots);
            let trade = trade.clone();
            let parallel = self.parallel_risk;
            group.spawn(&scheduler, move || {
                let result = evaluate(&engine, &trade, parallel);
                slots.lock()[index] = Some(result);
            })?;
        }
        group.wait();
        scheduler.shutdown();

        let filled = std::mem::take(&mut *slots.lock());
        let value_date = self.engine.base().as_of();
        Ok(filled
            .into_iter()
            .zip(trades)
            .map(|(slot, trade)| {
                slot.unwrap_or_else(|| TradeResult::failed(value_date, trade, "task panicked"))
            })
            .collect())
    }
}

fn evaluate(engine: &RiskEngine, trade: &Trade, parallel: bool) -> TradeResult {
    let value_date = engine.base().as_of();
    let outcome = engine.price(trade).and_then(|pv| {
        let dv01 = engine
            .sensitivities(RiskType::Dv01, trade, parallel)?
            .get(trade.curve_name())
            .copied()
            .unwrap_or(0.0);
        let vega = match trade.vol_name() {
            Some(vol) => engine
                .sensitivities(RiskType::Vega, trade, parallel)?
                .get(vol)
                .copied()
                .unwrap_or(0.0),
            None => 0.0,
        };
        Ok((pv, dv01, vega))
    });

    match outcome {
        Ok((pv, dv01, vega)) => {
            debug!(trade = trade.id(), pv, dv01, vega, "trade priced");
            TradeResult::valued(value_date, trade, pv, dv01, vega)
        }
        Err(err) => {
            warn!(trade = trade.id(), error = %err, "trade failed");
            TradeResult::failed(value_date, trade, err.to_string())
        }
    }
}
