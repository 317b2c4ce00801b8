//! Scenario construction and finite-difference sensitivities.

use std::collections::BTreeMap;

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::PricingError;
use pricer_models::instruments::Trade;
use pricer_pricing::TradePricer;
use tracing::{debug, warn};

use super::error::RiskError;
use super::risk_type::RiskType;
use super::shocks::ShockConfig;
use crate::parallel::parallel_map;

/// Market identifier of the spot scenario.
pub const SPOT_SCENARIO_ID: &str = "PRICE";

/// One shocked copy of the base market.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    id: String,
    market: MarketSnapshot,
}

impl Scenario {
    /// Market identifier the scenario shocks.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Shocked snapshot.
    #[inline]
    pub fn market(&self) -> &MarketSnapshot {
        &self.market
    }
}

/// Up and down copies of the base market for one rate curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveScenario {
    curve: String,
    up: MarketSnapshot,
    down: MarketSnapshot,
}

impl CurveScenario {
    /// Shocked curve name.
    #[inline]
    pub fn curve(&self) -> &str {
        &self.curve
    }

    /// Snapshot with the curve shifted up.
    #[inline]
    pub fn up(&self) -> &MarketSnapshot {
        &self.up
    }

    /// Snapshot with the curve shifted down.
    #[inline]
    pub fn down(&self) -> &MarketSnapshot {
        &self.down
    }
}

/// Bump-and-revalue risk over a fixed set of scenarios.
///
/// All scenarios are built eagerly in [`new`](Self::new). Each is an owned
/// clone of the base, so the engine can be shared read-only between worker
/// threads.
///
/// # Sensitivities
///
/// | Risk type | Scenario            | Value                     | Key          |
/// |-----------|---------------------|---------------------------|--------------|
/// | `Dv01`    | each curve, up/down | `(pv_up - pv_down) / 2`   | curve name   |
/// | `Vega`    | vol curve up        | `pv_up - pv_base`         | vol name     |
/// | `Delta`   | every stock up      | `(pv_up - pv_base) / 2`   | `PRICE`      |
///
/// # Examples
///
/// ```
/// use pricer_risk::scenarios::{RiskEngine, RiskType, ShockConfig};
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
/// let mut engine = RiskEngine::new(market, shocks, TradePricer::default()).unwrap();
///
/// let params = FixedIncomeParams::new(
///     1e6, 0.03, 0.5, as_of, Date::from_ymd(2026, 1, 1).unwrap(),
///     "USD-GOV-2Y", "USD-SOFR", Direction::Long,
/// ).unwrap();
/// let bond = Trade::from(Bond::new("B1", params));
///
/// let risk = engine.compute_risk(RiskType::Dv01, &bond, false).unwrap();
/// assert!(risk["USD-SOFR"] < 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RiskEngine {
    base: MarketSnapshot,
    shocks: ShockConfig,
    curve_scenarios: Vec<CurveScenario>,
    vol_scenario: Option<Scenario>,
    spot_scenario: Scenario,
    pricer: TradePricer,
    results: BTreeMap<String, f64>,
}

impl RiskEngine {
    /// Builds every scenario from the base snapshot.
    ///
    /// A missing vol curve leaves the engine without a vega scenario; vega
    /// is then empty for every trade.
    ///
    /// # Errors
    ///
    /// - `RiskError::InvalidShock` for a zero or non-finite shock
    /// - `RiskError::MarketData` if a configured rate curve is absent
    pub fn new(
        base: MarketSnapshot,
        shocks: ShockConfig,
        pricer: TradePricer,
    ) -> Result<Self, RiskError> {
        shocks.validate()?;

        let mut curve_scenarios = Vec::with_capacity(shocks.curves.len());
        for curve in &shocks.curves {
            let mut up = base.clone();
            up.shock_curve(curve, shocks.curve_shock)?;
            let mut down = base.clone();
            down.shock_curve(curve, -shocks.curve_shock)?;
            debug!(curve = %curve, shock = shocks.curve_shock, "built curve scenario");
            curve_scenarios.push(CurveScenario {
                curve: curve.clone(),
                up,
                down,
            });
        }

        let mut vol_up = base.clone();
        let vol_scenario = match vol_up.shock_vol_curve(&shocks.vol_curve, shocks.vol_shock) {
            Ok(()) => {
                debug!(curve = %shocks.vol_curve, shock = shocks.vol_shock, "built vol scenario");
                Some(Scenario {
                    id: shocks.vol_curve.clone(),
                    market: vol_up,
                })
            }
            Err(err) => {
                warn!(error = %err, "no vega scenario");
                None
            }
        };

        let mut spot_up = base.clone();
        spot_up.shock_all_stock_prices(shocks.spot_shock);
        debug!(shock = shocks.spot_shock, "built spot scenario");

        Ok(Self {
            base,
            shocks,
            curve_scenarios,
            vol_scenario,
            spot_scenario: Scenario {
                id: SPOT_SCENARIO_ID.to_string(),
                market: spot_up,
            },
            pricer,
            results: BTreeMap::new(),
        })
    }

    /// Unshocked snapshot.
    #[inline]
    pub fn base(&self) -> &MarketSnapshot {
        &self.base
    }

    /// Shock sizes the scenarios were built with.
    #[inline]
    pub fn shocks(&self) -> &ShockConfig {
        &self.shocks
    }

    /// Curve scenarios in configuration order.
    #[inline]
    pub fn curve_scenarios(&self) -> &[CurveScenario] {
        &self.curve_scenarios
    }

    /// Vol scenario, if the base carries the configured vol curve.
    #[inline]
    pub fn vol_scenario(&self) -> Option<&Scenario> {
        self.vol_scenario.as_ref()
    }

    /// Spot scenario.
    #[inline]
    pub fn spot_scenario(&self) -> &Scenario {
        &self.spot_scenario
    }

    /// Pricer used for every revaluation.
    #[inline]
    pub fn pricer(&self) -> &TradePricer {
        &self.pricer
    }

    /// Sensitivities from the last [`compute_risk`](Self::compute_risk) call.
    #[inline]
    pub fn results(&self) -> &BTreeMap<String, f64> {
        &self.results
    }

    /// Present value under the base snapshot.
    ///
    /// # Errors
    ///
    /// Propagates the pricer's error.
    pub fn price(&self, trade: &Trade) -> Result<f64, PricingError> {
        self.pricer.price(&self.base, trade)
    }

    /// Computes one risk type and stores it as the latest result.
    ///
    /// Previous results are cleared first, including when pricing fails.
    ///
    /// # Errors
    ///
    /// Propagates the first pricing failure.
    pub fn compute_risk(
        &mut self,
        risk_type: RiskType,
        trade: &Trade,
        parallel: bool,
    ) -> Result<&BTreeMap<String, f64>, PricingError> {
        self.results.clear();
        self.results = self.sensitivities(risk_type, trade, parallel)?;
        Ok(&self.results)
    }

    /// Computes one risk type without touching stored results.
    ///
    /// With `parallel` set, the revaluations of a call run on the rayon
    /// pool. The numbers are identical either way.
    ///
    /// # Errors
    ///
    /// Propagates the first pricing failure.
    pub fn sensitivities(
        &self,
        risk_type: RiskType,
        trade: &Trade,
        parallel: bool,
    ) -> Result<BTreeMap<String, f64>, PricingError> {
        match risk_type {
            RiskType::Dv01 => self.dv01(trade, parallel),
            RiskType::Vega => match &self.vol_scenario {
                Some(scenario) => {
                    let (base, shocked) = self.revalue(scenario.market(), trade, parallel)?;
                    Ok(BTreeMap::from([(scenario.id.clone(), shocked - base)]))
                }
                None => Ok(BTreeMap::new()),
            },
            RiskType::Delta => {
                let scenario = &self.spot_scenario;
                let (base, shocked) = self.revalue(scenario.market(), trade, parallel)?;
                Ok(BTreeMap::from([(
                    scenario.id.clone(),
                    (shocked - base) / 2.0,
                )]))
            }
        }
    }

    fn dv01(&self, trade: &Trade, parallel: bool) -> Result<BTreeMap<String, f64>, PricingError> {
        let bump = |scenario: &CurveScenario| -> Result<(String, f64), PricingError> {
            let up = self.pricer.price(&scenario.up, trade)?;
            let down = self.pricer.price(&scenario.down, trade)?;
            Ok((scenario.curve.clone(), (up - down) / 2.0))
        };
        let entries = if parallel {
            parallel_map(&self.curve_scenarios, bump)
        } else {
            self.curve_scenarios.iter().map(bump).collect()
        };
        entries.into_iter().collect()
    }

    fn revalue(
        &self,
        shocked: &MarketSnapshot,
        trade: &Trade,
        parallel: bool,
    ) -> Result<(f64, f64), PricingError> {
        let (base, up) = if parallel {
            rayon::join(
                || self.pricer.price(&self.base, trade),
                || self.pricer.price(shocked, trade),
            )
        } else {
            (
                self.pricer.price(&self.base, trade),
                self.pricer.price(shocked, trade),
            )
        };
        Ok((base?, up?))
    }
}
