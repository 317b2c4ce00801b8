//! # Pricer Risk (L4: Application)
//!
//! Bump-and-revalue sensitivities and portfolio execution.
//!
//! This crate provides:
//! - Scenario construction and DV01/vega/delta by finite differences
//! - A fixed-size worker pool with a task-group barrier
//! - Rayon helpers for data-parallel revaluation
//! - Portfolio runs producing one index-ordered result per trade
//! - A tree-versus-closed-form check for European options
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  scenarios/  - RiskEngine, RiskType,    │
//! │               ShockConfig               │
//! │  parallel/   - TaskScheduler, TaskGroup │
//! │               rayon utilities           │
//! │  portfolio/  - PortfolioRunner,         │
//! │               TradeResult, checks       │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  Binomial lattice and trade dispatch    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! The base snapshot and every scenario are owned by the [`RiskEngine`] and
//! only read after construction. Worker tasks share the engine behind an
//! `Arc`; no task mutates a curve another task can see.
//!
//! ## Example
//!
//! ```
//! use pricer_risk::{RiskEngine, RiskType, ShockConfig};
//! use pricer_pricing::TradePricer;
//! use pricer_models::instruments::{Direction, FixedIncomeParams, Swap, Trade};
//! use pricer_core::market_data::{MarketSnapshot, RateCurve};
//! use pricer_core::types::time::Date;
//!
//! let as_of = Date::from_ymd(2024, 1, 1).unwrap();
//! let mut curve = RateCurve::new("USD-SOFR");
//! curve.add_rate(as_of, 0.04);
//! let mut market = MarketSnapshot::new(as_of);
//! market.insert_curve(curve).unwrap();
//!
//! let engine = RiskEngine::new(
//!     market,
//!     ShockConfig::default().with_curves(["USD-SOFR"]),
//!     TradePricer::default(),
//! )
//! .unwrap();
//!
//! let params = FixedIncomeParams::new(
//!     10e6, 0.04, 0.5, as_of, Date::from_ymd(2026, 1, 1).unwrap(),
//!     "USD-SWAP-2Y", "USD-SOFR", Direction::Pay,
//! )
//! .unwrap();
//! let swap = Trade::from(Swap::new("S1", params));
//!
//! // Paying fixed gains when rates rise
//! let dv01 = engine.sensitivities(RiskType::Dv01, &swap, false).unwrap();
//! assert!(dv01["USD-SOFR"] > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod parallel;
pub mod portfolio;
pub mod scenarios;

// Re-export commonly used types
pub use parallel::{SchedulerError, TaskGroup, TaskScheduler};
pub use portfolio::{ExecutionMode, PortfolioError, PortfolioRunner, PortfolioTotals, TradeResult};
pub use scenarios::{RiskEngine, RiskError, RiskType, ShockConfig};
