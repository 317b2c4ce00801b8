//! Bump-and-revalue risk scenarios.
//!
//! A [`RiskEngine`] owns a base market snapshot and the shocked copies
//! built from it at construction time:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 RiskEngine                   │
//! ├──────────────────────────────────────────────┤
//! │  base            - unshocked snapshot        │
//! │  curve scenarios - up/down copy per curve    │
//! │  vol scenario    - vol curve shifted up      │
//! │  spot scenario   - every stock price bumped  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Every scenario is an independently owned [`MarketSnapshot`] clone, so
//! no two scenarios share a curve and the base is never mutated.
//!
//! [`MarketSnapshot`]: pricer_core::market_data::MarketSnapshot

mod engine;
mod error;
mod risk_type;
mod shocks;

pub use engine::{CurveScenario, RiskEngine, Scenario, SPOT_SCENARIO_ID};
pub use error::RiskError;
pub use risk_type::RiskType;
pub use shocks::{ShockConfig, DEFAULT_CURVE_SHOCK, DEFAULT_SPOT_SHOCK, DEFAULT_VOL_SHOCK};
