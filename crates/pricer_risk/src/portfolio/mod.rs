//! Portfolio runs.
//!
//! This module provides:
//! - [`PortfolioRunner`]: values and risks every trade sequentially, on the
//!   rayon pool, or on a [`TaskScheduler`](crate::parallel::TaskScheduler)
//! - [`TradeResult`]: one report row per trade, in portfolio order
//! - [`lattice_pricing_errors`]: tree-versus-closed-form comparison for
//!   European options across step counts

mod cross_check;
mod error;
mod result;
mod runner;

pub use cross_check::{lattice_pricing_errors, LatticeCheck};
pub use error::PortfolioError;
pub use result::{PortfolioTotals, TradeResult};
pub use runner::{ExecutionMode, PortfolioRunner};
