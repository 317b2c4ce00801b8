//! # Pricer Pricing (Layer 3: Valuation Engines)
//!
//! Binomial lattice pricing and the per-trade valuation dispatch.
//!
//! This crate provides:
//! - [`lattice`]: calibration strategies (basic, CRR, Jarrow-Rudd) and the
//!   [`BinomialTreePricer`](lattice::BinomialTreePricer) backward induction
//! - [`TradePricer`]: routes analytic trades to their closed form and lattice
//!   trades to the tree, applying notional and direction to tree values
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::lattice::{BinomialTreePricer, CrrModel};
//! use pricer_models::instruments::{
//!     Direction, ExerciseStyle, OptionParams, OptionType, Payoff, TreeOption,
//! };
//! use pricer_core::types::time::Date;
//!
//! let params = OptionParams::new(
//!     1.0,
//!     Date::from_ymd(2026, 1, 1).unwrap(),
//!     "AAPL",
//!     "USD-SOFR",
//!     "LOGVOL",
//!     Direction::Long,
//! )
//! .unwrap();
//! let put = TreeOption::new(
//!     "A1",
//!     Payoff::vanilla(OptionType::Put, 100.0).unwrap(),
//!     ExerciseStyle::American,
//!     params,
//! );
//!
//! let tree = BinomialTreePricer::new(CrrModel, 200).unwrap();
//! let value = tree.price_product(&put, 100.0, 0.2, 0.045, 1.0).unwrap();
//! assert!(value > 5.78); // above the European put
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lattice;
pub mod pricer;

pub use pricer::TradePricer;
