//! # pricer_core: Market Foundation for Portfolio Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricer workspace, providing:
//! - Calendar arithmetic: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `PricingError`, `DateError` (`types::error`)
//! - Linear interpolation helpers (`math::interpolators`)
//! - Term structures: `RateCurve`, `VolCurve` (`market_data::curves`)
//! - The scenario-copyable `MarketSnapshot` (`market_data::snapshot`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Generic interpolation arithmetic
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::{MarketSnapshot, RateCurve};
//! use pricer_core::types::Date;
//!
//! let as_of = Date::from_ymd(2024, 1, 1).unwrap();
//! let mut curve = RateCurve::new("USD-SOFR");
//! curve.add_rate(as_of.add_days(365).unwrap(), 0.04);
//!
//! let mut market = MarketSnapshot::new(as_of);
//! market.insert_curve(curve).unwrap();
//!
//! let df = market
//!     .curve("USD-SOFR")
//!     .unwrap()
//!     .discount_factor(as_of.add_days(365).unwrap(), as_of);
//! assert!((df - (-0.04_f64).exp()).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for dates, curves and snapshots

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
