//! Market data structures for portfolio pricing.
//!
//! This module provides tenor-based term structures and the snapshot that
//! groups them with reference prices.
//!
//! # Components
//!
//! - [`curves`]: `RateCurve`, `VolCurve` and well-known curve names
//! - [`snapshot`]: `MarketSnapshot`, the deep-copyable container used for scenarios
//! - [`error`]: Market data error types (`MarketDataError`)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{MarketSnapshot, VolCurve};
//! use pricer_core::types::Date;
//!
//! let as_of = Date::from_ymd(2024, 1, 1).unwrap();
//! let mut vol = VolCurve::new("LOGVOL");
//! vol.add_vol(as_of.add_months(6).unwrap(), 0.2);
//!
//! let mut market = MarketSnapshot::new(as_of);
//! market.insert_vol_curve(vol).unwrap();
//! assert_eq!(market.vol_curve("LOGVOL").unwrap().vol(as_of), 0.2);
//! ```

pub mod curves;
pub mod error;
pub mod snapshot;

// Re-export commonly used types
pub use curves::{RateCurve, VolCurve};
pub use error::MarketDataError;
pub use snapshot::MarketSnapshot;
