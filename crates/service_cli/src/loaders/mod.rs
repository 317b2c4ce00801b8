//! Readers for the plain-text market and trade files.
//!
//! - [`market`]: rate curves, the volatility curve and reference prices
//! - [`trades`]: the `;`-delimited trade blotter

pub mod market;
pub mod trades;

pub use market::load_market;
pub use trades::load_trades;
