//! Risk engine error types.

use pricer_core::market_data::MarketDataError;
use thiserror::Error;

/// Errors raised while building risk scenarios.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskError {
    /// A configured curve is absent from the base snapshot.
    #[error("Cannot build scenario: {0}")]
    MarketData(#[from] MarketDataError),

    /// Shock size is not a finite, non-zero number.
    #[error("Invalid {name} shock: {value}")]
    InvalidShock {
        /// Which shock (curve, vol or spot)
        name: &'static str,
        /// The rejected size
        value: f64,
    },

    /// Unrecognised risk type label.
    #[error("Unknown risk type: {0}")]
    UnknownRiskType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_curve_display() {
        let err = RiskError::from(MarketDataError::CurveNotFound {
            name: "SGD-SORA".to_string(),
        });
        assert_eq!(
            format!("{}", err),
            "Cannot build scenario: Rate curve not found: SGD-SORA"
        );
    }

    #[test]
    fn test_invalid_shock_display() {
        let err = RiskError::InvalidShock {
            name: "vol",
            value: f64::NAN,
        };
        assert_eq!(format!("{}", err), "Invalid vol shock: NaN");
    }
}
