//! Error types for the pricer CLI.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::DateError;
use pricer_models::instruments::InstrumentError;
use pricer_pricing::lattice::LatticeError;
use pricer_risk::{PortfolioError, RiskError};
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed market or trade input
    #[error("Load error: {0}")]
    Load(String),

    /// Input file missing
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON write error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input that parsed but cannot be used
    #[error("Validation error: {0}")]
    Validation(String),

    /// Scenario construction failed
    #[error("Risk error: {0}")]
    Risk(#[from] RiskError),

    /// Portfolio run failed
    #[error("Portfolio error: {0}")]
    Portfolio(#[from] PortfolioError),

    /// Invalid lattice settings
    #[error("Lattice error: {0}")]
    Lattice(#[from] LatticeError),
}

impl CliError {
    /// Create a load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<MarketDataError> for CliError {
    fn from(err: MarketDataError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<InstrumentError> for CliError {
    fn from(err: InstrumentError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<DateError> for CliError {
    fn from(err: DateError) -> Self {
        Self::Load(err.to_string())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::load("bad tenor '4M'");
        assert_eq!(err.to_string(), "Load error: bad tenor '4M'");
    }

    #[test]
    fn test_config_error_converts() {
        let err: CliError = ConfigError::Validation(vec!["steps must be positive".into()]).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("steps must be positive"));
    }

    #[test]
    fn test_market_data_error_is_validation() {
        let err: CliError = MarketDataError::CurveNotFound {
            name: "EUR-ESTR".into(),
        }
        .into();
        assert!(matches!(err, CliError::Validation(_)));
    }
}
