//! Analytical pricing error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors raised when building a closed-form model.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidSpot { spot: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid spot: S = -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticalError {
    /// Spot price is not positive.
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Volatility is negative or not finite.
    #[error("Invalid volatility: sigma = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
