//! Errors surfaced by valuation (`PricingError`) and by date handling
//! (`DateError`).

use thiserror::Error;

use crate::market_data::MarketDataError;

/// Categorised pricing errors.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("negative time to expiry".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: negative time to expiry");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Trade data or parameters that cannot be valued
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A curve, vol curve or price the trade needs is missing
    #[error("Market data: {0}")]
    MarketData(#[from] MarketDataError),

    /// The requested engine cannot value this instrument
    #[error("Unsupported instrument: {0}")]
    UnsupportedInstrument(String),

    /// The model could not be calibrated or evaluated
    #[error("Model failure: {0}")]
    ModelFailure(String),
}

/// Errors from date construction, parsing and arithmetic.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Components that name no calendar day, e.g. February 30th
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Text that is not `YYYY-MM-DD`
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Arithmetic left the supported calendar
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}
