//! Market data error types.
//!
//! This module provides structured error handling for lookups against a
//! [`MarketSnapshot`](crate::market_data::MarketSnapshot).

use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `CurveNotFound`: No rate curve registered under the name
/// - `VolCurveNotFound`: No volatility curve registered under the name
/// - `PriceNotFound`: No stock or bond reference price registered under the name
/// - `EmptyCurve`: A curve without any tenor was offered to the snapshot
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::CurveNotFound { name: "SGD-SORA".to_string() };
/// assert_eq!(format!("{}", err), "Rate curve not found: SGD-SORA");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// Missing rate curve.
    #[error("Rate curve not found: {name}")]
    CurveNotFound {
        /// The requested curve name
        name: String,
    },

    /// Missing volatility curve.
    #[error("Volatility curve not found: {name}")]
    VolCurveNotFound {
        /// The requested curve name
        name: String,
    },

    /// Missing reference price.
    #[error("Reference price not found: {name}")]
    PriceNotFound {
        /// The requested instrument name
        name: String,
    },

    /// Curve has no tenor points.
    #[error("Curve '{name}' has no tenor points")]
    EmptyCurve {
        /// The offending curve name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vol_curve_not_found_display() {
        let err = MarketDataError::VolCurveNotFound {
            name: "LOGVOL".to_string(),
        };
        assert_eq!(format!("{}", err), "Volatility curve not found: LOGVOL");
    }

    #[test]
    fn test_price_not_found_display() {
        let err = MarketDataError::PriceNotFound {
            name: "AAPL".to_string(),
        };
        assert_eq!(format!("{}", err), "Reference price not found: AAPL");
    }

    #[test]
    fn test_empty_curve_display() {
        let err = MarketDataError::EmptyCurve {
            name: "USD-SOFR".to_string(),
        };
        assert_eq!(format!("{}", err), "Curve 'USD-SOFR' has no tenor points");
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = MarketDataError::CurveNotFound {
            name: "X".to_string(),
        };
        assert_eq!(err1.clone(), err1);
    }
}
