//! Instrument error types.
//!
//! This module provides structured error handling for trade
//! construction. Every variant is a configuration error: the trade
//! cannot be built and must be reported and skipped by the caller.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::schedules::ScheduleError;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidStrikeOrder`: Call spread with `lower >= upper`
/// - `InvalidStrike`: Strike is non-positive or not finite
/// - `InvalidNotional`: Notional is non-positive or not finite
/// - `UnknownCurrency`: No discounting curve for the currency code
/// - `InvalidDirection`: Direction text is not long/short/pay/receive
/// - `InvalidOptionType`: Option type text is not call/put
/// - `InvalidExerciseStyle`: Exercise text is not european/american
/// - `Schedule`: Coupon schedule could not be generated
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrikeOrder { lower: 110.0, upper: 100.0 };
/// assert_eq!(
///     format!("{}", err),
///     "Call spread strikes must satisfy lower < upper: 110 >= 100"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Call spread strikes out of order.
    #[error("Call spread strikes must satisfy lower < upper: {lower} >= {upper}")]
    InvalidStrikeOrder {
        /// Lower strike
        lower: f64,
        /// Upper strike
        upper: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid notional amount.
    #[error("Invalid notional: N = {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// Currency without a discounting curve.
    #[error("Unknown currency in instrument code '{code}'")]
    UnknownCurrency {
        /// The instrument code
        code: String,
    },

    /// Unrecognised direction.
    #[error("Invalid direction '{value}': expected long, short, pay or receive")]
    InvalidDirection {
        /// The unparsed text
        value: String,
    },

    /// Unrecognised option type.
    #[error("Invalid option type '{value}': expected call or put")]
    InvalidOptionType {
        /// The unparsed text
        value: String,
    },

    /// Unrecognised exercise style.
    #[error("Invalid exercise style '{value}': expected european or american")]
    InvalidExerciseStyle {
        /// The unparsed text
        value: String,
    },

    /// Schedule generation failed.
    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::time::Date;

    #[test]
    fn test_display_messages() {
        let err = InstrumentError::InvalidNotional { notional: -1.0 };
        assert_eq!(format!("{}", err), "Invalid notional: N = -1");

        let err = InstrumentError::UnknownCurrency {
            code: "EUR-GOV".to_string(),
        };
        assert!(format!("{}", err).contains("EUR-GOV"));
    }

    #[test]
    fn test_schedule_error_conversion() {
        let date = Date::from_ymd(2024, 1, 1).unwrap();
        let err: InstrumentError = ScheduleError::InvalidDateRange {
            start: date,
            end: date,
        }
        .into();
        assert!(matches!(err, InstrumentError::Schedule(_)));
    }

    #[test]
    fn test_conversion_to_pricing_error() {
        let err: PricingError = InstrumentError::InvalidStrike { strike: 0.0 }.into();
        assert_eq!(err, PricingError::InvalidInput("Invalid strike: K = 0".to_string()));
    }
}
