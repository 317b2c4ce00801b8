//! Error types for the binomial lattice.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Lattice configuration and calibration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Step count outside [1, MAX_STEPS].
    #[error("Invalid step count {steps}: must be in range [1, {max}]")]
    InvalidStepCount {
        /// Requested step count
        steps: usize,
        /// Largest supported step count
        max: usize,
    },

    /// Unknown calibration name.
    #[error("Unknown lattice model '{name}': expected basic, crr or jarrow-rudd")]
    UnknownModel {
        /// The unparsed name
        name: String,
    },

    /// Calibration produced a tree that is not arbitrage free.
    #[error("Degenerate lattice: u = {up}, d = {down}, p = {prob_up}")]
    Degenerate {
        /// Up factor
        up: f64,
        /// Down factor
        down: f64,
        /// Risk-neutral up probability
        prob_up: f64,
    },

    /// Backward induction overflowed.
    #[error("Lattice value is not finite after {steps} steps")]
    NonFiniteValue {
        /// Step count used
        steps: usize,
    },
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        PricingError::ModelFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = LatticeError::InvalidStepCount { steps: 0, max: 100_000 };
        assert_eq!(
            err.to_string(),
            "Invalid step count 0: must be in range [1, 100000]"
        );
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = LatticeError::Degenerate {
            up: 1.0,
            down: 1.0,
            prob_up: f64::NAN,
        }
        .into();
        assert!(matches!(err, PricingError::ModelFailure(_)));
    }
}
