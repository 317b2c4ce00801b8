//! Portfolio error types.
//!
//! Failures of individual trades are not errors at this level; they are
//! recorded on the trade's [`TradeResult`](super::TradeResult). These
//! variants stop the whole run.

use pricer_pricing::lattice::LatticeError;
use thiserror::Error;

use crate::parallel::SchedulerError;

/// Errors that abort a portfolio run.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Worker pool could not be started or refused a task.
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Lattice settings for a cross-check are invalid.
    #[error("Invalid lattice settings: {0}")]
    Lattice(#[from] LatticeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_scheduler() {
        let err = PortfolioError::from(SchedulerError::NoWorkers);
        assert_eq!(
            format!("{}", err),
            "Scheduler error: Worker count must be at least 1"
        );
    }

    #[test]
    fn test_error_display_lattice() {
        let err = PortfolioError::from(LatticeError::InvalidStepCount {
            steps: 0,
            max: 100_000,
        });
        assert_eq!(
            format!("{}", err),
            "Invalid lattice settings: Invalid step count 0: must be in range [1, 100000]"
        );
    }
}
