//! Lattice pricer configuration.

use super::error::LatticeError;
use super::model::LatticeModel;

/// Largest supported step count.
pub const MAX_STEPS: usize = 100_000;

/// Default step count.
pub const DEFAULT_STEPS: usize = 50;

/// Step count and calibration for a [`BinomialTreePricer`](super::BinomialTreePricer).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::{LatticeConfig, LatticeModel};
///
/// let config = LatticeConfig::new(LatticeModel::JarrowRudd, 500).unwrap();
/// assert_eq!(config.steps(), 500);
///
/// assert!(LatticeConfig::new(LatticeModel::Crr, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfig {
    model: LatticeModel,
    steps: usize,
}

impl LatticeConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// `LatticeError::InvalidStepCount` if `steps` is 0 or above [`MAX_STEPS`].
    pub fn new(model: LatticeModel, steps: usize) -> Result<Self, LatticeError> {
        let config = Self { model, steps };
        config.validate()?;
        Ok(config)
    }

    /// Returns the calibration.
    #[inline]
    pub fn model(&self) -> LatticeModel {
        self.model
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns a copy with a different step count.
    ///
    /// # Errors
    ///
    /// `LatticeError::InvalidStepCount` for an out-of-range count.
    pub fn with_steps(self, steps: usize) -> Result<Self, LatticeError> {
        Self::new(self.model, steps)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `LatticeError::InvalidStepCount` if `steps` is 0 or above [`MAX_STEPS`].
    pub fn validate(&self) -> Result<(), LatticeError> {
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(LatticeError::InvalidStepCount {
                steps: self.steps,
                max: MAX_STEPS,
            });
        }
        Ok(())
    }
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            model: LatticeModel::default(),
            steps: DEFAULT_STEPS,
        }
    }
}
