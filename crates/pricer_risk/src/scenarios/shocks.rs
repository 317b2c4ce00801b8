//! Shock sizes and the curves they apply to.

use pricer_core::market_data::curves::names::{LOGVOL, SGD_SORA, USD_SOFR};

use super::error::RiskError;

/// Default parallel rate shift (1bp).
pub const DEFAULT_CURVE_SHOCK: f64 = 0.0001;

/// Default volatility shift (1 vol point).
pub const DEFAULT_VOL_SHOCK: f64 = 0.01;

/// Default absolute spot shift.
pub const DEFAULT_SPOT_SHOCK: f64 = 1.0;

/// Shock magnitudes and scenario targets for a [`RiskEngine`](super::RiskEngine).
///
/// # Examples
///
/// ```
/// use pricer_risk::scenarios::ShockConfig;
///
/// let config = ShockConfig::default().with_curves(["USD-SOFR"]);
/// assert_eq!(config.curve_shock, 0.0001);
/// assert_eq!(config.curves, vec!["USD-SOFR".to_string()]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShockConfig {
    /// Parallel shift applied to each rate curve, up and down
    pub curve_shock: f64,
    /// Shift applied to every point of the vol curve
    pub vol_shock: f64,
    /// Absolute shift applied to every stock reference price
    pub spot_shock: f64,
    /// Rate curves that get an up/down scenario pair
    pub curves: Vec<String>,
    /// Vol curve shocked for vega
    pub vol_curve: String,
}

impl Default for ShockConfig {
    fn default() -> Self {
        Self {
            curve_shock: DEFAULT_CURVE_SHOCK,
            vol_shock: DEFAULT_VOL_SHOCK,
            spot_shock: DEFAULT_SPOT_SHOCK,
            curves: vec![USD_SOFR.to_string(), SGD_SORA.to_string()],
            vol_curve: LOGVOL.to_string(),
        }
    }
}

impl ShockConfig {
    /// Replaces the list of shocked rate curves.
    pub fn with_curves<I, S>(mut self, curves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.curves = curves.into_iter().map(Into::into).collect();
        self
    }

    /// Checks that every shock is finite and non-zero.
    ///
    /// # Errors
    ///
    /// `RiskError::InvalidShock` naming the first offending shock.
    pub fn validate(&self) -> Result<(), RiskError> {
        for (name, value) in [
            ("curve", self.curve_shock),
            ("vol", self.vol_shock),
            ("spot", self.spot_shock),
        ] {
            if !value.is_finite() || value == 0.0 {
                return Err(RiskError::InvalidShock { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets() {
        let config = ShockConfig::default();
        assert_eq!(config.curves, vec!["USD-SOFR", "SGD-SORA"]);
        assert_eq!(config.vol_curve, "LOGVOL");
        assert_eq!(config.spot_shock, 1.0);
    }

    #[test]
    fn test_zero_shock_rejected() {
        let config = ShockConfig {
            spot_shock: 0.0,
            ..ShockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(RiskError::InvalidShock {
                name: "spot",
                value: 0.0
            })
        );
    }
}
