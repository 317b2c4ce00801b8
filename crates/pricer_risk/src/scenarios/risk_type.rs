//! Sensitivity kinds computed by the risk engine.

use std::fmt;
use std::str::FromStr;

use super::error::RiskError;

/// Which market factor to bump.
///
/// # Examples
///
/// ```
/// use pricer_risk::scenarios::RiskType;
///
/// assert_eq!("DV01".parse::<RiskType>().unwrap(), RiskType::Dv01);
/// assert_eq!("price".parse::<RiskType>().unwrap(), RiskType::Delta);
/// assert_eq!(RiskType::Vega.to_string(), "vega");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RiskType {
    /// Parallel rate-curve shift, central difference
    Dv01,
    /// Volatility shift, one-sided
    Vega,
    /// Spot shift on every stock price
    Delta,
}

impl RiskType {
    /// All risk types in report order.
    pub const ALL: [RiskType; 3] = [RiskType::Dv01, RiskType::Vega, RiskType::Delta];

    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskType::Dv01 => "dv01",
            RiskType::Vega => "vega",
            RiskType::Delta => "delta",
        }
    }
}

impl FromStr for RiskType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dv01" => Ok(RiskType::Dv01),
            "vega" => Ok(RiskType::Vega),
            "delta" | "price" => Ok(RiskType::Delta),
            other => Err(RiskError::UnknownRiskType(other.to_string())),
        }
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
