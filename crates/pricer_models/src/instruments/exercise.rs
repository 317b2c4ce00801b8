//! Option exercise style definitions.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Option exercise style.
///
/// Decides the value at an interior lattice node given the intrinsic
/// value there and the discounted continuation value.
///
/// # Variants
/// - `European`: Exercise only at expiry; nodes keep the continuation value
/// - `American`: Exercise at any node; nodes take max(intrinsic, continuation)
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// assert_eq!(ExerciseStyle::European.node_value(12.0, 9.5), 9.5);
/// assert_eq!(ExerciseStyle::American.node_value(12.0, 9.5), 12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// European style: exercise only at expiry.
    #[default]
    European,

    /// American style: exercise at any time before expiry.
    American,
}

impl ExerciseStyle {
    /// Returns whether early exercise is allowed.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Value at an interior node.
    #[inline]
    pub fn node_value(&self, intrinsic: f64, continuation: f64) -> f64 {
        match self {
            ExerciseStyle::European => continuation,
            ExerciseStyle::American => intrinsic.max(continuation),
        }
    }

    /// Short label for trade names.
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "EU",
            ExerciseStyle::American => "AM",
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" => Ok(ExerciseStyle::European),
            "american" => Ok(ExerciseStyle::American),
            _ => Err(InstrumentError::InvalidExerciseStyle {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => f.write_str("european"),
            ExerciseStyle::American => f.write_str("american"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_american_never_below_continuation() {
        for (intrinsic, continuation) in [(0.0, 3.0), (5.0, 3.0), (2.0, 2.0)] {
            let value = ExerciseStyle::American.node_value(intrinsic, continuation);
            assert!(value >= continuation);
            assert!(value >= intrinsic);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("American".parse::<ExerciseStyle>().unwrap(), ExerciseStyle::American);
        assert!("bermudan".parse::<ExerciseStyle>().is_err());
        assert!(!ExerciseStyle::default().allows_early_exercise());
    }
}
