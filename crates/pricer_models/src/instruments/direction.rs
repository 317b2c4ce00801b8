//! Trade direction.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Side of a trade.
///
/// `Long`/`Receive` value at +1, `Short`/`Pay` at -1. For swaps the
/// side refers to the fixed leg: `Pay` pays fixed, `Receive` receives it.
///
/// # Examples
/// ```
/// use pricer_models::instruments::Direction;
///
/// let dir: Direction = "Short".parse().unwrap();
/// assert_eq!(dir, Direction::Short);
/// assert_eq!(dir.sign(), -1.0);
/// assert_eq!(Direction::Receive.sign(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Long position
    Long,
    /// Short position
    Short,
    /// Pay fixed
    Pay,
    /// Receive fixed
    Receive,
}

impl Direction {
    /// Returns +1.0 for long/receive and -1.0 for short/pay.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long | Direction::Receive => 1.0,
            Direction::Short | Direction::Pay => -1.0,
        }
    }

    /// Returns the lowercase name used in trade files and trade names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
            Direction::Pay => "pay",
            Direction::Receive => "receive",
        }
    }
}

impl FromStr for Direction {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            "pay" => Ok(Direction::Pay),
            "receive" => Ok(Direction::Receive),
            _ => Err(InstrumentError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_directions() {
        for (text, dir) in [
            ("long", Direction::Long),
            (" SHORT ", Direction::Short),
            ("pay", Direction::Pay),
            ("Receive", Direction::Receive),
        ] {
            assert_eq!(text.parse::<Direction>().unwrap(), dir);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "buy".parse::<Direction>(),
            Err(InstrumentError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for dir in [Direction::Long, Direction::Short, Direction::Pay, Direction::Receive] {
            assert_eq!(dir.to_string().parse::<Direction>().unwrap(), dir);
        }
    }
}
