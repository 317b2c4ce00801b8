//! Payoff definitions.
//!
//! This module provides the option type and the per-unit payoff
//! functions used by both lattice and closed-form options.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// assert_eq!("PUT".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionType {
    /// Intrinsic value per unit at `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl FromStr for OptionType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(InstrumentError::InvalidOptionType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal payoff of a lattice option, per unit of notional.
///
/// # Variants
/// - `Vanilla`: Call or put on a single strike
/// - `CallSpread`: Long call at `lower`, short call at `upper`,
///   i.e. max(min(S - K1, K2 - K1), 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::Payoff;
///
/// let spread = Payoff::call_spread(100.0, 110.0).unwrap();
/// assert_eq!(spread.evaluate(95.0), 0.0);
/// assert_eq!(spread.evaluate(104.0), 4.0);
/// assert_eq!(spread.evaluate(150.0), 10.0);
///
/// assert!(Payoff::call_spread(110.0, 100.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payoff {
    /// Single-strike call or put.
    Vanilla {
        /// Call or put
        option_type: OptionType,
        /// Strike price
        strike: f64,
    },
    /// Bull call spread.
    CallSpread {
        /// Lower strike (long call)
        lower: f64,
        /// Upper strike (short call)
        upper: f64,
    },
}

impl Payoff {
    /// Creates a vanilla payoff.
    ///
    /// # Errors
    /// `InstrumentError::InvalidStrike` if the strike is not positive and finite.
    pub fn vanilla(option_type: OptionType, strike: f64) -> Result<Self, InstrumentError> {
        check_strike(strike)?;
        Ok(Payoff::Vanilla {
            option_type,
            strike,
        })
    }

    /// Creates a call spread.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidStrike` for a non-positive strike
    /// - `InstrumentError::InvalidStrikeOrder` unless `lower < upper`
    pub fn call_spread(lower: f64, upper: f64) -> Result<Self, InstrumentError> {
        check_strike(lower)?;
        check_strike(upper)?;
        if lower >= upper {
            return Err(InstrumentError::InvalidStrikeOrder { lower, upper });
        }
        Ok(Payoff::CallSpread { lower, upper })
    }

    /// Evaluates the payoff per unit at `spot`.
    #[inline]
    pub fn evaluate(&self, spot: f64) -> f64 {
        match *self {
            Payoff::Vanilla {
                option_type,
                strike,
            } => option_type.intrinsic(spot, strike),
            Payoff::CallSpread { lower, upper } => (spot - lower).min(upper - lower).max(0.0),
        }
    }

    /// Short label for trade names: `call`, `put` or `callspread`.
    pub fn label(&self) -> &'static str {
        match self {
            Payoff::Vanilla { option_type, .. } => option_type.as_str(),
            Payoff::CallSpread { .. } => "callspread",
        }
    }

    /// Strike text for trade names, `100.00` or `100.00-110.00`.
    pub fn strike_label(&self) -> String {
        match self {
            Payoff::Vanilla { strike, .. } => format!("{:.2}", strike),
            Payoff::CallSpread { lower, upper } => format!("{:.2}-{:.2}", lower, upper),
        }
    }
}

fn check_strike(strike: f64) -> Result<(), InstrumentError> {
    if !strike.is_finite() || strike <= 0.0 {
        return Err(InstrumentError::InvalidStrike { strike });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ========================================
    // Construction
    // ========================================

    #[test]
    fn test_call_spread_requires_ordered_strikes() {
        assert_eq!(
            Payoff::call_spread(100.0, 100.0),
            Err(InstrumentError::InvalidStrikeOrder {
                lower: 100.0,
                upper: 100.0
            })
        );
        assert!(Payoff::call_spread(-5.0, 100.0).is_err());
        assert!(Payoff::vanilla(OptionType::Put, 0.0).is_err());
    }

    #[test]
    fn test_option_type_parse() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert!("straddle".parse::<OptionType>().is_err());
    }

    // ========================================
    // Evaluation
    // ========================================

    #[test]
    fn test_vanilla_evaluation() {
        let call = Payoff::vanilla(OptionType::Call, 100.0).unwrap();
        let put = Payoff::vanilla(OptionType::Put, 100.0).unwrap();
        assert_eq!(call.evaluate(120.0), 20.0);
        assert_eq!(call.evaluate(80.0), 0.0);
        assert_eq!(put.evaluate(80.0), 20.0);
        assert_eq!(put.evaluate(120.0), 0.0);
    }

    #[test]
    fn test_labels() {
        let spread = Payoff::call_spread(95.0, 105.5).unwrap();
        assert_eq!(spread.label(), "callspread");
        assert_eq!(spread.strike_label(), "95.00-105.50");
    }

    proptest! {
        #[test]
        fn prop_call_spread_bounded(spot in 0.0f64..500.0, k1 in 1.0f64..200.0, width in 0.5f64..100.0) {
            let spread = Payoff::call_spread(k1, k1 + width).unwrap();
            let value = spread.evaluate(spot);
            prop_assert!(value >= 0.0);
            prop_assert!(value <= width + 1e-12);
        }

        #[test]
        fn prop_put_call_parity_at_expiry(spot in 0.0f64..500.0, strike in 1.0f64..300.0) {
            let call = OptionType::Call.intrinsic(spot, strike);
            let put = OptionType::Put.intrinsic(spot, strike);
            prop_assert!((call - put - (spot - strike)).abs() < 1e-9);
        }
    }
}
