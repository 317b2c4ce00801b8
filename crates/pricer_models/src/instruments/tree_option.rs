//! European and American options valued on a binomial lattice.

use pricer_core::types::time::Date;

use super::direction::Direction;
use super::exercise::ExerciseStyle;
use super::params::OptionParams;
use super::payoff::Payoff;
use super::traits::{LatticeProduct, TradeModel};

/// Option valued by backward induction on a binomial tree.
///
/// Covers the four lattice products: European and American vanillas and
/// their call-spread variants. The tree works per unit of notional; the
/// trade's notional and sign are applied to the root value by the pricer.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{
///     Direction, ExerciseStyle, LatticeProduct, OptionParams, OptionType, Payoff, TradeModel,
///     TreeOption,
/// };
/// use pricer_core::types::time::Date;
///
/// let params = OptionParams::new(
///     1.0,
///     Date::from_ymd(2025, 6, 30).unwrap(),
///     "AAPL",
///     "USD-SOFR",
///     "LOGVOL",
///     Direction::Long,
/// )
/// .unwrap();
/// let put = TreeOption::new(
///     "A1",
///     Payoff::vanilla(OptionType::Put, 100.0).unwrap(),
///     ExerciseStyle::American,
///     params,
/// );
///
/// assert_eq!(put.name(), "long_AM_100.00_put_AAPL_2025-06-30");
/// // Early exercise beats a smaller continuation value
/// assert_eq!(put.value_at_node(80.0, 0.5, 15.0), 20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeOption {
    id: String,
    name: String,
    payoff: Payoff,
    exercise: ExerciseStyle,
    params: OptionParams,
}

impl TreeOption {
    /// Creates a lattice option from a validated payoff and terms.
    pub fn new(
        id: impl Into<String>,
        payoff: Payoff,
        exercise: ExerciseStyle,
        params: OptionParams,
    ) -> Self {
        let name = format!(
            "{}_{}_{}_{}_{}_{}",
            params.direction(),
            exercise.label(),
            payoff.strike_label(),
            payoff.label(),
            params.underlying(),
            params.expiry()
        );
        Self {
            id: id.into(),
            name,
            payoff,
            exercise,
            params,
        }
    }

    /// Returns the payoff.
    #[inline]
    pub fn payoff_kind(&self) -> &Payoff {
        &self.payoff
    }

    /// Returns the exercise style.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Returns the option terms.
    #[inline]
    pub fn params(&self) -> &OptionParams {
        &self.params
    }
}

impl TradeModel for TreeOption {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn notional(&self) -> f64 {
        self.params.notional()
    }

    fn direction(&self) -> Direction {
        self.params.direction()
    }

    fn underlying(&self) -> &str {
        self.params.underlying()
    }

    fn curve_name(&self) -> &str {
        self.params.curve_name()
    }

    fn vol_name(&self) -> Option<&str> {
        Some(self.params.vol_name())
    }

    fn payoff(&self, price: f64) -> f64 {
        self.sign() * self.notional() * self.payoff.evaluate(price)
    }
}

impl LatticeProduct for TreeOption {
    #[inline]
    fn expiry(&self) -> Date {
        self.params.expiry()
    }

    #[inline]
    fn intrinsic(&self, spot: f64) -> f64 {
        self.payoff.evaluate(spot)
    }

    #[inline]
    fn value_at_node(&self, spot: f64, _time: f64, continuation: f64) -> f64 {
        self.exercise.node_value(self.payoff.evaluate(spot), continuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::OptionType;

    fn params(direction: Direction) -> OptionParams {
        OptionParams::new(
            50.0,
            Date::from_ymd(2025, 12, 31).unwrap(),
            "MSFT",
            "USD-SOFR",
            "LOGVOL",
            direction,
        )
        .unwrap()
    }

    #[test]
    fn test_european_keeps_continuation() {
        let call = TreeOption::new(
            "E1",
            Payoff::vanilla(OptionType::Call, 100.0).unwrap(),
            ExerciseStyle::European,
            params(Direction::Long),
        );
        assert_eq!(call.value_at_node(150.0, 0.25, 42.0), 42.0);
        assert_eq!(call.intrinsic(150.0), 50.0);
    }

    #[test]
    fn test_american_call_spread_exercises_capped_value() {
        let spread = TreeOption::new(
            "A2",
            Payoff::call_spread(100.0, 110.0).unwrap(),
            ExerciseStyle::American,
            params(Direction::Long),
        );
        assert_eq!(spread.value_at_node(130.0, 0.1, 9.5), 10.0);
        assert_eq!(spread.value_at_node(90.0, 0.1, 1.2), 1.2);
        assert_eq!(spread.name(), "long_AM_100.00-110.00_callspread_MSFT_2025-12-31");
    }

    #[test]
    fn test_payoff_is_signed_and_scaled() {
        let put = TreeOption::new(
            "E3",
            Payoff::vanilla(OptionType::Put, 100.0).unwrap(),
            ExerciseStyle::European,
            params(Direction::Short),
        );
        assert_eq!(put.payoff(90.0), -500.0);
        assert_eq!(put.vol_name(), Some("LOGVOL"));
    }
}
