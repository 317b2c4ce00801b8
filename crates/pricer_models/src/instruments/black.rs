//! Closed-form European option used as a cross-check for lattice prices.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::PricingError;

use super::direction::Direction;
use super::error::InstrumentError;
use super::params::OptionParams;
use super::payoff::{OptionType, Payoff};
use super::traits::{PresentValue, TradeModel};
use crate::analytical::BlackScholes;

/// Suffix appended to the id of the lattice trade this option shadows.
pub const BLACK_ID_SUFFIX: &str = "_Black_price";

/// European call or put valued with the Black-Scholes formula.
///
/// Spot comes from the stock prices, the rate from the discounting curve and
/// the volatility from the vol curve, both read at the expiry date.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BlackOption, Direction, OptionParams, OptionType, TradeModel};
/// use pricer_core::types::time::Date;
///
/// let params = OptionParams::new(
///     100.0,
///     Date::from_ymd(2025, 6, 30).unwrap(),
///     "AAPL",
///     "USD-SOFR",
///     "LOGVOL",
///     Direction::Long,
/// )
/// .unwrap();
/// let option = BlackOption::new("E7_Black_price", OptionType::Put, 150.0, params).unwrap();
///
/// assert_eq!(option.name(), "long_BS_150.00_put_AAPL_2025-06-30");
/// assert_eq!(option.payoff(140.0), 1_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackOption {
    id: String,
    name: String,
    option_type: OptionType,
    strike: f64,
    params: OptionParams,
}

impl BlackOption {
    /// Creates a closed-form option.
    ///
    /// # Errors
    /// `InstrumentError::InvalidStrike` if the strike is not positive.
    pub fn new(
        id: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        params: OptionParams,
    ) -> Result<Self, InstrumentError> {
        // Validates the strike.
        Payoff::vanilla(option_type, strike)?;
        let name = format!(
            "{}_BS_{:.2}_{}_{}_{}",
            params.direction(),
            strike,
            option_type,
            params.underlying(),
            params.expiry()
        );
        Ok(Self {
            id: id.into(),
            name,
            option_type,
            strike,
            params,
        })
    }

    /// Returns the option terms.
    #[inline]
    pub fn params(&self) -> &OptionParams {
        &self.params
    }

    /// Returns call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Builds the Black-Scholes model from the snapshot.
    ///
    /// # Errors
    /// `PricingError::MarketData` for a missing spot, curve or vol curve,
    /// `PricingError::InvalidInput` for a non-positive spot or negative vol.
    pub fn model(&self, market: &MarketSnapshot) -> Result<BlackScholes, PricingError> {
        let expiry = self.params.expiry();
        let spot = market.stock_price(self.params.underlying())?;
        let rate = market.curve(self.params.curve_name())?.rate(expiry);
        let vol = market.vol_curve(self.params.vol_name())?.vol(expiry);
        Ok(BlackScholes::new(spot, rate, vol)?)
    }
}

impl TradeModel for BlackOption {
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
        self.sign() * self.notional() * self.option_type.intrinsic(price, self.strike)
    }
}

impl PresentValue for BlackOption {
    fn present_value(&self, market: &MarketSnapshot) -> Result<f64, PricingError> {
        let model = self.model(market)?;
        let expiry = self.params.time_to_expiry(market.as_of());
        let unit = model.price(self.option_type, self.strike, expiry);
        Ok(self.sign() * self.notional() * unit)
    }
}
