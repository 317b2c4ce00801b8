//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Black-Scholes model for European option pricing.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.045, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.045_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Continuously compounded risk-free rate
    /// * `volatility` - Lognormal volatility (must be non-negative)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0 or not finite
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns (d₁, d₂), or `None` when there is no diffusion left
    /// (T <= 0 or σ = 0).
    fn d1_d2(&self, strike: f64, expiry: f64) -> Option<(f64, f64)> {
        let sigma_sqrt_t = self.volatility * expiry.max(0.0).sqrt();
        if sigma_sqrt_t <= 0.0 {
            return None;
        }
        let d1 = ((self.spot / strike).ln()
            + (self.rate + 0.5 * self.volatility * self.volatility) * expiry)
            / sigma_sqrt_t;
        Some((d1, d1 - sigma_sqrt_t))
    }

    /// Prices a European call.
    ///
    /// Without diffusion the price collapses to the discounted forward
    /// intrinsic value.
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        let df = (-self.rate * expiry.max(0.0)).exp();
        match self.d1_d2(strike, expiry) {
            Some((d1, d2)) => self.spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
            None => (self.spot - strike * df).max(0.0),
        }
    }

    /// Prices a European put.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        let df = (-self.rate * expiry.max(0.0)).exp();
        match self.d1_d2(strike, expiry) {
            Some((d1, d2)) => strike * df * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
            None => (strike * df - self.spot).max(0.0),
        }
    }

    /// Prices a European call or put.
    pub fn price(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Sensitivity to a unit change in volatility, S·φ(d₁)·√T.
    ///
    /// Identical for calls and puts.
    pub fn vega(&self, strike: f64, expiry: f64) -> f64 {
        match self.d1_d2(strike, expiry) {
            Some((d1, _)) => self.spot * norm_pdf(d1) * expiry.sqrt(),
            None => 0.0,
        }
    }
}
