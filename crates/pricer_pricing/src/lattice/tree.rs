//! Binomial tree backward induction.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::PricingError;
use pricer_models::instruments::{LatticeProduct, TradeModel, TreeOption};

use super::config::{LatticeConfig, MAX_STEPS};
use super::error::LatticeError;
use super::model::{LatticeInputs, LatticeModel, ModelSetup};

/// Recombining binomial tree with a fixed number of steps.
///
/// The calibration strategy `M` is chosen independently of the tree walk.
/// Values are per unit of the product and unsigned; scaling by notional and
/// direction is left to the caller.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::{BinomialTreePricer, JarrowRuddModel};
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionType;
/// # use pricer_models::instruments::LatticeProduct;
/// # use pricer_core::types::time::Date;
/// # struct Call;
/// # impl LatticeProduct for Call {
/// #     fn expiry(&self) -> Date { Date::from_ymd(2026, 1, 1).unwrap() }
/// #     fn intrinsic(&self, s: f64) -> f64 { (s - 100.0).max(0.0) }
/// #     fn value_at_node(&self, _s: f64, _t: f64, c: f64) -> f64 { c }
/// # }
///
/// let tree = BinomialTreePricer::new(JarrowRuddModel, 1000).unwrap();
/// let value = tree.price_product(&Call, 100.0, 0.2, 0.045, 1.0).unwrap();
///
/// let closed = BlackScholes::new(100.0, 0.045, 0.2)
///     .unwrap()
///     .price(OptionType::Call, 100.0, 1.0);
/// assert!((value - closed).abs() < 1e-2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTreePricer<M = LatticeModel> {
    model: M,
    steps: usize,
}

impl BinomialTreePricer<LatticeModel> {
    /// Creates a tree from a validated configuration.
    pub fn from_config(config: LatticeConfig) -> Self {
        Self {
            model: config.model(),
            steps: config.steps(),
        }
    }
}

impl Default for BinomialTreePricer<LatticeModel> {
    fn default() -> Self {
        Self::from_config(LatticeConfig::default())
    }
}

impl<M: ModelSetup> BinomialTreePricer<M> {
    /// Creates a tree.
    ///
    /// # Errors
    ///
    /// `LatticeError::InvalidStepCount` if `steps` is out of range.
    pub fn new(model: M, steps: usize) -> Result<Self, LatticeError> {
        if steps == 0 || steps > MAX_STEPS {
            return Err(LatticeError::InvalidStepCount {
                steps,
                max: MAX_STEPS,
            });
        }
        Ok(Self { model, steps })
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the calibration strategy.
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Values a product by backward induction.
    ///
    /// # Arguments
    ///
    /// * `product` - Supplies leaf payoffs and node values
    /// * `spot` - Underlying price at the root
    /// * `vol` - Lognormal volatility
    /// * `rate` - Continuously compounded discount rate
    /// * `expiry` - Time to expiry in years; at or below zero the
    ///   intrinsic value at `spot` is returned
    ///
    /// # Errors
    ///
    /// - `LatticeError::Degenerate` if the calibration is not arbitrage free
    /// - `LatticeError::NonFiniteValue` if node spots overflow
    pub fn price_product<P: LatticeProduct + ?Sized>(
        &self,
        product: &P,
        spot: f64,
        vol: f64,
        rate: f64,
        expiry: f64,
    ) -> Result<f64, LatticeError> {
        if expiry <= 0.0 {
            return Ok(product.intrinsic(spot));
        }

        let n = self.steps;
        let dt = expiry / n as f64;
        let cal = self.model.calibrate(&LatticeInputs {
            spot,
            vol,
            rate,
            dt,
        })?;
        let df = (-rate * dt).exp();
        let (p_up, p_down) = (cal.prob_up, 1.0 - cal.prob_up);
        // Node (k, i+1) is node (k, i) moved one step down.
        let ratio = cal.down / cal.up;

        let mut values = Vec::with_capacity(n + 1);
        let mut node_spot = cal.spot_at(spot, n, 0);
        for _ in 0..=n {
            values.push(product.intrinsic(node_spot));
            node_spot *= ratio;
        }

        for k in (0..n).rev() {
            let time = k as f64 * dt;
            let mut node_spot = cal.spot_at(spot, k, 0);
            for i in 0..=k {
                let continuation = df * (p_up * values[i] + p_down * values[i + 1]);
                values[i] = product.value_at_node(node_spot, time, continuation);
                node_spot *= ratio;
            }
        }

        let root = values[0];
        if !root.is_finite() {
            return Err(LatticeError::NonFiniteValue { steps: n });
        }
        Ok(root)
    }

    /// Values a lattice option per unit against a market snapshot.
    ///
    /// Spot comes from the stock prices; the rate and volatility are read
    /// from the option's discounting and vol curves at expiry. Time to
    /// expiry is ACT/365 from the snapshot date.
    ///
    /// # Errors
    ///
    /// - `PricingError::MarketData` for a missing spot, curve or vol curve
    /// - `PricingError::ModelFailure` if the tree cannot be built
    pub fn price(&self, market: &MarketSnapshot, option: &TreeOption) -> Result<f64, PricingError> {
        let params = option.params();
        let expiry_date = params.expiry();
        let spot = market.stock_price(option.underlying())?;
        let vol = market.vol_curve(params.vol_name())?.vol(expiry_date);
        let rate = market.curve(option.curve_name())?.rate(expiry_date);
        let expiry = params.time_to_expiry(market.as_of());
        Ok(self.price_product(option, spot, vol, rate, expiry)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::model::{BasicModel, CrrModel, JarrowRuddModel};
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::names::{LOGVOL, USD_SOFR};
    use pricer_core::market_data::{MarketDataError, RateCurve, VolCurve};
    use pricer_core::types::time::Date;
    use pricer_models::analytical::BlackScholes;
    use pricer_models::instruments::{
        Direction, ExerciseStyle, OptionParams, OptionType, Payoff,
    };

    fn option(payoff: Payoff, exercise: ExerciseStyle) -> TreeOption {
        let params = OptionParams::new(
            1.0,
            Date::from_ymd(2026, 1, 1).unwrap(),
            "AAPL",
            USD_SOFR,
            LOGVOL,
            Direction::Long,
        )
        .unwrap();
        TreeOption::new("T", payoff, exercise, params)
    }

    fn vanilla(option_type: OptionType, exercise: ExerciseStyle) -> TreeOption {
        option(Payoff::vanilla(option_type, 100.0).unwrap(), exercise)
    }

    // ========================================
    // Tree mechanics
    // ========================================

    #[test]
    fn test_one_step_by_hand() {
        let tree = BinomialTreePricer::new(BasicModel, 1).unwrap();
        let call = vanilla(OptionType::Call, ExerciseStyle::European);
        let value = tree.price_product(&call, 100.0, 0.2, 0.05, 1.0).unwrap();

        let p = (0.05_f64.exp() - 0.9) / 0.2;
        assert_relative_eq!(value, (-0.05_f64).exp() * p * 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_expired_option_is_intrinsic() {
        let tree = BinomialTreePricer::new(CrrModel, 100).unwrap();
        let put = vanilla(OptionType::Put, ExerciseStyle::American);
        assert_eq!(tree.price_product(&put, 90.0, 0.2, 0.05, 0.0).unwrap(), 10.0);
        assert_eq!(tree.price_product(&put, 90.0, 0.2, 0.05, -0.5).unwrap(), 10.0);
    }

    #[test]
    fn test_invalid_steps() {
        assert!(BinomialTreePricer::new(CrrModel, 0).is_err());
    }

    #[test]
    fn test_call_spread_bounded_by_discounted_width() {
        let tree = BinomialTreePricer::new(CrrModel, 200).unwrap();
        let spread = option(
            Payoff::call_spread(95.0, 105.0).unwrap(),
            ExerciseStyle::European,
        );
        let value = tree.price_product(&spread, 100.0, 0.3, 0.04, 1.0).unwrap();
        assert!(value > 0.0);
        assert!(value < 10.0 * (-0.04_f64).exp());
    }

    // ========================================
    // Convergence and exercise
    // ========================================

    #[test]
    fn test_european_converges_to_black_scholes() {
        let bs = BlackScholes::new(100.0, 0.045, 0.2).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            let closed = bs.price(option_type, 100.0, 1.0);
            let trade = vanilla(option_type, ExerciseStyle::European);
            for model in LatticeModel::ALL.into_iter().skip(1) {
                let tree = BinomialTreePricer::new(model, 1000).unwrap();
                let value = tree.price_product(&trade, 100.0, 0.2, 0.045, 1.0).unwrap();
                assert!(
                    (value - closed).abs() < 1e-2,
                    "{} {}: {} vs {}",
                    model,
                    option_type,
                    value,
                    closed
                );
            }
        }
    }

    #[test]
    fn test_american_put_exceeds_european() {
        let tree = BinomialTreePricer::new(CrrModel, 200).unwrap();
        let american = vanilla(OptionType::Put, ExerciseStyle::American);
        let european = vanilla(OptionType::Put, ExerciseStyle::European);
        let am = tree.price_product(&american, 100.0, 0.2, 0.045, 1.0).unwrap();
        let eu = tree.price_product(&european, 100.0, 0.2, 0.045, 1.0).unwrap();
        assert!(am > eu + 0.1, "american {} european {}", am, eu);
    }

    #[test]
    fn test_american_call_equals_european_without_dividends() {
        let tree = BinomialTreePricer::new(JarrowRuddModel, 200).unwrap();
        let american = vanilla(OptionType::Call, ExerciseStyle::American);
        let european = vanilla(OptionType::Call, ExerciseStyle::European);
        let am = tree.price_product(&american, 100.0, 0.2, 0.045, 1.0).unwrap();
        let eu = tree.price_product(&european, 100.0, 0.2, 0.045, 1.0).unwrap();
        assert_relative_eq!(am, eu, epsilon = 1e-10);
    }

    // ========================================
    // Market lookups
    // ========================================

    fn market() -> MarketSnapshot {
        let as_of = Date::from_ymd(2025, 1, 1).unwrap();
        let mut curve = RateCurve::new(USD_SOFR);
        curve.add_rate(as_of, 0.045);
        let mut vol = VolCurve::new(LOGVOL);
        vol.add_vol(as_of, 0.2);
        let mut market = MarketSnapshot::new(as_of);
        market.insert_curve(curve).unwrap();
        market.insert_vol_curve(vol).unwrap();
        market.insert_stock_price("AAPL", 100.0);
        market
    }

    #[test]
    fn test_price_reads_market() {
        let tree = BinomialTreePricer::new(LatticeModel::JarrowRudd, 500).unwrap();
        let call = vanilla(OptionType::Call, ExerciseStyle::European);
        let from_market = tree.price(&market(), &call).unwrap();
        let direct = tree.price_product(&call, 100.0, 0.2, 0.045, 1.0).unwrap();
        assert_eq!(from_market, direct);
    }

    #[test]
    fn test_missing_vol_curve() {
        let full = market();
        let mut market = MarketSnapshot::new(full.as_of());
        market
            .insert_curve(full.curve(USD_SOFR).unwrap().clone())
            .unwrap();
        market.insert_stock_price("AAPL", 100.0);

        let tree = BinomialTreePricer::<LatticeModel>::default();
        let err = tree
            .price(&market, &vanilla(OptionType::Call, ExerciseStyle::European))
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::MarketData(MarketDataError::VolCurveNotFound {
                name: LOGVOL.to_string()
            })
        );
    }
}
