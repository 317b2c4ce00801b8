//! Lattice calibration strategies.
//!
//! A [`ModelSetup`] turns (spot, vol, rate, dt) into the up factor, down
//! factor and risk-neutral up probability of a recombining tree. The tree
//! walk in [`BinomialTreePricer`](super::BinomialTreePricer) is independent
//! of the strategy.
//!
//! | Model | u | d | p |
//! |-------|---|---|---|
//! | Basic | 1.1 | 0.9 | (e^r − d)/(u − d) |
//! | CRR | (b + √(b² − 4e^{2r·dt}))/(2e^{r·dt}), b = e^{(2r+σ²)dt} + 1 | 1/u | (e^{r·dt} − 1/u)/(u − 1/u) |
//! | Jarrow-Rudd | e^{(r−σ²/2)dt + σ√dt} | e^{(r−σ²/2)dt − σ√dt} | (e^{r·dt} − d)/(u − d) |

use std::fmt;
use std::str::FromStr;

use super::error::LatticeError;

/// Inputs to a calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeInputs {
    /// Spot price at the root
    pub spot: f64,
    /// Lognormal volatility
    pub vol: f64,
    /// Continuously compounded rate
    pub rate: f64,
    /// Time step in years
    pub dt: f64,
}

/// Calibrated tree parameters.
///
/// Spot at node (k, i), i down moves after k steps, is
/// `S0 · u^(k−i) · d^i`. For CRR `d = 1/u`, which gives `S0 · u^(k−2i)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Up factor
    pub up: f64,
    /// Down factor
    pub down: f64,
    /// Risk-neutral probability of an up move
    pub prob_up: f64,
}

impl Calibration {
    /// Checks `d < u` and `p ∈ [0, 1]`.
    ///
    /// # Errors
    /// `LatticeError::Degenerate` otherwise.
    pub fn validated(self) -> Result<Self, LatticeError> {
        let ok = self.up.is_finite()
            && self.down.is_finite()
            && self.down > 0.0
            && self.down < self.up
            && (0.0..=1.0).contains(&self.prob_up);
        if ok {
            Ok(self)
        } else {
            Err(LatticeError::Degenerate {
                up: self.up,
                down: self.down,
                prob_up: self.prob_up,
            })
        }
    }

    /// Spot at node (k, i). Requires `i <= k`.
    #[inline]
    pub(crate) fn spot_at(&self, spot: f64, k: usize, i: usize) -> f64 {
        debug_assert!(i <= k, "node ({k}, {i}) is outside the tree");
        spot * self.up.powi((k - i) as i32) * self.down.powi(i as i32)
    }
}

/// Strategy computing the tree parameters for one pricing call.
pub trait ModelSetup {
    /// Calibrates u, d and p.
    ///
    /// # Errors
    /// `LatticeError::Degenerate` if the parameters do not form a valid tree.
    fn calibrate(&self, inputs: &LatticeInputs) -> Result<Calibration, LatticeError>;
}

/// Fixed ±10% moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicModel;

impl BasicModel {
    const UP: f64 = 1.1;
    const DOWN: f64 = 0.9;
}

impl ModelSetup for BasicModel {
    fn calibrate(&self, inputs: &LatticeInputs) -> Result<Calibration, LatticeError> {
        // Growth over a whole year, independent of dt.
        let prob_up = (inputs.rate.exp() - Self::DOWN) / (Self::UP - Self::DOWN);
        Calibration {
            up: Self::UP,
            down: Self::DOWN,
            prob_up,
        }
        .validated()
    }
}

/// Cox-Ross-Rubinstein tree matching the first two moments exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrrModel;

impl ModelSetup for CrrModel {
    fn calibrate(&self, inputs: &LatticeInputs) -> Result<Calibration, LatticeError> {
        let LatticeInputs { rate, vol, dt, .. } = *inputs;
        let growth = (rate * dt).exp();
        let b = ((2.0 * rate + vol * vol) * dt).exp() + 1.0;
        let up = (b + (b * b - 4.0 * (2.0 * rate * dt).exp()).sqrt()) / (2.0 * growth);
        let down = 1.0 / up;
        let prob_up = (growth - down) / (up - down);
        Calibration { up, down, prob_up }.validated()
    }
}

/// Jarrow-Rudd equal-probability drift-adjusted tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JarrowRuddModel;

impl ModelSetup for JarrowRuddModel {
    fn calibrate(&self, inputs: &LatticeInputs) -> Result<Calibration, LatticeError> {
        let LatticeInputs { rate, vol, dt, .. } = *inputs;
        let drift = (rate - 0.5 * vol * vol) * dt;
        let diffusion = vol * dt.sqrt();
        let up = (drift + diffusion).exp();
        let down = (drift - diffusion).exp();
        let prob_up = ((rate * dt).exp() - down) / (up - down);
        Calibration { up, down, prob_up }.validated()
    }
}

/// Static-dispatch choice of calibration.
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::LatticeModel;
///
/// let model: LatticeModel = "jarrow-rudd".parse().unwrap();
/// assert_eq!(model, LatticeModel::JarrowRudd);
/// assert_eq!(LatticeModel::default().to_string(), "crr");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LatticeModel {
    /// Fixed u = 1.1, d = 0.9
    Basic,
    /// Cox-Ross-Rubinstein
    #[default]
    Crr,
    /// Jarrow-Rudd
    JarrowRudd,
}

impl LatticeModel {
    /// Every model, in display order.
    pub const ALL: [LatticeModel; 3] = [
        LatticeModel::Basic,
        LatticeModel::Crr,
        LatticeModel::JarrowRudd,
    ];

    /// Returns the configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LatticeModel::Basic => "basic",
            LatticeModel::Crr => "crr",
            LatticeModel::JarrowRudd => "jarrow-rudd",
        }
    }
}

impl ModelSetup for LatticeModel {
    #[inline]
    fn calibrate(&self, inputs: &LatticeInputs) -> Result<Calibration, LatticeError> {
        match self {
            LatticeModel::Basic => BasicModel.calibrate(inputs),
            LatticeModel::Crr => CrrModel.calibrate(inputs),
            LatticeModel::JarrowRudd => JarrowRuddModel.calibrate(inputs),
        }
    }
}

impl FromStr for LatticeModel {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(LatticeModel::Basic),
            "crr" => Ok(LatticeModel::Crr),
            "jarrow-rudd" | "jarrowrudd" | "jr" => Ok(LatticeModel::JarrowRudd),
            _ => Err(LatticeError::UnknownModel {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LatticeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
