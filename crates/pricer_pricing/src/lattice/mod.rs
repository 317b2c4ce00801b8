//! Binomial lattice pricing.
//!
//! This module provides:
//! - [`ModelSetup`] calibrations: [`BasicModel`], [`CrrModel`], [`JarrowRuddModel`]
//!   and the [`LatticeModel`] enum selecting one of them
//! - [`BinomialTreePricer`]: backward induction over a recombining tree
//! - [`LatticeConfig`]: validated step count and model choice
//!
//! # Algorithm
//!
//! 1. Calibrate u, d, p from (spot, vol, rate, dt = T/N)
//! 2. Leaves at step N take the product's intrinsic value
//! 3. For k = N−1 down to 0, each node takes
//!    `value_at_node(S(k, i), k·dt, e^{−r·dt}(p·V[i] + (1−p)·V[i+1]))`
//! 4. The root is the unit value

mod config;
mod error;
mod model;
mod tree;

pub use config::{LatticeConfig, DEFAULT_STEPS, MAX_STEPS};
pub use error::LatticeError;
pub use model::{
    BasicModel, Calibration, CrrModel, JarrowRuddModel, LatticeInputs, LatticeModel, ModelSetup,
};
pub use tree::BinomialTreePricer;
