//! # Pricer Models (L2: Business Logic)
//!
//! Trade definitions, payoffs, coupon schedules and closed-form formulas.
//!
//! This crate provides:
//! - Instrument definitions: `Bond`, `Swap`, `BlackOption`, `TreeOption`
//! - The closed [`instruments::Trade`] variant separating analytic trades
//!   from lattice trades
//! - Coupon schedule generation (`schedules`)
//! - Normal distribution and Black-Scholes formulas (`analytical`)
//!
//! ## Design Principles
//!
//! - **Enum-based trades** for static dispatch: the pricing path is chosen by
//!   the variant tag, never by inspecting a concrete type at runtime
//! - **Validated construction**: schedules, strike ordering and currencies are
//!   checked once when a trade is built

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod schedules;
