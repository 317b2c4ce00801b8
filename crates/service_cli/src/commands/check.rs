//! Check command implementation
//!
//! Validates configuration and input files without pricing anything.

use std::collections::BTreeSet;

use pricer_core::types::Date;
use pricer_models::instruments::TradeModel;
use tracing::info;

use crate::config::PricerConfig;
use crate::error::{CliError, Result};
use crate::loaders::{load_market, load_trades};

/// What the inputs contain
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// Valuation date
    pub as_of: Date,
    /// Rate curves loaded
    pub curves: Vec<String>,
    /// Trades loaded, companions included
    pub trades: usize,
    /// Blotter rows skipped as malformed
    pub rejected: usize,
    /// Curves referenced by trades or risk settings but absent from the market
    pub missing: BTreeSet<String>,
}

/// Loads everything a run would load and cross-references it.
pub fn inspect(config: &PricerConfig) -> Result<CheckReport> {
    config.validate()?;
    let as_of = config.valuation_date()?;
    let market = load_market(config, as_of)?;
    let loaded = load_trades(
        &config.data_path(&config.trades_file),
        &config.vol_curve_name,
    )?;

    let mut missing = BTreeSet::new();
    let required_curves = config
        .risk
        .curves
        .iter()
        .map(String::as_str)
        .chain(loaded.trades.iter().map(|t| t.curve_name()));
    for curve in required_curves {
        if !market.has_curve(curve) {
            missing.insert(curve.to_string());
        }
    }
    for vol in loaded.trades.iter().filter_map(|t| t.vol_name()) {
        if market.vol_curve(vol).is_err() {
            missing.insert(vol.to_string());
        }
    }

    Ok(CheckReport {
        as_of,
        curves: market.curve_names().map(str::to_string).collect(),
        trades: loaded.trades.len(),
        rejected: loaded.rejected,
        missing,
    })
}

/// Run the check command
pub fn run(config: &PricerConfig) -> Result<()> {
    info!("Checking configuration and inputs...");
    let report = inspect(config)?;

    println!("Valuation date : {}", report.as_of);
    println!("Data directory : {}", config.data_dir.display());
    println!("Rate curves    : {}", report.curves.join(", "));
    println!("Vol curve      : {}", config.vol_curve_name);
    println!(
        "Lattice        : {} with {} steps",
        config.lattice.model, config.lattice.steps
    );
    println!("Trades         : {} ({} rows rejected)", report.trades, report.rejected);

    if !report.missing.is_empty() {
        let missing: Vec<&str> = report.missing.iter().map(String::as_str).collect();
        return Err(CliError::validation(format!(
            "missing market data: {}",
            missing.join(", ")
        )));
    }

    println!("All checks passed");
    Ok(())
}
