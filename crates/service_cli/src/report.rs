//! Result and pricing-error report writers.

use std::fmt;
use std::io::Write;

use pricer_pricing::lattice::LatticeModel;
use pricer_risk::portfolio::LatticeCheck;
use pricer_risk::{PortfolioTotals, TradeResult};
use serde::{Deserialize, Serialize};

use crate::error::Result;

const SEPARATOR_WIDTH: usize = 140;

/// Result report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Fixed-width text table
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON document
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Table => f.write_str("table"),
            ReportFormat::Csv => f.write_str("csv"),
            ReportFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    totals: PortfolioTotals,
    trades: &'a [TradeResult],
}

/// Writes the per-trade results in `format`.
pub fn write_results<W: Write>(out: W, results: &[TradeResult], format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Table => write_table(out, results),
        ReportFormat::Csv => write_csv(out, results),
        ReportFormat::Json => {
            let report = JsonReport {
                totals: PortfolioTotals::from_results(results),
                trades: results,
            };
            let mut out = out;
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_table<W: Write>(mut out: W, results: &[TradeResult]) -> Result<()> {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    writeln!(
        out,
        "{:<20}{:<20}{:<40}{:<20}{:<20}{:<20}",
        "value date", "trade id", "trade info", "trade pv", "DV01", "Vega"
    )?;
    writeln!(out, "{}", separator)?;

    for result in results {
        if let Some(error) = &result.error {
            writeln!(
                out,
                "{:<20}{:<20}{:<40}FAILED: {}",
                result.value_date.to_string(),
                result.trade_id,
                result.trade_name,
                error
            )?;
            continue;
        }
        writeln!(
            out,
            "{:<20}{:<20}{:<40}{:<20.2}{:<20.6}{:<20.6}",
            result.value_date.to_string(),
            result.trade_id,
            result.trade_name,
            result.pv,
            result.dv01,
            result.vega
        )?;
    }

    let totals = PortfolioTotals::from_results(results);
    writeln!(out, "{}", separator)?;
    writeln!(
        out,
        "{:<20}{:<20}{:<40}{:<20.2}{:<20.6}{:<20.6}",
        "total",
        format!("{} trades", totals.trades),
        format!("{} failed", totals.failed),
        totals.pv,
        totals.dv01,
        totals.vega
    )?;
    Ok(())
}

fn write_csv<W: Write>(out: W, results: &[TradeResult]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["value_date", "trade_id", "trade_name", "pv", "dv01", "vega", "error"])?;
    for result in results {
        writer.write_record([
            result.value_date.to_string(),
            result.trade_id.clone(),
            result.trade_name.clone(),
            format!("{:.2}", result.pv),
            format!("{:.6}", result.dv01),
            format!("{:.6}", result.vega),
            result.error.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the lattice-versus-closed-form comparison.
pub fn write_pricing_errors<W: Write>(
    mut out: W,
    checks: &[LatticeCheck],
    model: LatticeModel,
) -> Result<()> {
    writeln!(
        out,
        "Compare {} binomial tree result for an european option vs Black model",
        model.as_str().to_ascii_uppercase()
    )?;
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    for check in checks {
        writeln!(
            out,
            "Pricing Error For {} steps for {}: {:.6} (tree {:.6}, closed form {:.6})",
            check.steps, check.trade_id, check.abs_error, check.tree_pv, check.closed_form_pv
        )?;
    }
    Ok(())
}
