//! Run command implementation
//!
//! Loads the market and the blotter, values and risks every trade, and
//! writes the result report plus the optional pricing-error report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use pricer_pricing::lattice::LatticeModel;
use pricer_pricing::TradePricer;
use pricer_risk::portfolio::lattice_pricing_errors;
use pricer_risk::{PortfolioRunner, PortfolioTotals, RiskEngine};
use tracing::{info, warn};

use crate::config::PricerConfig;
use crate::error::Result;
use crate::loaders::{load_market, load_trades};
use crate::report::{write_pricing_errors, write_results, ReportFormat};

/// Command-line overrides for `pricer run`
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Lattice step count
    #[arg(short, long)]
    pub steps: Option<usize>,

    /// Lattice model (basic, crr, jarrow-rudd)
    #[arg(short, long)]
    pub model: Option<LatticeModel>,

    /// Value trades on the worker pool
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker pool size
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Result report format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Result report path (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pricing-error report path
    #[arg(short, long)]
    pub errors: Option<PathBuf>,

    /// Valuation date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
}

impl RunArgs {
    /// Overlays the flags that were given onto `config`.
    pub fn apply(&self, config: &mut PricerConfig) {
        if let Some(steps) = self.steps {
            config.lattice.steps = steps;
        }
        if let Some(model) = self.model {
            config.lattice.model = model;
        }
        if self.parallel {
            config.execution.parallel = true;
        }
        if let Some(workers) = self.workers {
            config.execution.workers = workers;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(output) = &self.output {
            config.output.result_file = Some(output.clone());
        }
        if let Some(errors) = &self.errors {
            config.output.pricing_error_file = Some(errors.clone());
        }
        if let Some(date) = &self.date {
            config.valuation_date = Some(date.clone());
        }
    }
}

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Totals over the valued trades
    pub totals: PortfolioTotals,
    /// Blotter rows skipped as malformed
    pub rejected: usize,
    /// Lines in the pricing-error report
    pub checks: usize,
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Run the valuation
pub fn run(mut config: PricerConfig, args: &RunArgs) -> Result<RunSummary> {
    args.apply(&mut config);
    config.validate()?;

    let as_of = config.valuation_date()?;
    let lattice = config.lattice_config()?;
    let mode = config.execution_mode();
    info!(as_of = %as_of, model = %lattice.model(), steps = lattice.steps(), mode = %mode, "starting run");

    let market = load_market(&config, as_of)?;
    let loaded = load_trades(
        &config.data_path(&config.trades_file),
        &config.vol_curve_name,
    )?;
    if loaded.rejected > 0 {
        warn!(rejected = loaded.rejected, "blotter rows skipped");
    }

    let engine = RiskEngine::new(market, config.shock_config(), TradePricer::from_config(lattice))?;
    let runner = PortfolioRunner::new(engine, mode).with_parallel_risk(config.execution.parallel_risk);

    let started = Instant::now();
    let results = runner.run(&loaded.trades)?;
    let totals = PortfolioTotals::from_results(&results);
    info!(
        trades = totals.trades,
        failed = totals.failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "portfolio valued"
    );

    match &config.output.result_file {
        Some(path) => {
            let mut out = create(path)?;
            write_results(&mut out, &results, config.output.format)?;
            out.flush()?;
            info!(path = %path.display(), format = %config.output.format, "results written");
        }
        None => {
            let mut out = std::io::stdout().lock();
            write_results(&mut out, &results, config.output.format)?;
            out.flush()?;
        }
    }

    let mut checks = 0;
    if let Some(path) = &config.output.pricing_error_file {
        let report = lattice_pricing_errors(
            runner.engine().base(),
            &loaded.trades,
            lattice.model(),
            &config.output.error_steps,
        )?;
        let mut out = create(path)?;
        write_pricing_errors(&mut out, &report, lattice.model())?;
        out.flush()?;
        checks = report.len();
        info!(path = %path.display(), checks, "pricing errors written");
    }

    Ok(RunSummary {
        totals,
        rejected: loaded.rejected,
        checks,
    })
}
