//! Pricer CLI - portfolio valuation and risk from the command line
//!
//! This is the operational entry point for the pricer workspace.
//!
//! # Commands
//!
//! - `pricer run` - Value the trade blotter and write PV, DV01 and vega
//! - `pricer check` - Validate configuration and input files
//!
//! # Architecture
//!
//! As the service layer, this crate reads configuration and market files,
//! hands in-memory trades and snapshots to `pricer_risk`, and formats what
//! comes back:
//!
//! ```text
//! pricer.toml ─┐
//! data/*.txt ──┼─> loaders ─> RiskEngine + PortfolioRunner ─> report
//! flags, env ──┘
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod loaders;
mod report;

use commands::run::RunArgs;
use config::PricerConfig;

/// Portfolio pricer CLI
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "pricer.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value and risk the trade blotter
    Run(RunArgs),

    /// Check configuration and input files without pricing
    Check,
}

/// Logs go to stderr so a report on stdout stays clean.
fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = PricerConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?
        .with_env_override();

    init_tracing(cli.verbose, &config.log_level);
    if cli.config.exists() {
        debug!(path = %cli.config.display(), "configuration loaded");
    } else {
        info!(path = %cli.config.display(), "no configuration file, using defaults");
    }

    match cli.command {
        Commands::Run(args) => {
            let summary = commands::run::run(config, &args).context("run failed")?;
            info!(
                trades = summary.totals.trades,
                failed = summary.totals.failed,
                rejected = summary.rejected,
                checks = summary.checks,
                pv = summary.totals.pv,
                dv01 = summary.totals.dv01,
                vega = summary.totals.vega,
                "done"
            );
        }
        Commands::Check => commands::check::run(&config).context("check failed")?,
    }
    Ok(())
}
