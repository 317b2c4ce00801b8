//! Pricer configuration management.
//!
//! Handles loading of `pricer.toml` with environment variable and
//! command-line overrides. Every field has a default, so a missing file or
//! a partial file yields a usable configuration.

use std::path::{Path, PathBuf};

use pricer_core::market_data::curves::names::{LOGVOL, SGD_SORA, USD_SOFR};
use pricer_core::types::Date;
use pricer_pricing::lattice::{LatticeConfig, LatticeError, LatticeModel, DEFAULT_STEPS};
use pricer_risk::scenarios::{DEFAULT_CURVE_SHOCK, DEFAULT_SPOT_SHOCK, DEFAULT_VOL_SHOCK};
use pricer_risk::{ExecutionMode, ShockConfig};
use serde::Deserialize;
use thiserror::Error;

use crate::report::ReportFormat;

/// Lattice settings (`[lattice]`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LatticeSection {
    /// Tree calibration
    pub model: LatticeModel,
    /// Tree step count
    pub steps: usize,
}

impl Default for LatticeSection {
    fn default() -> Self {
        Self {
            model: LatticeModel::Crr,
            steps: DEFAULT_STEPS,
        }
    }
}

/// Bump sizes and bumped curves (`[risk]`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiskSection {
    /// Parallel shift applied to each rate curve
    pub curve_shock: f64,
    /// Parallel shift applied to the vol curve
    pub vol_shock: f64,
    /// Absolute shift applied to every stock price
    pub spot_shock: f64,
    /// Rate curves that get a DV01 scenario
    pub curves: Vec<String>,
}

impl Default for RiskSection {
    fn default() -> Self {
        Self {
            curve_shock: DEFAULT_CURVE_SHOCK,
            vol_shock: DEFAULT_VOL_SHOCK,
            spot_shock: DEFAULT_SPOT_SHOCK,
            curves: vec![USD_SOFR.to_string(), SGD_SORA.to_string()],
        }
    }
}

/// Portfolio execution (`[execution]`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExecutionSection {
    /// Run trades on the worker pool
    pub parallel: bool,
    /// Worker pool size
    pub workers: usize,
    /// Revalue a trade's scenarios in parallel as well
    pub parallel_risk: bool,
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            parallel: false,
            workers: default_workers(),
            parallel_risk: false,
        }
    }
}

/// Report destinations (`[output]`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Result report path; stdout when unset
    pub result_file: Option<PathBuf>,
    /// Pricing-error report path; skipped when unset
    pub pricing_error_file: Option<PathBuf>,
    /// Result report format
    pub format: ReportFormat,
    /// Step counts compared in the pricing-error report
    pub error_steps: Vec<usize>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            result_file: None,
            pricing_error_file: None,
            format: ReportFormat::default(),
            error_steps: vec![10, 50, 100, 500, 1000],
        }
    }
}

/// Pricer configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PricerConfig {
    /// Directory the input file names are relative to
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Trade file
    #[serde(default = "default_trades_file")]
    pub trades_file: String,

    /// Rate curve files, one curve each
    #[serde(default = "default_curve_files")]
    pub curve_files: Vec<String>,

    /// Volatility curve file
    #[serde(default = "default_vol_file")]
    pub vol_file: String,

    /// Name given to the loaded volatility curve
    #[serde(default = "default_vol_curve_name")]
    pub vol_curve_name: String,

    /// Stock reference prices
    #[serde(default = "default_stock_price_file")]
    pub stock_price_file: String,

    /// Bond reference prices
    #[serde(default = "default_bond_price_file")]
    pub bond_price_file: String,

    /// Valuation date (YYYY-MM-DD); today when unset
    pub valuation_date: Option<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Lattice settings
    #[serde(default)]
    pub lattice: LatticeSection,

    /// Risk settings
    #[serde(default)]
    pub risk: RiskSection,

    /// Execution settings
    #[serde(default)]
    pub execution: ExecutionSection,

    /// Output settings
    #[serde(default)]
    pub output: OutputSection,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_trades_file() -> String {
    "trades.txt".to_string()
}

fn default_curve_files() -> Vec<String> {
    vec!["usd_sofr.txt".to_string(), "sgd_sora.txt".to_string()]
}

fn default_vol_file() -> String {
    "vol.txt".to_string()
}

fn default_vol_curve_name() -> String {
    LOGVOL.to_string()
}

fn default_stock_price_file() -> String {
    "stock_price.txt".to_string()
}

fn default_bond_price_file() -> String {
    "bond_price.txt".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            trades_file: default_trades_file(),
            curve_files: default_curve_files(),
            vol_file: default_vol_file(),
            vol_curve_name: default_vol_curve_name(),
            stock_price_file: default_stock_price_file(),
            bond_price_file: default_bond_price_file(),
            valuation_date: None,
            log_level: default_log_level(),
            lattice: LatticeSection::default(),
            risk: RiskSection::default(),
            execution: ExecutionSection::default(),
            output: OutputSection::default(),
        }
    }
}

impl PricerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Values that fail to parse leave the setting unchanged.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(data_dir) = std::env::var("PRICER_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(log_level) = std::env::var("PRICER_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(parallel) = std::env::var("PRICER_PARALLEL") {
            self.execution.parallel = match parallel.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => self.execution.parallel,
            };
        }

        if let Ok(workers) = std::env::var("PRICER_WORKERS") {
            self.execution.workers = workers.parse().unwrap_or(self.execution.workers);
        }

        if let Ok(steps) = std::env::var("PRICER_STEPS") {
            self.lattice.steps = steps.parse().unwrap_or(self.lattice.steps);
        }

        if let Ok(model) = std::env::var("PRICER_MODEL") {
            self.lattice.model = model.parse().unwrap_or(self.lattice.model);
        }

        if let Ok(date) = std::env::var("PRICER_VALUATION_DATE") {
            self.valuation_date = Some(date);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            errors.push("data_dir cannot be empty".to_string());
        }

        if self.curve_files.is_empty() {
            errors.push("curve_files must name at least one curve file".to_string());
        }

        if self.vol_curve_name.trim().is_empty() {
            errors.push("vol_curve_name cannot be empty".to_string());
        }

        if let Some(date) = &self.valuation_date {
            if let Err(e) = Date::parse(date) {
                errors.push(format!("Invalid valuation_date: {}", e));
            }
        }

        if let Err(e) = self.lattice_config() {
            errors.push(format!("Invalid [lattice]: {}", e));
        }

        if let Err(e) = self.shock_config().validate() {
            errors.push(format!("Invalid [risk]: {}", e));
        }

        if self.risk.curves.is_empty() {
            errors.push("[risk] curves must name at least one curve".to_string());
        }

        if self.execution.parallel && self.execution.workers == 0 {
            errors.push("[execution] workers must be greater than 0".to_string());
        }

        for &steps in &self.output.error_steps {
            if let Err(e) = LatticeConfig::new(self.lattice.model, steps) {
                errors.push(format!("Invalid [output] error_steps entry: {}", e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Resolves a data file name against `data_dir`.
    pub fn data_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Valuation date, defaulting to today.
    pub fn valuation_date(&self) -> Result<Date, ConfigError> {
        match &self.valuation_date {
            Some(date) => Date::parse(date)
                .map_err(|e| ConfigError::Validation(vec![format!("valuation_date: {}", e)])),
            None => Ok(Date::today()),
        }
    }

    /// Lattice model and step count.
    pub fn lattice_config(&self) -> Result<LatticeConfig, LatticeError> {
        LatticeConfig::new(self.lattice.model, self.lattice.steps)
    }

    /// Bump sizes for the risk engine.
    pub fn shock_config(&self) -> ShockConfig {
        ShockConfig {
            curve_shock: self.risk.curve_shock,
            vol_shock: self.risk.vol_shock,
            spot_shock: self.risk.spot_shock,
            curves: self.risk.curves.clone(),
            vol_curve: self.vol_curve_name.clone(),
        }
    }

    /// Where trades run: the worker pool when `parallel`, otherwise inline.
    pub fn execution_mode(&self) -> ExecutionMode {
        if self.execution.parallel {
            ExecutionMode::Scheduler {
                workers: self.execution.workers,
            }
        } else {
            ExecutionMode::Sequential
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
