//! Trade blotter loader.
//!
//! The blotter is `;`-delimited with one header row. Columns, in order:
//!
//! ```text
//! id;type;trade_date;start;end;notional;instrument;rate;strike;freq;option;direction
//! ```
//!
//! `type` is one of `bond`, `swap`, `european` or `american`. Bonds and
//! swaps discount on the curve of the instrument's currency prefix; options
//! use `USD-SOFR` and the configured vol curve. Each European row also yields
//! a closed-form companion with id `<id>_Black_price`.
//!
//! Options take `option` = `call`, `put` or `callspread`; a call spread
//! writes both strikes as `lower/upper` in the strike column.
//!
//! A row that cannot be turned into a trade is logged and skipped.

use std::io::Read;
use std::path::Path;

use pricer_core::market_data::curves::names::USD_SOFR;
use pricer_core::types::Date;
use pricer_models::instruments::{
    resolve_discount_curve, BlackOption, Bond, Direction, ExerciseStyle, FixedIncomeParams,
    OptionParams, OptionType, Payoff, Swap, Trade, TradeModel, TreeOption, BLACK_ID_SUFFIX,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{CliError, Result};

/// One blotter row, by position.
#[derive(Debug, Deserialize)]
struct TradeRecord {
    id: String,
    kind: String,
    trade_date: String,
    start: String,
    end: String,
    notional: f64,
    instrument: String,
    rate: Option<f64>,
    strike: Option<String>,
    frequency: Option<f64>,
    option: Option<String>,
    direction: String,
}

/// Trades read from a blotter.
#[derive(Debug, Clone, Default)]
pub struct LoadedTrades {
    /// Trades in blotter order, companions right after their option
    pub trades: Vec<Trade>,
    /// Rows skipped as malformed
    pub rejected: usize,
}

fn parse_date(field: &str, value: &str) -> Result<Date> {
    Date::parse(value).map_err(|e| CliError::load(format!("{}: {}", field, e)))
}

fn require<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| CliError::load(format!("missing {}", field)))
}

fn parse_strike(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| CliError::load(format!("invalid strike '{}'", value)))
}

impl TradeRecord {
    fn fixed_income_params(&self) -> Result<FixedIncomeParams> {
        let instrument = self.instrument.to_ascii_uppercase();
        let curve = resolve_discount_curve(&instrument)?;
        Ok(FixedIncomeParams::new(
            self.notional,
            require("rate", self.rate)?,
            require("freq", self.frequency)?,
            parse_date("start", &self.start)?,
            parse_date("end", &self.end)?,
            instrument,
            curve,
            self.direction.parse::<Direction>()?,
        )?)
    }

    fn option_params(&self, vol_curve: &str) -> Result<OptionParams> {
        Ok(OptionParams::new(
            self.notional,
            parse_date("end", &self.end)?,
            self.instrument.to_ascii_uppercase(),
            USD_SOFR,
            vol_curve,
            self.direction.parse::<Direction>()?,
        )?)
    }

    fn payoff(&self) -> Result<Payoff> {
        let option = require("option", self.option.as_deref())?;
        let strike = require("strike", self.strike.as_deref())?;
        if option.eq_ignore_ascii_case("callspread") {
            let (lower, upper) = strike.split_once('/').ok_or_else(|| {
                CliError::load(format!("call spread strike '{}' is not 'lower/upper'", strike))
            })?;
            return Ok(Payoff::call_spread(parse_strike(lower)?, parse_strike(upper)?)?);
        }
        Ok(Payoff::vanilla(option.parse::<OptionType>()?, parse_strike(strike)?)?)
    }

    /// Trades described by this row.
    fn into_trades(self, vol_curve: &str) -> Result<Vec<Trade>> {
        parse_date("trade_date", &self.trade_date)?;

        match self.kind.trim().to_ascii_lowercase().as_str() {
            "bond" => Ok(vec![Bond::new(&self.id, self.fixed_income_params()?).into()]),
            "swap" => Ok(vec![Swap::new(&self.id, self.fixed_income_params()?).into()]),
            "european" => {
                let params = self.option_params(vol_curve)?;
                let payoff = self.payoff()?;
                let mut trades = vec![TreeOption::new(
                    &self.id,
                    payoff,
                    ExerciseStyle::European,
                    params.clone(),
                )
                .into()];
                if let Payoff::Vanilla {
                    option_type,
                    strike,
                } = payoff
                {
                    let id = format!("{}{}", self.id, BLACK_ID_SUFFIX);
                    trades.push(BlackOption::new(id, option_type, strike, params)?.into());
                }
                Ok(trades)
            }
            "american" => {
                let params = self.option_params(vol_curve)?;
                let payoff = self.payoff()?;
                Ok(vec![TreeOption::new(&self.id, payoff, ExerciseStyle::American, params).into()])
            }
            other => Err(CliError::load(format!("unknown trade type '{}'", other))),
        }
    }
}

/// Reads a blotter from any reader.
///
/// # Arguments
///
/// * `reader` - Blotter contents, header row included
/// * `vol_curve` - Vol curve name given to every option
///
/// # Errors
///
/// Only an unreadable input is an error; bad rows are counted in
/// [`LoadedTrades::rejected`].
pub fn read_trades<R: Read>(reader: R, vol_curve: &str) -> Result<LoadedTrades> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut loaded = LoadedTrades::default();
    for (index, row) in csv_reader.records().enumerate() {
        // header is line 1
        let line = index + 2;
        let record = match row {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(line, error = %e, "unreadable trade row skipped");
                loaded.rejected += 1;
                continue;
            }
        };
        if record.iter().all(str::is_empty) {
            continue;
        }

        let trades = record
            .deserialize::<TradeRecord>(None)
            .map_err(CliError::from)
            .and_then(|row| row.into_trades(vol_curve));
        match trades {
            Ok(trades) => {
                for trade in &trades {
                    debug!(line, trade = %trade.id(), name = %trade.name(), "trade loaded");
                }
                loaded.trades.extend(trades);
            }
            Err(e) => {
                warn!(line, error = %e, "malformed trade row skipped");
                loaded.rejected += 1;
            }
        }
    }

    info!(
        trades = loaded.trades.len(),
        rejected = loaded.rejected,
        "trades loaded"
    );
    Ok(loaded)
}

/// Reads the blotter at `path`.
pub fn load_trades(path: &Path, vol_curve: &str) -> Result<LoadedTrades> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    read_trades(std::fs::File::open(path)?, vol_curve)
}
