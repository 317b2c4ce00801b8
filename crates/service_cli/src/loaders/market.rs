//! Market data files.
//!
//! Rate curve files carry the curve name on their first line, followed by
//! one `tenor:rate%` pillar per line. The volatility file has pillars only;
//! its curve name comes from configuration. Price files hold one
//! `NAME:price` pair per line.
//!
//! ```text
//! USD-SOFR
//! ON:5.30%
//! 3M:5.35%
//! 1Y:5.10%
//! ```
//!
//! Blank lines and lines starting with `#` are ignored everywhere.

use std::path::Path;

use pricer_core::market_data::{MarketSnapshot, RateCurve, VolCurve};
use pricer_core::types::{Date, DAYS_PER_YEAR};
use tracing::{debug, info, warn};

use crate::config::PricerConfig;
use crate::error::{CliError, Result};

/// Tenor codes and their year fractions.
const TENORS: [(&str, f64); 8] = [
    ("ON", 1.0 / DAYS_PER_YEAR),
    ("3M", 0.25),
    ("6M", 0.5),
    ("9M", 0.75),
    ("1Y", 1.0),
    ("2Y", 2.0),
    ("5Y", 5.0),
    ("10Y", 10.0),
];

/// Pillar date of a tenor code: `round(year_fraction * 365)` days after
/// `as_of`. Codes are matched case-insensitively.
///
/// # Errors
///
/// `CliError::Load` for a code outside ON, 3M, 6M, 9M, 1Y, 2Y, 5Y, 10Y.
pub fn tenor_date(as_of: Date, tenor: &str) -> Result<Date> {
    let code = tenor.trim().to_ascii_uppercase();
    let years = TENORS
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, years)| *years)
        .ok_or_else(|| CliError::load(format!("unknown tenor '{}'", tenor.trim())))?;
    let days = (years * DAYS_PER_YEAR).round() as i64;
    Ok(as_of.add_days(days)?)
}

/// Numbered lines that carry data.
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn split_pair(line_no: usize, line: &str) -> Result<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
        .ok_or_else(|| CliError::load(format!("line {}: expected 'key:value', got '{}'", line_no, line)))
}

/// `"5.25%"` (or `"5.25"`) as `0.0525`.
fn parse_percent(line_no: usize, value: &str) -> Result<f64> {
    let number = value.strip_suffix('%').unwrap_or(value).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v / 100.0)
        .ok_or_else(|| CliError::load(format!("line {}: invalid percentage '{}'", line_no, value)))
}

/// Pillars of a `tenor:pct%` block as (date, decimal) pairs.
fn parse_pillars<'a>(
    lines: impl Iterator<Item = (usize, &'a str)>,
    as_of: Date,
) -> Result<Vec<(Date, f64)>> {
    lines
        .map(|(line_no, line)| -> Result<(Date, f64)> {
            let (tenor, value) = split_pair(line_no, line)?;
            let date = tenor_date(as_of, tenor).map_err(|e| match e {
                CliError::Load(msg) => CliError::load(format!("line {}: {}", line_no, msg)),
                other => other,
            })?;
            Ok((date, parse_percent(line_no, value)?))
        })
        .collect()
}

/// Parses a rate curve file.
///
/// # Errors
///
/// `CliError::Load` if the name line is missing or a pillar is malformed.
pub fn parse_rate_curve(content: &str, as_of: Date) -> Result<RateCurve> {
    let mut lines = data_lines(content);
    let (_, name) = lines
        .next()
        .ok_or_else(|| CliError::load("rate curve file is empty"))?;
    if name.contains(':') {
        return Err(CliError::load(format!(
            "first line must be the curve name, got '{}'",
            name
        )));
    }

    let mut curve = RateCurve::new(name);
    for (date, rate) in parse_pillars(lines, as_of)? {
        if !curve.add_rate(date, rate) {
            warn!(curve = name, %date, "duplicate pillar ignored");
        }
    }
    Ok(curve)
}

/// Parses a volatility file into a curve named `name`.
pub fn parse_vol_curve(content: &str, name: &str, as_of: Date) -> Result<VolCurve> {
    let mut curve = VolCurve::new(name);
    for (date, vol) in parse_pillars(data_lines(content), as_of)? {
        if !curve.add_vol(date, vol) {
            warn!(curve = name, %date, "duplicate pillar ignored");
        }
    }
    Ok(curve)
}

/// Parses a `NAME:price` file. Names are upper-cased.
pub fn parse_price_file(content: &str) -> Result<Vec<(String, f64)>> {
    data_lines(content)
        .map(|(line_no, line)| -> Result<(String, f64)> {
            let (name, value) = split_pair(line_no, line)?;
            if name.is_empty() {
                return Err(CliError::load(format!("line {}: missing instrument name", line_no)));
            }
            let price = value
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .ok_or_else(|| {
                    CliError::load(format!("line {}: invalid price '{}'", line_no, value))
                })?;
            Ok((name.to_ascii_uppercase(), price))
        })
        .collect()
}

pub(crate) fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Prefixes load errors with the file they came from.
fn in_file(path: &Path) -> impl Fn(CliError) -> CliError + '_ {
    move |err| match err {
        CliError::Load(msg) => CliError::load(format!("{}: {}", path.display(), msg)),
        other => other,
    }
}

/// Builds the market snapshot from the files named in `config`.
///
/// # Errors
///
/// Missing files, malformed lines, and curves without pillars.
pub fn load_market(config: &PricerConfig, as_of: Date) -> Result<MarketSnapshot> {
    let mut market = MarketSnapshot::new(as_of);

    for file in &config.curve_files {
        let path = config.data_path(file);
        let curve = parse_rate_curve(&read_input(&path)?, as_of).map_err(in_file(&path))?;
        debug!(curve = curve.name(), pillars = curve.len(), path = %path.display(), "rate curve loaded");
        market.insert_curve(curve)?;
    }

    let path = config.data_path(&config.vol_file);
    let vol = parse_vol_curve(&read_input(&path)?, &config.vol_curve_name, as_of)
        .map_err(in_file(&path))?;
    debug!(curve = vol.name(), pillars = vol.len(), "vol curve loaded");
    market.insert_vol_curve(vol)?;

    let path = config.data_path(&config.bond_price_file);
    for (name, price) in parse_price_file(&read_input(&path)?).map_err(in_file(&path))? {
        market.insert_bond_price(name, price);
    }

    let path = config.data_path(&config.stock_price_file);
    for (name, price) in parse_price_file(&read_input(&path)?).map_err(in_file(&path))? {
        market.insert_stock_price(name, price);
    }

    info!(
        as_of = %as_of,
        curves = market.curve_names().count(),
        vol_curves = market.vol_curve_names().count(),
        "market loaded"
    );
    Ok(market)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn as_of() -> Date {
        Date::from_ymd(2024, 1, 1).unwrap()
    }

    // ========================================
    // Tenors
    // ========================================

    #[test]
    fn test_tenor_days() {
        let t0 = as_of();
        for (code, days) in [
            ("ON", 1),
            ("3M", 91),
            ("6M", 183),
            ("9M", 274),
            ("1Y", 365),
            ("2Y", 730),
            ("5Y", 1825),
            ("10Y", 3650),
        ] {
            assert_eq!(tenor_date(t0, code).unwrap() - t0, days, "tenor {}", code);
        }
    }

    #[test]
    fn test_tenor_is_case_insensitive() {
        assert_eq!(tenor_date(as_of(), "1y").unwrap(), tenor_date(as_of(), "1Y").unwrap());
    }

    #[test]
    fn test_tenor_pillar_dates() {
        let t0 = Date::from_ymd(2024, 1, 1).unwrap();
        assert_eq!(tenor_date(t0, "ON").unwrap(), Date::from_ymd(2024, 1, 2).unwrap());
        assert_eq!(tenor_date(t0, " 6m ").unwrap(), Date::from_ymd(2024, 7, 2).unwrap());
        assert_eq!(tenor_date(t0, "10Y").unwrap(), Date::from_ymd(2033, 12, 29).unwrap());
    }

    #[test]
    fn test_unknown_tenor_rejected() {
        assert!(matches!(tenor_date(as_of(), "4M"), Err(CliError::Load(_))));
    }

    // ========================================
    // Curve files
    // ========================================

    #[test]
    fn test_parse_rate_curve() {
        let curve = parse_rate_curve("USD-SOFR\nON:5.30%\n\n3M:5.35%\n1Y: 5.10 %\n", as_of()).unwrap();

        assert_eq!(curve.name(), "USD-SOFR");
        assert_eq!(curve.len(), 3);
        assert_relative_eq!(curve.rate(as_of()), 0.053, epsilon = 1e-12);
        assert_relative_eq!(curve.rate(as_of().add_days(365).unwrap()), 0.051, epsilon = 1e-12);
    }

    #[test]
    fn test_rate_curve_requires_name_line() {
        let result = parse_rate_curve("ON:5.30%\n3M:5.35%\n", as_of());
        assert!(matches!(result, Err(CliError::Load(_))));
    }

    #[test]
    fn test_bad_percentage_reports_line() {
        let err = parse_rate_curve("SGD-SORA\nON:3.1%\n3M:abc%\n", as_of()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);
    }

    #[test]
    fn test_parse_vol_curve_uses_given_name() {
        let vol = parse_vol_curve("# implied vols\n3M:20%\n1Y:25%\n", "LOGVOL", as_of()).unwrap();
        assert_eq!(vol.name(), "LOGVOL");
        assert_eq!(vol.len(), 2);
        assert_relative_eq!(vol.vol(as_of()), 0.20, epsilon = 1e-12);
    }

    // ========================================
    // Price files
    // ========================================

    #[test]
    fn test_parse_price_file() {
        let prices = parse_price_file("aapl:190.5\nSGD-GOV-5Y:101.25\n").unwrap();
        assert_eq!(
            prices,
            vec![("AAPL".to_string(), 190.5), ("SGD-GOV-5Y".to_string(), 101.25)]
        );
    }

    #[test]
    fn test_price_without_separator_rejected() {
        assert!(parse_price_file("AAPL 190.5\n").is_err());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = read_input(Path::new("/nonexistent/usd_sofr.txt"));
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
