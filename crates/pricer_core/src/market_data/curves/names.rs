//! Well-known market identifiers.

/// USD overnight-funding discount curve.
pub const USD_SOFR: &str = "USD-SOFR";

/// SGD overnight-funding discount curve.
pub const SGD_SORA: &str = "SGD-SORA";

/// Lognormal equity volatility curve.
pub const LOGVOL: &str = "LOGVOL";

/// Returns the discounting curve for an ISO currency prefix.
///
/// Only the leading three characters are inspected, so an instrument code
/// such as `"USD-GOV-2Y"` resolves like `"USD"`.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::names::discount_curve_for;
///
/// assert_eq!(discount_curve_for("usd-gov-2y"), Some("USD-SOFR"));
/// assert_eq!(discount_curve_for("SGD"), Some("SGD-SORA"));
/// assert_eq!(discount_curve_for("EUR"), None);
/// ```
pub fn discount_curve_for(code: &str) -> Option<&'static str> {
    let prefix = code.trim().get(..3)?.to_ascii_uppercase();
    match prefix.as_str() {
        "USD" => Some(USD_SOFR),
        "SGD" => Some(SGD_SORA),
        _ => None,
    }
}
