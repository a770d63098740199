//! Lenient numeric parsing for raw attribute cells.
//!
//! Source data carries values such as `"4"`, `"4.0"`, `"1,250"`,
//! `"$320,000"` or `"3 beds"`. Each parser tries a strict parse first, then
//! strips separators (and currency symbols for prices), then falls back to the
//! first integer literal embedded in the text. Absence is `None`, never an
//! error.

use std::sync::LazyLock;

use regex::Regex;

static INT_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("integer literal pattern is valid"));

/// Placeholder cells treated as missing prices.
const MISSING_MARKERS: [&str; 5] = ["na", "n/a", "none", "null", "-"];

/// Parses an integer-like cell (bedroom or bath counts).
///
/// # Example
///
/// ```
/// use homefinder_core::parse::parse_int_like;
///
/// assert_eq!(parse_int_like(" 4 "), Some(4));
/// assert_eq!(parse_int_like("2.0"), Some(2));
/// assert_eq!(parse_int_like("1,000"), Some(1000));
/// assert_eq!(parse_int_like("3 beds"), Some(3));
/// assert_eq!(parse_int_like("n/a"), None);
/// ```
#[must_use]
pub fn parse_int_like(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    if let Ok(f) = s.replace(',', "").parse::<f64>() {
        if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            return Some(f as i64);
        }
    }
    leading_integer(s)
}

/// Parses a currency-like cell (sale price).
///
/// Non-finite results (`"inf"`, `"NaN"`) are treated as missing.
///
/// # Example
///
/// ```
/// use homefinder_core::parse::parse_price_like;
///
/// assert_eq!(parse_price_like("$320,000"), Some(320_000.0));
/// assert_eq!(parse_price_like("1250.50"), Some(1250.5));
/// assert_eq!(parse_price_like("N/A"), None);
/// assert_eq!(parse_price_like("about 99000 USD"), Some(99_000.0));
/// ```
#[must_use]
pub fn parse_price_like(raw: &str) -> Option<f64> {
    let s = raw.trim().replace([',', '$'], "");
    if s.is_empty() || MISSING_MARKERS.contains(&s.to_lowercase().as_str()) {
        return None;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => None,
        Err(_) => leading_integer(&s).map(|v| v as f64),
    }
}

/// First integer literal (optionally signed) embedded in `s`.
fn leading_integer(s: &str) -> Option<i64> {
    INT_LITERAL.find(s)?.as_str().parse().ok()
}
