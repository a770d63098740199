//! Tests for `parse` module

use super::parse::*;

#[test]
fn test_int_strict() {
    assert_eq!(parse_int_like("4"), Some(4));
    assert_eq!(parse_int_like("  12\t"), Some(12));
    assert_eq!(parse_int_like("-2"), Some(-2));
}

#[test]
fn test_int_float_forms() {
    assert_eq!(parse_int_like("3.0"), Some(3));
    assert_eq!(parse_int_like("1,250"), Some(1250));
    assert_eq!(parse_int_like("1,250.0"), Some(1250));
}

#[test]
fn test_int_fractional_falls_back_to_leading_numeral() {
    // "2.5" is not integral; the first integer literal wins.
    assert_eq!(parse_int_like("2.5"), Some(2));
}

#[test]
fn test_int_embedded_numeral() {
    assert_eq!(parse_int_like("3 beds"), Some(3));
    assert_eq!(parse_int_like("approx. -1"), Some(-1));
}

#[test]
fn test_int_absent() {
    for raw in ["", "   ", "n/a", "none", "beds"] {
        assert_eq!(parse_int_like(raw), None, "{raw:?}");
    }
}

#[test]
fn test_price_currency_and_separators() {
    assert_eq!(parse_price_like("$1,234,567"), Some(1_234_567.0));
    assert_eq!(parse_price_like(" 99.95 "), Some(99.95));
    assert_eq!(parse_price_like("0"), Some(0.0));
}

#[test]
fn test_price_missing_markers() {
    for raw in ["", "NA", "n/a", "None", "NULL", "-", " $ "] {
        assert_eq!(parse_price_like(raw), None, "{raw:?}");
    }
}

#[test]
fn test_price_non_finite_is_missing() {
    assert_eq!(parse_price_like("inf"), None);
    assert_eq!(parse_price_like("NaN"), None);
}

#[test]
fn test_price_embedded_numeral() {
    assert_eq!(parse_price_like("sold for 250000"), Some(250_000.0));
    assert_eq!(parse_price_like("call agent"), None);
}

#[test]
fn test_negative_price_parses() {
    // Rejecting negatives is the index's job, not the parser's.
    assert_eq!(parse_price_like("-5000"), Some(-5000.0));
}
