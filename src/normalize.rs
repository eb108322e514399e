//! Numeric normalization for raw form fields
//!
//! Every field the caller hands over may be missing, blank, typed text or an
//! already-parsed number. Normalization turns any of those into a finite
//! number and never fails: anything unreadable becomes `0`.
//!
//! ```
//! use order_price::normalize::{parse_num, RawValue};
//!
//! assert_eq!(parse_num(&RawValue::from("1,5")), 1.5);
//! assert_eq!(parse_num(&RawValue::from("")), 0.0);
//! assert_eq!(parse_num(&RawValue::Absent), 0.0);
//! assert_eq!(parse_num(&RawValue::from("abc")), 0.0);
//! ```

use serde::{Deserialize, Serialize};

/// A raw field value as supplied by the form layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Already numeric
    Number(f64),
    /// Typed text, parsed leniently
    Text(String),
    /// Field never filled in
    #[default]
    Absent,
}

impl RawValue {
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Absent => true,
            RawValue::Text(s) => s.is_empty(),
            RawValue::Number(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<&String> for RawValue {
    fn from(s: &String) -> Self {
        RawValue::Text(s.clone())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<u32> for RawValue {
    fn from(n: u32) -> Self {
        RawValue::Number(f64::from(n))
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(RawValue::Absent)
    }
}

/// Parse a raw value into a finite number, `0` on anything unreadable
pub fn parse_num(raw: &RawValue) -> f64 {
    match raw {
        RawValue::Absent => 0.0,
        RawValue::Number(n) => finite_or_zero(*n),
        RawValue::Text(s) => parse_str(s),
    }
}

/// Parse typed text; `,` is read as a decimal point
pub fn parse_str(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.replace(',', ".")
        .parse::<f64>()
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

/// Clamp to a finite, non-negative number
pub fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

/// `parse_num` followed by `non_negative`
pub fn non_negative_num(raw: &RawValue) -> f64 {
    non_negative(parse_num(raw))
}

/// Parse a quantity field: non-negative, fractional part dropped
pub fn parse_quantity(raw: &RawValue) -> u32 {
    let q = non_negative_num(raw).trunc();
    if q >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        q as u32
    }
}

/// Keep only digits and `.`, as the size and weight inputs do while typing
pub fn keep_decimal_chars(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Canonical text of a numeric field (`"0012.0"` becomes `"12"`)
pub fn canonical_number_text(text: &str) -> String {
    parse_str(text).to_string()
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_is_decimal_point() {
        assert_eq!(parse_str("1,5"), 1.5);
        assert_eq!(parse_str("12,25"), 12.25);
    }

    #[test]
    fn test_unreadable_text_is_zero() {
        assert_eq!(parse_str(""), 0.0);
        assert_eq!(parse_str("   "), 0.0);
        assert_eq!(parse_str("abc"), 0.0);
        assert_eq!(parse_str("1,5,0"), 0.0);
        assert_eq!(parse_str("12kg"), 0.0);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(parse_str("inf"), 0.0);
        assert_eq!(parse_str("NaN"), 0.0);
        assert_eq!(parse_num(&RawValue::Number(f64::INFINITY)), 0.0);
        assert_eq!(parse_num(&RawValue::Number(f64::NAN)), 0.0);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_str(" 180 "), 180.0);
    }

    #[test]
    fn test_negative_parses_but_clamps() {
        assert_eq!(parse_str("-5"), -5.0);
        assert_eq!(non_negative_num(&RawValue::from("-5")), 0.0);
        assert_eq!(non_negative(-0.0), 0.0);
    }

    #[test]
    fn test_quantity_truncates() {
        assert_eq!(parse_quantity(&RawValue::from("3")), 3);
        assert_eq!(parse_quantity(&RawValue::from("2,7")), 2);
        assert_eq!(parse_quantity(&RawValue::from("-4")), 0);
        assert_eq!(parse_quantity(&RawValue::Absent), 0);
        assert_eq!(parse_quantity(&RawValue::Number(1e12)), u32::MAX);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(RawValue::from(None::<f64>), RawValue::Absent);
        assert_eq!(RawValue::from(Some(2.0)), RawValue::Number(2.0));
        assert!(RawValue::from("").is_blank());
        assert!(!RawValue::from(0.0).is_blank());
    }

    #[test]
    fn test_decimal_chars_filter() {
        assert_eq!(keep_decimal_chars("12,5 cm"), "125");
        assert_eq!(keep_decimal_chars("1.5kg"), "1.5");
    }

    #[test]
    fn test_canonical_text() {
        assert_eq!(canonical_number_text("0012.0"), "12");
        assert_eq!(canonical_number_text("1.50"), "1.5");
        assert_eq!(canonical_number_text("."), "0");
    }

    #[test]
    fn test_raw_value_from_json() {
        let values: Vec<RawValue> = serde_json::from_str(r#"[1.5, "2,5", null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                RawValue::Number(1.5),
                RawValue::Text("2,5".to_string()),
                RawValue::Absent
            ]
        );
    }
}
