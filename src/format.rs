//! Display formatting (Vietnamese locale)
//!
//! Presentation only. Rounding happens here and nowhere in the calculation.
//! - Money: `1.944.000 ₫` (dot grouping, no decimals)
//! - Numbers: `1.234,5` (dot grouping, comma decimal, up to 3 decimals)
//! - Dates: `19/10/2026`

use crate::calculator::CalculationResult;
use chrono::NaiveDate;
use std::fmt::Write;

/// Format an amount of VND as currency
pub fn format_vnd(amount: f64) -> String {
    format!("{}\u{a0}₫", format_decimal(amount, 0))
}

/// Format a plain number with up to three decimals
pub fn format_number(value: f64) -> String {
    format_decimal(value, 3)
}

/// Day/month/year without padding, as the vi-VN locale writes dates
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

fn format_decimal(value: f64, max_fraction_digits: usize) -> String {
    if value.is_nan() {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let fixed = format!("{:.*}", max_fraction_digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::new();
    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Plain-text breakdown in the four sections of the order form
pub fn render_quote(result: &CalculationResult, date: NaiveDate) -> String {
    let mut out = String::new();
    let row = |out: &mut String, label: &str, value: String| {
        let _ = writeln!(out, "  {:<34} {:>22}", label, value);
    };

    let _ = writeln!(
        out,
        "{}  ·  {} VND / 1¥",
        format_date(date),
        format_number(result.exchange_rate)
    );
    out.push('\n');

    out.push_str("1) Product\n");
    row(&mut out, "Order total (¥)", format!("{}¥", format_number(result.order_total_yen)));
    row(&mut out, "Quantity", result.quantity.to_string());
    row(
        &mut out,
        "Service fee",
        format!(
            "{} ({}¥)",
            format_vnd(result.service_fee_vnd),
            format_number(result.service_fee_yen)
        ),
    );
    row(&mut out, "Fee rule", result.fee_tier.to_string());
    row(&mut out, "Price VND (estimate)", format_vnd(result.price_vnd));
    if result.bulk_quote_required {
        out.push_str("  ! Large quantity: please contact the shop to order.\n");
    }
    out.push('\n');

    out.push_str("2) Size & shipping\n");
    row(
        &mut out,
        "Estimated weight",
        format!("{} kg", format_number(result.package.weight_kg)),
    );
    row(
        &mut out,
        "Volumetric weight (L×W×H)",
        format!("{} kg", format_number(result.volumetric_weight_kg())),
    );
    out.push('\n');

    out.push_str("3) Breakdown\n");
    row(&mut out, "1) Base price", format_vnd(result.base_vnd));
    row(
        &mut out,
        "2) Service fee",
        format!(
            "{} ({}¥)",
            format_vnd(result.service_fee_vnd),
            format_number(result.service_fee_yen)
        ),
    );
    row(&mut out, "3) Surcharge", format_vnd(result.surcharge_vnd));
    row(
        &mut out,
        "4) Seller shipping (¥)",
        format!(
            "{}¥ ({})",
            format_number(result.seller_ship_yen),
            format_vnd(result.seller_ship_vnd)
        ),
    );
    row(&mut out, "5) Japan–Vietnam shipping", format_vnd(result.ship_jp_vn_vnd));
    row(&mut out, "6) Vietnam local shipping", format_vnd(result.ship_local_vnd));
    out.push('\n');

    out.push_str("4) Total payable\n");
    row(&mut out, "TOTAL", format_vnd(result.total_vnd));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{calculate, QuoteFields};
    use crate::normalize::RawValue;

    #[test]
    fn test_vnd() {
        assert_eq!(format_vnd(1_944_000.0), "1.944.000\u{a0}₫");
        assert_eq!(format_vnd(0.0), "0\u{a0}₫");
        assert_eq!(format_vnd(999.6), "1.000\u{a0}₫");
        assert_eq!(format_vnd(90_000.02), "90.000\u{a0}₫");
    }

    #[test]
    fn test_number() {
        assert_eq!(format_number(1.5), "1,5");
        assert_eq!(format_number(500.02), "500,02");
        assert_eq!(format_number(25_000.0), "25.000");
        assert_eq!(format_number(1234567.891), "1.234.567,891");
        assert_eq!(format_number(0.0001), "0");
        assert_eq!(format_number(-1500.25), "-1.500,25");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "0");
        assert_eq!(format_vnd(f64::INFINITY), "∞\u{a0}₫");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn test_overflowing_total_is_not_shown_as_zero() {
        let fields = QuoteFields {
            exchange_rate: RawValue::from("180"),
            order_total_yen: RawValue::from("1e308"),
            ..QuoteFields::default()
        };
        let result = calculate(&fields);
        assert!(result.total_vnd.is_infinite());

        let text = render_quote(&result, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let total_line = text.lines().find(|l| l.contains("TOTAL")).unwrap();
        assert!(total_line.ends_with("∞\u{a0}₫"), "{}", total_line);
    }

    #[test]
    fn test_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(date), "5/1/2026");
    }

    #[test]
    fn test_render_quote_sections() {
        let fields = QuoteFields {
            exchange_rate: RawValue::from("180"),
            order_total_yen: RawValue::from("10000"),
            quantity: RawValue::from("12"),
            ..QuoteFields::default()
        };
        let text = render_quote(
            &calculate(&fields),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        );
        assert!(text.starts_with("19/10/2026  ·  180 VND / 1¥"));
        for section in ["1) Product", "2) Size & shipping", "3) Breakdown", "4) Total payable"] {
            assert!(text.contains(section), "missing {}", section);
        }
        assert!(text.contains("please contact the shop"));
        // 10000 + 300 * 12 = 13600 yen, times 180
        assert!(text.contains("2.448.000\u{a0}₫"));
    }
}
