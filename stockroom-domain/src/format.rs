//! Price display formatting.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::validation::{parse_decimal, parse_float};

/// Format price text as US currency.
///
/// Numbers too large for `Decimal` are formatted from their `f64` value.
/// Text that does not parse as a finite number is returned unchanged.
///
/// ```
/// # use stockroom_domain::format_price;
/// assert_eq!(format_price("1234.5"), "$1,234.50");
/// assert_eq!(format_price("n/a"), "n/a");
/// ```
pub fn format_price(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(amount) = parse_decimal(trimmed) {
        return format_amount(amount);
    }
    match parse_float(trimmed) {
        Some(value) if value.is_finite() => {
            group_currency(value.is_sign_negative(), &format!("{:.2}", value.abs()))
        },
        _ => text.to_string(),
    }
}

/// Format an amount as US currency with two decimals and thousands separators.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    group_currency(negative, &rounded.abs().to_string())
}

/// Render unsigned `whole.cents` digits with a sign, `$` and thousands separators.
fn group_currency(negative: bool, digits: &str) -> String {
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("12"), "$12.00");
        assert_eq!(format_price("12.5"), "$12.50");
        assert_eq!(format_price("999.999"), "$1,000.00");
        assert_eq!(format_price("1000000"), "$1,000,000.00");
        assert_eq!(format_price(" 42.10 "), "$42.10");
    }

    #[test]
    fn test_format_price_passthrough() {
        assert_eq!(format_price("abc"), "abc");
        assert_eq!(format_price(""), "");
        assert_eq!(format_price("1_000"), "1_000");
        assert_eq!(format_price("1e400"), "1e400");
    }

    #[test]
    fn test_format_price_beyond_decimal_range() {
        // Nearest f64 to 1e29
        assert_eq!(format_price("1e29"), "$99,999,999,999,999,991,433,150,857,216.00");

        assert!(format_price("-1e29").starts_with("-$"));
    }

    #[test]
    fn test_format_price_out_of_range_still_formats() {
        assert_eq!(format_price("0"), "$0.00");
        assert_eq!(format_price("2500000"), "$2,500,000.00");
    }

    #[test]
    fn test_format_amount_rounding() {
        assert_eq!(format_amount(dec!(0.005)), "$0.01");
        assert_eq!(format_amount(dec!(0.004)), "$0.00");
        assert_eq!(format_amount(dec!(1.125)), "$1.13");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(dec!(-1234.5)), "-$1,234.50");
        assert_eq!(format_amount(dec!(-0.001)), "$0.00");
    }
}
