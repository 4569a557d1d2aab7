use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Fields shown as whole dollars in human-readable output.
const MONEY_FIELDS: [&str; 4] = ["monthly_payment", "total_amount", "total_interest", "principal"];

/// Fields shown as grouped counts.
const COUNT_FIELDS: [&str; 1] = ["total_payments"];

/// Whole US dollars with thousands separators, half away from zero:
/// `1703.37` -> `$1,703`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = group_thousands(&rounded.abs().normalize().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Grouped count with at most three fraction digits: `12345` -> `12,345`.
pub fn format_count(count: Decimal) -> String {
    let rounded = count
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = group_thousands(int_part);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.insert(0, '-');
    }
    out
}

/// Display form of a known monetary or count field, `None` for anything else.
pub fn format_field(key: &str, value: &Value) -> Option<String> {
    let amount = as_decimal(value)?;
    if MONEY_FIELDS.contains(&key) {
        Some(format_currency(amount))
    } else if COUNT_FIELDS.contains(&key) {
        Some(format_count(amount))
    } else {
        None
    }
}

// Decimals arrive as strings (serde-with-str); plain numbers are accepted too.
fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_currency_whole_dollars() {
        assert_eq!(format_currency(dec!(1703.367004)), "$1,703");
        assert_eq!(format_currency(dec!(613212.1214)), "$613,212");
        assert_eq!(format_currency(dec!(1000000)), "$1,000,000");
        assert_eq!(format_currency(dec!(83.38)), "$83");
        assert_eq!(format_currency(Decimal::ZERO), "$0");
    }

    #[test]
    fn test_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(999.5)), "$1,000");
        assert_eq!(format_currency(dec!(0.5)), "$1");
        assert_eq!(format_currency(dec!(-1234.5)), "-$1,235");
        assert_eq!(format_currency(dec!(-0.4)), "$0");
    }

    #[test]
    fn test_count_grouping() {
        assert_eq!(format_count(dec!(360)), "360");
        assert_eq!(format_count(dec!(12345)), "12,345");
        assert_eq!(format_count(dec!(12.12)), "12.12");
        assert_eq!(format_count(dec!(1234.56789)), "1,234.568");
    }

    #[test]
    fn test_format_field_by_key() {
        assert_eq!(
            format_field("monthly_payment", &json!("1703.367")),
            Some("$1,703".to_string())
        );
        assert_eq!(
            format_field("total_payments", &json!("360")),
            Some("360".to_string())
        );
        assert_eq!(format_field("years", &json!("30")), None);
        assert_eq!(format_field("total_amount", &json!(null)), None);
    }
}
