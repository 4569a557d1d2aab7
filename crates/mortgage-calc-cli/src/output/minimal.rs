use serde_json::Value;

use super::currency;

/// Fields that answer the question, in priority order.
const PRIORITY_KEYS: [&str; 3] = ["monthly_payment", "ready", "total_amount"];

/// Print just the key answer value from the output.
///
/// Looks for well-known fields in priority order, then falls back to the
/// first field of the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return format_minimal("", result_obj);
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return format_minimal(key, val);
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, format_minimal(key, val)),
        None => String::new(),
    }
}

fn format_minimal(key: &str, value: &Value) -> String {
    if let Some(display) = currency::format_field(key, value) {
        return display;
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_is_the_answer() {
        let value = json!({
            "result": {
                "monthly_payment": "1703.367004041008807508293335",
                "total_payments": "360",
            },
            "methodology": "Fixed-rate amortization (monthly compounding)",
        });
        assert_eq!(minimal_line(&value), "$1,703");
    }

    #[test]
    fn test_check_output_reports_readiness() {
        let value = json!({ "results": [], "ready": true });
        assert_eq!(minimal_line(&value), "true");
    }
}
