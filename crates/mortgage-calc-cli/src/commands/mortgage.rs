use clap::Args;
use serde_json::{json, Value};

use mortgage_calc_core::{
    analyze_mortgage, field_status, is_ready, FieldName, FieldStatus, MortgageInput, RULES,
};

use crate::input;

/// Arguments for a mortgage calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CalculateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal amount in dollars
    #[arg(long, default_value = "300000")]
    pub principal: String,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate", default_value = "5.5")]
    pub interest: String,

    /// Loan term in years
    #[arg(long, alias = "term", default_value = "30")]
    pub years: String,
}

/// Arguments for field-by-field validation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CheckArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal amount in dollars
    #[arg(long, default_value = "")]
    pub principal: String,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate", default_value = "")]
    pub interest: String,

    /// Loan term in years
    #[arg(long, alias = "term", default_value = "")]
    pub years: String,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fallback = MortgageInput::new(args.principal, args.interest, args.years);
    let mortgage_input = resolve_input(args.input.as_deref(), fallback)?;
    calculate_value(&mortgage_input)
}

pub fn run_check(args: CheckArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fallback = MortgageInput::new(args.principal, args.interest, args.years);
    let mortgage_input = resolve_input(args.input.as_deref(), fallback)?;
    Ok(check_value(&mortgage_input))
}

pub fn run_rules() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(rules_value())
}

fn resolve_input(
    path: Option<&str>,
    fallback: MortgageInput,
) -> Result<MortgageInput, Box<dyn std::error::Error>> {
    select_input(path, input::stdin::read_stdin, fallback)
}

/// `--input` file first, then piped JSON, then the flags. `piped` is only
/// consulted when no file is given.
fn select_input<F>(
    path: Option<&str>,
    piped: F,
    fallback: MortgageInput,
) -> Result<MortgageInput, Box<dyn std::error::Error>>
where
    F: FnOnce() -> Result<Option<Value>, Box<dyn std::error::Error>>,
{
    if let Some(path) = path {
        log::info!("reading input from {path}");
        return input::file::read_json(path);
    }
    if let Some(data) = piped()? {
        log::info!("reading input from stdin");
        return Ok(serde_json::from_value(data)?);
    }
    Ok(fallback)
}

fn calculate_value(input: &MortgageInput) -> Result<Value, Box<dyn std::error::Error>> {
    let result = analyze_mortgage(input)?;
    Ok(serde_json::to_value(result)?)
}

fn check_value(input: &MortgageInput) -> Value {
    let results: Vec<Value> = FieldName::ALL
        .iter()
        .map(|&field| {
            let (status, value, message) = match field_status(input.raw(field), field) {
                FieldStatus::Empty => ("empty", Value::Null, Value::Null),
                FieldStatus::Valid(v) => ("valid", json!(v.to_string()), Value::Null),
                FieldStatus::Invalid(failure) => {
                    ("error", Value::Null, json!(failure.to_string()))
                }
            };
            json!({
                "field": field.key(),
                "status": status,
                "value": value,
                "message": message,
            })
        })
        .collect();

    json!({
        "results": results,
        "ready": is_ready(input),
    })
}

fn rules_value() -> Value {
    let results: Vec<Value> = RULES
        .iter()
        .map(|rule| {
            json!({
                "field": rule.field.key(),
                "description": rule.field.description(),
                "min": rule.min.to_string(),
                "max": rule.max.to_string(),
            })
        })
        .collect();

    json!({ "results": results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn flags() -> MortgageInput {
        MortgageInput::new("300000", "5.5", "30")
    }

    fn no_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
        panic!("stdin must not be read when --input is given")
    }

    #[test]
    fn test_input_file_wins_over_stdin_and_flags() {
        let path = std::env::temp_dir()
            .join(format!("mortgage-select-{}.json", std::process::id()));
        fs::write(&path, r#"{"principal": "150000", "interest": "4", "years": "15"}"#).unwrap();

        let selected = select_input(path.to_str(), no_stdin, flags());
        fs::remove_file(&path).unwrap();

        assert_eq!(selected.unwrap(), MortgageInput::new("150000", "4", "15"));
    }

    #[test]
    fn test_missing_input_file_does_not_fall_back() {
        let err = select_input(Some("no/such/mortgage.json"), no_stdin, flags()).unwrap_err();
        assert!(err.to_string().starts_with("File not found:"));
    }

    #[test]
    fn test_piped_json_wins_over_flags() {
        let piped = || {
            input::stdin::parse_piped(r#"{"principal": 200000, "interest": 6, "years": 20}"#)
        };
        let selected = select_input(None, piped, flags()).unwrap();
        assert_eq!(selected, MortgageInput::new("200000", "6", "20"));
    }

    #[test]
    fn test_flags_used_without_file_or_stdin() {
        let selected = select_input(None, || input::stdin::parse_piped(""), flags()).unwrap();
        assert_eq!(selected, flags());
    }

    #[test]
    fn test_malformed_piped_json_is_an_error() {
        let piped = || input::stdin::parse_piped("not json");
        assert!(select_input(None, piped, flags()).is_err());
    }

    #[test]
    fn test_calculate_value_envelope() {
        let input = MortgageInput::new("300000", "5.5", "30");
        let value = calculate_value(&input).unwrap();
        assert_eq!(value["result"]["total_payments"], "360");
        assert_eq!(
            value["methodology"],
            "Fixed-rate amortization (monthly compounding)"
        );
    }

    #[test]
    fn test_calculate_value_reports_invalid_fields() {
        let input = MortgageInput::new("300000", "abc", "30");
        let err = calculate_value(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: interest: Please enter a valid number"
        );
    }

    #[test]
    fn test_check_value_statuses() {
        let input = MortgageInput::new("300000", "", "45");
        let value = check_value(&input);

        assert_eq!(value["ready"], false);
        assert_eq!(value["results"][0]["status"], "valid");
        assert_eq!(value["results"][0]["value"], "300000");
        assert_eq!(value["results"][1]["status"], "empty");
        assert_eq!(value["results"][2]["status"], "error");
        assert_eq!(
            value["results"][2]["message"],
            "Please enter a value between 1 and 30"
        );
    }

    #[test]
    fn test_rules_value_lists_all_fields() {
        let value = rules_value();
        let rows = value["results"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["field"], "interest");
        assert_eq!(rows[1]["min"], "0.1");
        assert_eq!(rows[1]["max"], "30");
    }
}
