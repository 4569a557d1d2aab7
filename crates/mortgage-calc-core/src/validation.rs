//! Range validation for the three raw loan inputs.
//!
//! Each field has a static inclusive range. Raw text is parsed as a
//! locale-agnostic decimal (optional sign, optional fraction, optional
//! exponent) and checked against its field's rule. Failures are values,
//! and their `Display` output is the exact message shown to the user.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// The three inputs of a mortgage calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "principal")]
    Principal,
    #[serde(rename = "interest")]
    InterestRate,
    #[serde(rename = "years")]
    Years,
}

impl FieldName {
    /// All fields, in form order.
    pub const ALL: [FieldName; 3] = [
        FieldName::Principal,
        FieldName::InterestRate,
        FieldName::Years,
    ];

    /// The inclusive range rule that applies to this field.
    pub fn rule(self) -> FieldRule {
        match self {
            FieldName::Principal => PRINCIPAL_RULE,
            FieldName::InterestRate => INTEREST_RATE_RULE,
            FieldName::Years => YEARS_RULE,
        }
    }

    /// Short key used in serialized output.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Principal => "principal",
            FieldName::InterestRate => "interest",
            FieldName::Years => "years",
        }
    }

    /// Human-readable label for accessibility and help text.
    pub fn description(self) -> &'static str {
        match self {
            FieldName::Principal => "Principal amount in dollars",
            FieldName::InterestRate => "Annual interest rate in percentage",
            FieldName::Years => "Loan term in years",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Inclusive numeric range for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: FieldName,
    pub min: Decimal,
    pub max: Decimal,
}

impl FieldRule {
    /// True when `value` lies within `[min, max]`.
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const PRINCIPAL_RULE: FieldRule = FieldRule {
    field: FieldName::Principal,
    min: dec!(1000),
    max: dec!(1000000),
};

pub const INTEREST_RATE_RULE: FieldRule = FieldRule {
    field: FieldName::InterestRate,
    min: dec!(0.1),
    max: dec!(30),
};

pub const YEARS_RULE: FieldRule = FieldRule {
    field: FieldName::Years,
    min: dec!(1),
    max: dec!(30),
};

/// Every rule, in form order.
pub const RULES: [FieldRule; 3] = [PRINCIPAL_RULE, INTEREST_RATE_RULE, YEARS_RULE];

// ---------------------------------------------------------------------------
// Validation outcome types
// ---------------------------------------------------------------------------

/// Why a raw value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFailure {
    #[error("Please enter a valid number")]
    NotANumber,

    #[error("Please enter a value between {min} and {max}")]
    OutOfRange { min: Decimal, max: Decimal },
}

/// Parsed value on success, reason on failure.
pub type ValidationResult = Result<Decimal, ValidationFailure>;

/// A validation failure attributed to the field it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FieldName,
    pub failure: ValidationFailure,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.failure)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate a raw input string against the rule for `field`.
///
/// Empty text is not a number. A well-formed number too large or too small
/// to represent lies outside every rule and is reported as out of range.
pub fn validate(raw: &str, field: FieldName) -> ValidationResult {
    let rule = field.rule();
    let out_of_range = ValidationFailure::OutOfRange {
        min: rule.min,
        max: rule.max,
    };

    let value = match parse_number(raw) {
        ParsedNumber::Value(v) => v,
        ParsedNumber::Unrepresentable => {
            log::debug!("{field}: {raw:?} is outside the representable range");
            return Err(out_of_range);
        }
        ParsedNumber::Invalid => {
            log::debug!("{field}: {raw:?} is not a number");
            return Err(ValidationFailure::NotANumber);
        }
    };

    if !rule.contains(value) {
        log::debug!("{field}: {value} outside [{}, {}]", rule.min, rule.max);
        return Err(out_of_range);
    }

    Ok(value)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
enum ParsedNumber {
    Value(Decimal),
    /// Lexically a number, but beyond what `Decimal` can hold.
    Unrepresentable,
    Invalid,
}

/// Grammar: `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`
fn parse_number(raw: &str) -> ParsedNumber {
    let text = raw.trim();
    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };

    let (negative, unsigned) = split_sign(mantissa);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return ParsedNumber::Invalid;
    }
    if !is_digits(int_part) || !is_digits(frac_part) {
        return ParsedNumber::Invalid;
    }

    let exponent = match exponent {
        None => None,
        Some(exp) => {
            let (exp_negative, exp_digits) = split_sign(exp);
            if exp_digits.is_empty() || !is_digits(exp_digits) {
                return ParsedNumber::Invalid;
            }
            Some(if exp_negative {
                format!("-{exp_digits}")
            } else {
                exp_digits.to_string()
            })
        }
    };

    let sign = if negative { "-" } else { "" };
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let canonical = if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    };

    // The grammar is already checked, so any error here is overflow or
    // excess precision.
    let parsed = match exponent {
        None => Decimal::from_str(&canonical),
        Some(exp) => Decimal::from_scientific(&format!("{canonical}e{exp}")),
    };

    match parsed {
        Ok(v) => ParsedNumber::Value(v),
        Err(_) => ParsedNumber::Unrepresentable,
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}
