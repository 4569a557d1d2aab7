//! From raw form text to a computed mortgage.
//!
//! Mirrors what a front end does when the user edits a field or asks for a
//! result: trim, validate every field, and only compute once all three pass.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Instant;

use crate::calculator::{calculate, MortgageResult};
use crate::error::MortgageCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::validation::{validate, FieldError, FieldName, ValidationFailure};
use crate::MortgageCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Raw, unvalidated text for each field.
///
/// JSON may carry each field as a string or a number; numbers are kept as
/// their text so both forms go through the same validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageInput {
    #[serde(default, deserialize_with = "raw_text")]
    pub principal: String,
    #[serde(default, deserialize_with = "raw_text")]
    pub interest: String,
    #[serde(default, deserialize_with = "raw_text")]
    pub years: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Text(String),
    Number(serde_json::Number),
}

fn raw_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawField::deserialize(deserializer)? {
        RawField::Text(text) => text,
        RawField::Number(n) => n.to_string(),
    })
}

impl MortgageInput {
    pub fn new(
        principal: impl Into<String>,
        interest: impl Into<String>,
        years: impl Into<String>,
    ) -> Self {
        Self {
            principal: principal.into(),
            interest: interest.into(),
            years: years.into(),
        }
    }

    /// The raw text entered for `field`.
    pub fn raw(&self, field: FieldName) -> &str {
        match field {
            FieldName::Principal => &self.principal,
            FieldName::InterestRate => &self.interest,
            FieldName::Years => &self.years,
        }
    }
}

/// All three fields, parsed and within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedInput {
    pub principal: Money,
    pub interest_rate: Percent,
    pub years: Years,
}

/// Feedback state for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Nothing entered; no validation attempted.
    Empty,
    Valid(Decimal),
    Invalid(ValidationFailure),
}

impl FieldStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldStatus::Valid(_))
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Per-field feedback: empty text stays neutral instead of failing.
pub fn field_status(raw: &str, field: FieldName) -> FieldStatus {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldStatus::Empty;
    }
    match validate(trimmed, field) {
        Ok(value) => FieldStatus::Valid(value),
        Err(failure) => FieldStatus::Invalid(failure),
    }
}

/// Validate every field and report all failures, in form order.
pub fn validate_all(input: &MortgageInput) -> Result<ValidatedInput, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut values = [Decimal::ZERO; 3];

    for (slot, field) in values.iter_mut().zip(FieldName::ALL) {
        match validate(input.raw(field).trim(), field) {
            Ok(value) => *slot = value,
            Err(failure) => errors.push(FieldError { field, failure }),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let [principal, interest_rate, years] = values;
    Ok(ValidatedInput {
        principal,
        interest_rate,
        years,
    })
}

/// True when every field is filled in and valid.
pub fn is_ready(input: &MortgageInput) -> bool {
    FieldName::ALL
        .iter()
        .all(|&field| field_status(input.raw(field), field).is_valid())
}

/// Validate the raw input and, if every field passes, compute the loan totals.
pub fn analyze_mortgage(
    input: &MortgageInput,
) -> MortgageCalcResult<ComputationOutput<MortgageResult>> {
    let start = Instant::now();

    let validated = validate_all(input).map_err(|errors| {
        log::debug!("rejected input: {} invalid field(s)", errors.len());
        MortgageCalcError::InvalidFields(errors)
    })?;

    let result = calculate(validated.principal, validated.interest_rate, validated.years)?;

    let mut warnings = Vec::new();
    if result.total_payments.fract() != Decimal::ZERO {
        warnings.push(format!(
            "Term of {} years gives a fractional number of payments ({})",
            validated.years, result.total_payments
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    log::debug!(
        "computed payment {} over {} payments in {elapsed}us",
        result.monthly_payment,
        result.total_payments
    );

    Ok(with_metadata(
        "Fixed-rate amortization (monthly compounding)",
        &validated,
        warnings,
        elapsed,
        result,
    ))
}
