use thiserror::Error;

use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum MortgageCalcError {
    #[error("Invalid input: {}", describe_field_errors(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },
}

fn describe_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
