pub mod calculator;
pub mod error;
pub mod evaluation;
pub mod types;
pub mod validation;

pub use calculator::{calculate, MortgageResult};
pub use error::MortgageCalcError;
pub use evaluation::{
    analyze_mortgage, field_status, is_ready, validate_all, FieldStatus, MortgageInput,
    ValidatedInput,
};
pub use types::*;
pub use validation::{
    validate, FieldError, FieldName, FieldRule, ValidationFailure, ValidationResult, RULES,
};

/// Standard result type for all mortgage-calc operations
pub type MortgageCalcResult<T> = Result<T, MortgageCalcError>;
