//! Fixed-rate, fixed-term amortization totals.
//!
//! `payment = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate
//! and `n` the number of monthly payments. No rounding is applied; display
//! precision is the caller's concern. All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageCalcError;
use crate::types::{Money, Percent, Rate, Years};
use crate::MortgageCalcResult;

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Aggregate figures for one loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageResult {
    /// Fixed monthly payment.
    pub monthly_payment: Money,
    /// `years * 12`; fractional when the term is.
    pub total_payments: Decimal,
    /// Sum of all payments.
    pub total_amount: Money,
    /// Total paid above the principal.
    pub total_interest: Money,
}

/// Monthly periodic rate for a nominal annual percentage (5.5 -> 0.004583...).
pub fn monthly_rate(annual_interest_percent: Percent) -> Rate {
    annual_interest_percent / PERCENT / MONTHS_PER_YEAR
}

/// Compute the monthly payment and loan totals.
///
/// Precondition: the inputs have passed [`crate::validate`] for their
/// fields. Ranges are not re-checked here. A zero rate or zero term makes
/// the amortization denominator zero and returns
/// [`MortgageCalcError::DivisionByZero`]; inputs far outside the field
/// ranges may return [`MortgageCalcError::NumericOverflow`].
pub fn calculate(
    principal: Money,
    annual_interest_percent: Percent,
    years: Years,
) -> MortgageCalcResult<MortgageResult> {
    let r = monthly_rate(annual_interest_percent);
    let n = years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| overflow("number of payments"))?;

    let growth = (Decimal::ONE + r)
        .checked_powd(n)
        .ok_or_else(|| overflow("compound growth factor (1 + r)^n"))?;

    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(MortgageCalcError::DivisionByZero {
            context: "amortization factor: (1 + r)^n - 1 is zero".into(),
        });
    }

    let factor = r
        .checked_mul(growth)
        .and_then(|numerator| numerator.checked_div(denominator))
        .ok_or_else(|| overflow("amortization factor"))?;

    let monthly_payment = principal
        .checked_mul(factor)
        .ok_or_else(|| overflow("monthly payment"))?;
    let total_amount = monthly_payment
        .checked_mul(n)
        .ok_or_else(|| overflow("total amount"))?;
    let total_interest = total_amount
        .checked_sub(principal)
        .ok_or_else(|| overflow("total interest"))?;

    log::trace!(
        "P={principal} rate={annual_interest_percent}% years={years}: payment={monthly_payment} n={n}"
    );

    Ok(MortgageResult {
        monthly_payment,
        total_payments: n,
        total_amount,
        total_interest,
    })
}

fn overflow(context: &str) -> MortgageCalcError {
    MortgageCalcError::NumericOverflow {
        context: context.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_conversion() {
        // 6% nominal -> 0.5% per month
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
    }

    #[test]
    fn test_one_year_at_twelve_percent() {
        // r = 1%, n = 12 -> factor ≈ 0.0888488
        let result = calculate(dec!(100_000), dec!(12), dec!(1)).unwrap();
        assert_eq!(result.total_payments, dec!(12));
        assert!((result.monthly_payment - dec!(8884.88)).abs() < dec!(0.01));
    }

    #[test]
    fn test_totals_are_consistent() {
        let result = calculate(dec!(200_000), dec!(6), dec!(30)).unwrap();
        assert_eq!(
            result.total_amount,
            result.monthly_payment * result.total_payments
        );
        assert_eq!(result.total_interest, result.total_amount - dec!(200_000));
    }

    #[test]
    fn test_zero_rate_is_division_by_zero() {
        let err = calculate(dec!(100_000), dec!(0), dec!(10)).unwrap_err();
        assert!(matches!(err, MortgageCalcError::DivisionByZero { .. }));
    }

    #[test]
    fn test_zero_term_is_division_by_zero() {
        let err = calculate(dec!(100_000), dec!(5), dec!(0)).unwrap_err();
        assert!(matches!(err, MortgageCalcError::DivisionByZero { .. }));
    }

    #[test]
    fn test_fractional_term_keeps_fractional_payment_count() {
        let result = calculate(dec!(50_000), dec!(4), dec!(2.5)).unwrap();
        assert_eq!(result.total_payments, dec!(30));

        let result = calculate(dec!(50_000), dec!(4), dec!(1.01)).unwrap();
        assert_eq!(result.total_payments, dec!(12.12));
        assert!(result.monthly_payment > Decimal::ZERO);
    }
}
