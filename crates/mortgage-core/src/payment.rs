//! Level monthly payment for a fixed-rate loan.
//!
//! Standard annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)`, settled to cents
//! with banker's rounding. Any rounding residue is absorbed by the final
//! scheduled payment, not here.

use log::debug;
use rust_decimal::Decimal;

use crate::error::MortgageError;
use crate::loan::LoanTerms;
use crate::types::{round_money, Money, Rate};
use crate::MortgageResult;

/// Fixed monthly payment that retires `loan` over its term.
pub fn calculate_monthly_payment(loan: &LoanTerms) -> MortgageResult<Money> {
    loan.validate()?;

    let monthly_rate = loan.monthly_rate();
    let n = loan.term_months();

    // Interest-free: the annuity denominator collapses to zero.
    if monthly_rate.is_zero() {
        let payment = round_money(loan.principal / Decimal::from(n));
        debug!("interest-free payment over {n} months: {payment}");
        return Ok(payment);
    }

    let growth = growth_factor(monthly_rate, n)?;
    if growth.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let annuity = monthly_rate
        .checked_mul(loan.principal)
        .and_then(|x| x.checked_mul(growth))
        .and_then(|x| x.checked_div(growth - Decimal::ONE))
        .ok_or_else(|| MortgageError::NumericOverflow {
            context: format!("annuity payment for principal {} over {n} months", loan.principal),
        })?;
    let payment = round_money(annuity);
    debug!(
        "monthly payment {payment} for principal {} at {}%/month over {n} months",
        loan.principal,
        loan.monthly_rate_percent()
    );
    Ok(payment)
}

/// Compute (1 + r)^n via iterative multiplication.
///
/// The exponent is always a whole number of months, so exact decimal
/// multiplication is used instead of `powd`.
fn growth_factor(monthly_rate: Rate, n: u32) -> MortgageResult<Decimal> {
    let base = Decimal::ONE + monthly_rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result
            .checked_mul(base)
            .ok_or_else(|| MortgageError::NumericOverflow {
                context: format!("growth factor (1 + {monthly_rate})^{n}"),
            })?;
    }
    Ok(result)
}
