//! Month-by-month amortization schedule.
//!
//! Each month's interest is charged on the balance left by the previous
//! payment and settled to cents; the remainder of the fixed payment retires
//! principal. The last month absorbs any positive residual balance so the
//! loan closes at zero.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::loan::LoanTerms;
use crate::payment::calculate_monthly_payment;
use crate::types::{round_money, Money};
use crate::MortgageResult;

/// One scheduled monthly payment with running totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Zero-based month number.
    pub index: u32,
    /// Cash paid this month.
    pub payment_amount: Money,
    /// Portion of the payment charged as interest.
    pub interest: Money,
    /// Portion of the payment that retires principal.
    pub principal: Money,
    /// Principal still owed after this payment.
    pub balance: Money,
    /// Interest paid from month 0 through this month.
    pub total_interest: Money,
    /// Principal paid from month 0 through this month.
    pub total_principal: Money,
}

/// Build the amortization schedule for `loan`.
///
/// When `monthly_payment` is `None` the level payment from
/// [`calculate_monthly_payment`] is used. The returned schedule always holds
/// exactly `loan.term_months()` records.
pub fn generate_schedule(
    loan: &LoanTerms,
    monthly_payment: Option<Money>,
) -> MortgageResult<Vec<PaymentRecord>> {
    loan.validate()?;

    let monthly_payment = match monthly_payment {
        Some(p) if p < Decimal::ZERO => {
            return Err(MortgageError::InvalidInput {
                field: "monthly_payment".into(),
                reason: "Monthly payment cannot be negative.".into(),
            });
        }
        Some(p) => p,
        None => calculate_monthly_payment(loan)?,
    };

    let term_months = loan.term_months();
    let monthly_rate_percent = loan.monthly_rate_percent();
    let mut schedule = Vec::with_capacity(term_months as usize);

    let mut balance = loan.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for index in 0..term_months {
        let overflow = || MortgageError::NumericOverflow {
            context: format!("amortization schedule at month {index}"),
        };

        let interest = round_money(
            balance
                .checked_mul(monthly_rate_percent)
                .and_then(|x| x.checked_div(dec!(100)))
                .ok_or_else(overflow)?,
        );
        let mut payment_amount = monthly_payment;
        let mut principal = payment_amount.checked_sub(interest).ok_or_else(overflow)?;
        let mut closing = balance.checked_sub(principal).ok_or_else(overflow)?;

        // Fold the residual into the last payment. A negative residual is
        // left as is.
        if index == term_months - 1 && closing > Decimal::ZERO {
            payment_amount = payment_amount.checked_add(closing).ok_or_else(overflow)?;
            principal = principal.checked_add(closing).ok_or_else(overflow)?;
            closing = Decimal::ZERO;
        }

        total_interest = total_interest.checked_add(interest).ok_or_else(overflow)?;
        total_principal = total_principal.checked_add(principal).ok_or_else(overflow)?;

        schedule.push(PaymentRecord {
            index,
            payment_amount,
            interest,
            principal,
            balance: closing,
            total_interest,
            total_principal,
        });

        balance = closing;
    }

    if balance < Decimal::ZERO {
        warn!(
            "schedule for principal {} over {term_months} months closes at {balance}",
            loan.principal
        );
    }
    debug!("generated {} payment records at {monthly_payment}/month", schedule.len());

    Ok(schedule)
}
