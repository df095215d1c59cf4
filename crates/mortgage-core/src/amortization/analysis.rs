//! Full amortization analysis: level payment, schedule and loan totals
//! wrapped in the standard computation envelope.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::{generate_schedule, PaymentRecord};
use crate::error::MortgageError;
use crate::loan::LoanTerms;
use crate::payment::calculate_monthly_payment;
use crate::types::*;
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    #[serde(flatten)]
    pub loan: LoanTerms,
    /// Pre-computed payment to schedule with instead of the level payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub monthly_payment: Money,
    pub term_months: u32,
    pub term_years: Years,
    pub monthly_rate_percent: Percent,
    pub total_interest: Money,
    pub total_principal: Money,
    /// Sum of every scheduled payment, final correction included.
    pub total_paid: Money,
    pub final_payment: Money,
    pub final_balance: Money,
    pub schedule: Vec<PaymentRecord>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the monthly payment and amortization schedule for a loan and
/// summarise the totals paid over its life.
pub fn analyze_amortization(
    input: &AmortizationInput,
) -> MortgageResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = &input.loan;
    loan.validate()?;

    let (monthly_payment, payment_source) = match input.monthly_payment {
        Some(p) => (p, "supplied"),
        None => (calculate_monthly_payment(loan)?, "annuity_formula"),
    };

    let schedule = generate_schedule(loan, Some(monthly_payment))?;
    let last = schedule
        .last()
        .cloned()
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "term".into(),
            reason: "Schedule has no payments.".into(),
        })?;

    if loan.annual_rate_percent.is_zero() {
        warnings.push("Interest-free loan: payment is principal divided evenly across the term.".into());
    }

    let first_interest = schedule[0].interest;
    if monthly_payment <= first_interest && !loan.principal.is_zero() {
        warnings.push(format!(
            "Monthly payment {monthly_payment} does not cover first-month interest {first_interest}; \
             the balance grows until the final payment."
        ));
    }

    if last.balance < Decimal::ZERO {
        warnings.push(format!(
            "Final balance is {} rather than zero: cent rounding over the term overpays principal \
             and the final-month correction only absorbs positive residuals.",
            last.balance
        ));
    }

    let total_paid: Money = schedule.iter().map(|r| r.payment_amount).sum();

    let output = AmortizationOutput {
        monthly_payment,
        term_months: loan.term_months(),
        term_years: loan.term_years(),
        monthly_rate_percent: loan.monthly_rate_percent(),
        total_interest: last.total_interest,
        total_principal: last.total_principal,
        total_paid,
        final_payment: last.payment_amount,
        final_balance: last.balance,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "rounding": "half_to_even, 2dp",
        "compounding": "monthly, annual_rate / 12",
        "payment_source": payment_source,
        "final_month_correction": "positive residual folded into last payment",
    });

    Ok(with_metadata(
        "Fixed-Rate Mortgage Amortization (annuity, banker's rounding)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
