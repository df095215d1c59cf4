use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::amortization::analysis::{self, AmortizationInput};
use mortgage_core::amortization::schedule;
use mortgage_core::{calculate_monthly_payment, LoanTerms, TermUnit};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TermUnitArg {
    Months,
    Years,
}

impl From<TermUnitArg> for TermUnit {
    fn from(unit: TermUnitArg) -> Self {
        match unit {
            TermUnitArg::Months => TermUnit::Months,
            TermUnitArg::Years => TermUnit::Years,
        }
    }
}

/// Loan definition shared by every mortgage command
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (6.0 = 6%)
    #[arg(long, alias = "annual-rate-percent")]
    pub rate: Option<Decimal>,

    /// Loan term, in --term-unit
    #[arg(long)]
    pub term: Option<u32>,

    /// Unit the term is quoted in
    #[arg(long, value_enum, default_value = "years")]
    pub term_unit: TermUnitArg,
}

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for amortization schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Schedule with this payment instead of the level payment
    #[arg(long)]
    pub monthly_payment: Option<Decimal>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amortization_input = read_input(args.loan, None)?;
    let loan = &amortization_input.loan;
    let payment = calculate_monthly_payment(loan)?;
    Ok(serde_json::json!({
        "result": {
            "monthly_payment": payment,
            "term_months": loan.term_months(),
            "monthly_rate_percent": loan.monthly_rate_percent(),
        }
    }))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amortization_input = read_input(args.loan, args.monthly_payment)?;
    let records = schedule::generate_schedule(
        &amortization_input.loan,
        amortization_input.monthly_payment,
    )?;
    Ok(serde_json::to_value(records)?)
}

pub fn run_analyze(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amortization_input = read_input(args.loan, args.monthly_payment)?;
    let result = analysis::analyze_amortization(&amortization_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Resolve the loan from an input file, piped stdin, or flags, in that order.
/// A `--monthly-payment` flag overrides any payment in the file.
fn read_input(
    args: LoanArgs,
    monthly_payment: Option<Decimal>,
) -> Result<AmortizationInput, Box<dyn std::error::Error>> {
    let mut amortization_input: AmortizationInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        loan_from_flags(&args)?
    };
    if monthly_payment.is_some() {
        amortization_input.monthly_payment = monthly_payment;
    }
    Ok(amortization_input)
}

fn loan_from_flags(args: &LoanArgs) -> Result<AmortizationInput, Box<dyn std::error::Error>> {
    Ok(AmortizationInput {
        loan: LoanTerms {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate
                .ok_or("--rate is required (or provide --input)")?,
            term: args.term
                .ok_or("--term is required (or provide --input)")?,
            term_unit: args.term_unit.into(),
        },
        monthly_payment: None,
    })
}
