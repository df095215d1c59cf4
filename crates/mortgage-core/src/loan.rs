//! Loan definition supplied by callers.
//!
//! `LoanTerms` stores only what the borrower quotes. The monthly rate and the
//! term in either unit are derived on demand so they can never drift out of
//! sync with the quoted values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::rate::{self, MONTHS_PER_YEAR};
use crate::types::{Money, Percent, Rate, Years};
use crate::MortgageResult;

/// Longest schedulable term: 100 years of monthly payments.
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Unit the loan term is quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermUnit {
    Months,
    #[default]
    Years,
}

/// A fixed-rate, fixed-term loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount owed at month 0.
    pub principal: Money,
    /// Nominal annual rate as a percent (6.0 = 6%).
    pub annual_rate_percent: Percent,
    /// Loan duration, expressed in `term_unit`.
    pub term: u32,
    #[serde(default)]
    pub term_unit: TermUnit,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_percent: Percent, term: u32, term_unit: TermUnit) -> Self {
        LoanTerms {
            principal,
            annual_rate_percent,
            term,
            term_unit,
        }
    }

    /// Monthly rate in percent (annual / 12).
    pub fn monthly_rate_percent(&self) -> Percent {
        rate::monthly_rate_percent(self.annual_rate_percent)
    }

    /// Monthly rate as a fraction (annual / 12 / 100).
    pub fn monthly_rate(&self) -> Rate {
        rate::monthly_rate_fraction(self.annual_rate_percent)
    }

    /// Total number of monthly payments. `None` if a year-quoted term
    /// overflows `u32` months.
    pub fn checked_term_months(&self) -> Option<u32> {
        match self.term_unit {
            TermUnit::Months => Some(self.term),
            TermUnit::Years => self.term.checked_mul(MONTHS_PER_YEAR),
        }
    }

    /// Total number of monthly payments.
    ///
    /// Saturates for year terms too large to express in months; `validate`
    /// rejects those before any calculation runs.
    pub fn term_months(&self) -> u32 {
        self.checked_term_months().unwrap_or(u32::MAX)
    }

    /// Loan duration in years, fractional for month-quoted terms.
    pub fn term_years(&self) -> Years {
        match self.term_unit {
            TermUnit::Years => Decimal::from(self.term),
            TermUnit::Months => Decimal::from(self.term) / Decimal::from(MONTHS_PER_YEAR),
        }
    }

    /// Reject loan shapes the engine cannot amortize.
    pub fn validate(&self) -> MortgageResult<()> {
        if self.principal < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "principal".into(),
                reason: "Principal cannot be negative.".into(),
            });
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "Annual interest rate cannot be negative.".into(),
            });
        }
        if self.term == 0 {
            return Err(MortgageError::InvalidInput {
                field: "term".into(),
                reason: "Term must be at least one period.".into(),
            });
        }
        match self.checked_term_months() {
            Some(months) if months <= MAX_TERM_MONTHS => {}
            _ => {
                return Err(MortgageError::InvalidInput {
                    field: "term".into(),
                    reason: format!(
                        "Term of {} {:?} exceeds the {MAX_TERM_MONTHS}-month maximum.",
                        self.term, self.term_unit
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_month_quoted_term() {
        let loan = LoanTerms::new(dec!(100_000), dec!(6.0), 60, TermUnit::Months);
        assert_eq!(loan.principal, dec!(100_000));
        assert_eq!(loan.term_months(), 60);
        assert_eq!(loan.term_years(), dec!(5));
        assert_eq!(loan.monthly_rate_percent(), dec!(0.5));
    }

    #[test]
    fn test_year_quoted_term() {
        let loan = LoanTerms::new(dec!(100_000), dec!(6.0), 5, TermUnit::Years);
        assert_eq!(loan.term_years(), dec!(5));
        assert_eq!(loan.term_months(), 60);
        assert_eq!(loan.monthly_rate_percent(), dec!(0.5));
        assert_eq!(loan.monthly_rate(), dec!(0.005));
    }

    #[test]
    fn test_fractional_years() {
        let loan = LoanTerms::new(dec!(1_000), dec!(3), 18, TermUnit::Months);
        assert_eq!(loan.term_years(), dec!(1.5));
    }

    #[test]
    fn test_rate_follows_annual_rate() {
        let mut loan = LoanTerms::new(dec!(1_000), dec!(6.0), 1, TermUnit::Years);
        loan.annual_rate_percent = dec!(12);
        assert_eq!(loan.monthly_rate_percent(), dec!(1));
    }

    #[test]
    fn test_negative_principal_rejected() {
        let loan = LoanTerms::new(dec!(-1), dec!(6.0), 1, TermUnit::Years);
        match loan.validate().unwrap_err() {
            MortgageError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let loan = LoanTerms::new(dec!(1_000), dec!(-0.1), 1, TermUnit::Years);
        match loan.validate().unwrap_err() {
            MortgageError::InvalidInput { field, .. } => assert_eq!(field, "annual_rate_percent"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_term_rejected() {
        let loan = LoanTerms::new(dec!(1_000), dec!(6.0), 0, TermUnit::Months);
        match loan.validate().unwrap_err() {
            MortgageError::InvalidInput { field, .. } => assert_eq!(field, "term"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_year_term_rejected() {
        let loan = LoanTerms::new(dec!(1_000), dec!(6.0), u32::MAX, TermUnit::Years);
        assert!(loan.checked_term_months().is_none());
        assert!(loan.validate().is_err());
    }

    #[test]
    fn test_term_capped_at_max_months() {
        let longest = LoanTerms::new(dec!(1_000), Decimal::ZERO, MAX_TERM_MONTHS, TermUnit::Months);
        assert!(longest.validate().is_ok());
        let hundred_years = LoanTerms::new(dec!(1_000), dec!(6.0), 100, TermUnit::Years);
        assert!(hundred_years.validate().is_ok());

        let too_long = [
            LoanTerms::new(dec!(1_000), Decimal::ZERO, MAX_TERM_MONTHS + 1, TermUnit::Months),
            LoanTerms::new(dec!(1_000), Decimal::ZERO, u32::MAX, TermUnit::Months),
            LoanTerms::new(dec!(1_000), dec!(6.0), 101, TermUnit::Years),
        ];
        for loan in too_long {
            match loan.validate().unwrap_err() {
                MortgageError::InvalidInput { field, .. } => assert_eq!(field, "term"),
                other => panic!("Expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_principal_and_rate_accepted() {
        let loan = LoanTerms::new(Decimal::ZERO, Decimal::ZERO, 12, TermUnit::Months);
        assert!(loan.validate().is_ok());
    }

    #[test]
    fn test_deserialize_defaults_to_years() {
        let loan: LoanTerms = serde_json::from_str(
            r#"{"principal": "250000", "annual_rate_percent": "4.5", "term": 30}"#,
        )
        .unwrap();
        assert_eq!(loan.term_unit, TermUnit::Years);
        assert_eq!(loan.term_months(), 360);
    }

    #[test]
    fn test_deserialize_months() {
        let loan: LoanTerms = serde_json::from_str(
            r#"{"principal": "1000", "annual_rate_percent": "0", "term": 7, "term_unit": "months"}"#,
        )
        .unwrap();
        assert_eq!(loan.term_unit, TermUnit::Months);
        assert_eq!(loan.term_months(), 7);
    }
}
