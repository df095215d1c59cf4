pub mod error;
pub mod loan;
pub mod payment;
pub mod rate;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

pub use error::MortgageError;
pub use loan::{LoanTerms, TermUnit};
pub use payment::calculate_monthly_payment;
pub use rate::monthly_rate_percent;
pub use types::*;

#[cfg(feature = "amortization")]
pub use amortization::analysis::{analyze_amortization, AmortizationInput, AmortizationOutput};
#[cfg(feature = "amortization")]
pub use amortization::schedule::{generate_schedule, PaymentRecord};

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
