//! Annual-to-monthly rate normalization.
//!
//! Loans are quoted with a nominal annual percentage rate; every monthly
//! calculation works off one twelfth of it. Nothing here rounds.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Percent, Rate};

/// Compounding periods per year for a monthly-pay loan.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Monthly rate in percent: `annual_rate_percent / 12`, full precision.
pub fn monthly_rate_percent(annual_rate_percent: Percent) -> Percent {
    annual_rate_percent / Decimal::from(MONTHS_PER_YEAR)
}

/// Monthly rate as a fraction (0.005 for a 6% annual loan).
pub fn monthly_rate_fraction(annual_rate_percent: Percent) -> Rate {
    monthly_rate_percent(annual_rate_percent) / dec!(100)
}
