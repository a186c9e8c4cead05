use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::Schedule;
use super::terms::LoanTerms;
use crate::types::Money;

/// Interest and time saved by extra payments relative to the plain schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Savings {
    pub original_interest: Money,
    pub actual_interest: Money,
    pub interest_saved: Money,
    pub original_periods: u32,
    pub actual_periods: u32,
    /// Negative when extra payments lengthen the loan.
    pub periods_saved: i64,
}

impl Savings {
    /// Compare a zero-extra `baseline` against the `actual` schedule.
    pub fn compare(terms: &LoanTerms, baseline: &Schedule, actual: &Schedule) -> Self {
        let original_interest = baseline.total_interest();
        let actual_interest = actual.total_interest();
        let original_periods = terms.contracted_periods;
        let actual_periods = actual.periods();

        Savings {
            original_interest,
            actual_interest,
            interest_saved: original_interest - actual_interest,
            original_periods,
            actual_periods,
            periods_saved: i64::from(original_periods) - i64::from(actual_periods),
        }
    }

    /// Whether the savings are worth surfacing: more than one currency unit
    /// of interest, or at least one period earlier.
    pub fn is_material(&self) -> bool {
        self.interest_saved > Decimal::ONE || self.periods_saved > 0
    }
}
