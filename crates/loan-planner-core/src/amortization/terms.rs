use std::str::FromStr;

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::extra::ExtraPayments;
use crate::error::LoanPlannerError;
use crate::time_value::annuity_payment;
use crate::types::{Money, Percent, Rate};
use crate::LoanPlannerResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Longest accepted term, in monthly periods (100 years).
pub const MAX_PERIODS: u32 = 1200;

/// Loan as entered by a user: amount, annual percentage rate, term in years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequest {
    pub amount: Money,
    /// Annual rate as a percentage (4.5 = 4.5%).
    pub annual_rate_percent: Percent,
    pub years: Decimal,
    /// First payment month, `YYYY-MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_month: Option<String>,
    #[serde(default, skip_serializing_if = "ExtraPayments::is_empty")]
    pub extra_payments: ExtraPayments,
}

/// Monthly terms the amortization engine runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub periodic_rate: Rate,
    pub contracted_payment: Money,
    pub contracted_periods: u32,
}

/// Headline numbers shown before any extra payments are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

impl LoanTerms {
    /// Build terms with the contracted payment from the annuity formula.
    pub fn new(principal: Money, periodic_rate: Rate, contracted_periods: u32) -> LoanPlannerResult<Self> {
        if principal <= Decimal::ZERO {
            return Err(LoanPlannerError::invalid(
                "amount",
                "Loan amount must be positive",
            ));
        }
        if periodic_rate < Decimal::ZERO {
            return Err(LoanPlannerError::invalid(
                "rate",
                "Interest rate cannot be negative",
            ));
        }
        if contracted_periods == 0 {
            return Err(LoanPlannerError::invalid(
                "years",
                "Loan term must cover at least one month",
            ));
        }
        if contracted_periods > MAX_PERIODS {
            return Err(LoanPlannerError::invalid(
                "years",
                format!("Loan term of {contracted_periods} months exceeds the {MAX_PERIODS} month maximum"),
            ));
        }

        let contracted_payment = annuity_payment(principal, periodic_rate, contracted_periods)?;
        if contracted_payment <= Decimal::ZERO {
            return Err(LoanPlannerError::NonFinitePayment {
                context: format!("contracted payment {contracted_payment} is not positive"),
            });
        }

        Ok(LoanTerms {
            principal,
            periodic_rate,
            contracted_payment,
            contracted_periods,
        })
    }

    /// Convert an annual-percent / years request into monthly terms.
    pub fn from_request(request: &LoanRequest) -> LoanPlannerResult<Self> {
        if request.annual_rate_percent < Decimal::ZERO {
            return Err(LoanPlannerError::invalid(
                "annual_rate_percent",
                "Interest rate cannot be negative",
            ));
        }
        if request.years <= Decimal::ZERO {
            return Err(LoanPlannerError::invalid(
                "years",
                "Loan term must be positive",
            ));
        }

        let months = request.years * MONTHS_PER_YEAR;
        if !months.fract().is_zero() {
            return Err(LoanPlannerError::invalid(
                "years",
                format!("{} years is not a whole number of months", request.years),
            ));
        }
        let periods = months.to_u32().ok_or_else(|| {
            LoanPlannerError::invalid("years", format!("{months} months is out of range"))
        })?;

        let periodic_rate = request.annual_rate_percent / dec!(100) / MONTHS_PER_YEAR;
        Self::new(request.amount, periodic_rate, periods)
    }

    /// Hard upper bound on schedule length.
    pub fn safety_bound(&self) -> u32 {
        self.contracted_periods.saturating_mul(2)
    }

    pub fn summary(&self) -> LoanSummary {
        let total_payment = self.contracted_payment * Decimal::from(self.contracted_periods);
        LoanSummary {
            monthly_payment: self.contracted_payment,
            total_payment,
            total_interest: total_payment - self.principal,
        }
    }
}

/// Parse a textual form field as a decimal, refusing anything non-numeric.
pub fn parse_amount(field: &str, text: &str) -> LoanPlannerResult<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LoanPlannerError::invalid(field, "value is required"));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LoanPlannerError::invalid(field, format!("'{trimmed}' is not a number")))
}

/// Parse a `YYYY-MM` start month into the first day of that month.
pub fn parse_start_month(text: &str) -> LoanPlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", text.trim()), "%Y-%m-%d").map_err(|_| {
        LoanPlannerError::invalid("start_month", format!("'{text}' is not a YYYY-MM month"))
    })
}

/// Calendar month of a 1-based payment period.
pub fn period_date(start: NaiveDate, period: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(period.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: Decimal, rate: Decimal, years: Decimal) -> LoanRequest {
        LoanRequest {
            amount,
            annual_rate_percent: rate,
            years,
            start_month: None,
            extra_payments: ExtraPayments::default(),
        }
    }

    #[test]
    fn test_from_request_converts_to_monthly() {
        let terms = LoanTerms::from_request(&request(dec!(20000), dec!(4.5), dec!(5))).unwrap();
        assert_eq!(terms.periodic_rate, dec!(0.00375));
        assert_eq!(terms.contracted_periods, 60);
        assert!((terms.contracted_payment - dec!(372.86)).abs() < dec!(0.01));
    }

    #[test]
    fn test_fractional_years_whole_months_accepted() {
        let terms = LoanTerms::from_request(&request(dec!(1000), dec!(6), dec!(2.5))).unwrap();
        assert_eq!(terms.contracted_periods, 30);
    }

    #[test]
    fn test_fractional_months_rejected() {
        let err = LoanTerms::from_request(&request(dec!(1000), dec!(6), dec!(1.3))).unwrap_err();
        assert!(matches!(err, LoanPlannerError::InvalidInput { ref field, .. } if field == "years"));
    }

    #[test]
    fn test_oversized_term_rejected() {
        let err = LoanTerms::from_request(&request(dec!(1), dec!(0), dec!(300000000))).unwrap_err();
        assert!(matches!(err, LoanPlannerError::InvalidInput { ref field, .. } if field == "years"));

        let err = LoanTerms::new(dec!(1000), Decimal::ZERO, MAX_PERIODS + 1).unwrap_err();
        assert!(matches!(err, LoanPlannerError::InvalidInput { ref field, .. } if field == "years"));
    }

    #[test]
    fn test_longest_term_accepted() {
        let terms = LoanTerms::from_request(&request(dec!(1200), dec!(0), dec!(100))).unwrap();
        assert_eq!(terms.contracted_periods, MAX_PERIODS);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert!(LoanTerms::from_request(&request(dec!(0), dec!(5), dec!(1))).is_err());
        assert!(LoanTerms::from_request(&request(dec!(-10), dec!(5), dec!(1))).is_err());
    }

    #[test]
    fn test_negative_rate_rejected() {
        assert!(LoanTerms::from_request(&request(dec!(1000), dec!(-1), dec!(1))).is_err());
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let terms = LoanTerms::from_request(&request(dec!(1200), dec!(0), dec!(1))).unwrap();
        assert_eq!(terms.contracted_payment, dec!(100));
        assert_eq!(terms.summary().total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_summary_totals() {
        let terms = LoanTerms::from_request(&request(dec!(20000), dec!(4.5), dec!(5))).unwrap();
        let summary = terms.summary();
        assert!((summary.total_payment - dec!(22371.62)).abs() < dec!(0.01));
        assert!((summary.total_interest - dec!(2371.62)).abs() < dec!(0.01));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", " 20000 ").unwrap(), dec!(20000));
        assert_eq!(parse_amount("interest", "4.5").unwrap(), dec!(4.5));
        assert!(parse_amount("amount", "abc").is_err());
        assert!(parse_amount("amount", "").is_err());
    }

    #[test]
    fn test_start_month_and_period_dates() {
        let start = parse_start_month("2024-05").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(period_date(start, 1), Some(start));
        assert_eq!(
            period_date(start, 9),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        assert!(parse_start_month("May 2024").is_err());
    }
}
