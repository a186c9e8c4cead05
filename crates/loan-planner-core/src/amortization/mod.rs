//! Level-payment loan amortization with sparse extra principal payments.
//!
//! The engine ([`schedule::compute_schedule`]) is a pure function of the loan
//! terms and an extra-payment snapshot. Everything else in this module
//! collects input for it or compares its outputs.

pub mod calculator;
pub mod extra;
pub mod savings;
pub mod schedule;
pub mod terms;

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput};
use crate::LoanPlannerResult;

pub use calculator::LoanCalculator;
pub use extra::ExtraPayments;
pub use savings::Savings;
pub use schedule::{compute_dated_schedule, compute_schedule, Schedule, ScheduleRow, BALANCE_EPSILON};
pub use terms::{LoanRequest, LoanSummary, LoanTerms, MAX_PERIODS};

const METHODOLOGY: &str = "Level-payment amortization with extra principal";

/// Full result of analysing a loan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub summary: LoanSummary,
    pub terms: LoanTerms,
    pub schedule: Schedule,
    pub savings: Savings,
}

/// Terms, schedule, and savings for a loan request.
pub fn analyze_loan(request: &LoanRequest) -> LoanPlannerResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();
    let calculator = LoanCalculator::from_request(request)?;
    let analysis = calculator.analysis();
    let warnings = schedule_warnings(&analysis.schedule, calculator.extra_payments());

    tracing::debug!(
        periods = analysis.schedule.len(),
        interest = %analysis.schedule.total_interest(),
        "loan analysed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, request, warnings, elapsed, analysis))
}

/// Contracted payment and headline totals only.
pub fn calculate_payment(request: &LoanRequest) -> LoanPlannerResult<ComputationOutput<LoanSummary>> {
    let start = Instant::now();
    let terms = LoanTerms::from_request(request)?;
    let summary = terms.summary();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annuity payment",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "periodic_rate": terms.periodic_rate.to_string(),
            "periods": terms.contracted_periods,
        }),
        Vec::new(),
        elapsed,
        summary,
    ))
}

/// Savings of the request's extra payments against the plain schedule.
pub fn compare_savings(request: &LoanRequest) -> LoanPlannerResult<ComputationOutput<Savings>> {
    let start = Instant::now();
    let calculator = LoanCalculator::from_request(request)?;
    let schedule = calculator.schedule();
    let warnings = schedule_warnings(&schedule, calculator.extra_payments());
    let savings = Savings::compare(calculator.terms(), &calculator.baseline(), &schedule);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, request, warnings, elapsed, savings))
}

fn schedule_warnings(schedule: &Schedule, extras: &ExtraPayments) -> Vec<String> {
    let mut warnings = Vec::new();

    if schedule.truncated {
        warnings.push(format!(
            "Payment does not retire the loan; schedule stopped at period {} with balance {}",
            schedule.periods(),
            schedule.final_balance().unwrap_or_default().round_dp(2),
        ));
    }

    let last = schedule.periods();
    let unused: Vec<String> = extras
        .iter()
        .filter(|(period, _)| *period > last)
        .map(|(period, _)| period.to_string())
        .collect();
    if !unused.is_empty() {
        warnings.push(format!(
            "Extra payments after payoff are ignored (periods {})",
            unused.join(", ")
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> LoanRequest {
        LoanRequest {
            amount: dec!(1200),
            annual_rate_percent: dec!(0),
            years: dec!(1),
            start_month: None,
            extra_payments: ExtraPayments::new(),
        }
    }

    #[test]
    fn test_analyze_loan_envelope() {
        let out = analyze_loan(&request()).unwrap();
        assert_eq!(out.methodology, METHODOLOGY);
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.schedule.len(), 12);
        assert_eq!(out.result.summary.monthly_payment, dec!(100));
    }

    #[test]
    fn test_unused_extra_payment_warns() {
        let mut req = request();
        req.extra_payments.set(30, dec!(50));
        let out = analyze_loan(&req).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("30"));
    }

    #[test]
    fn test_calculate_payment_rejects_bad_input() {
        let mut req = request();
        req.years = dec!(0);
        assert!(calculate_payment(&req).is_err());
    }

    #[test]
    fn test_compare_savings() {
        let mut req = request();
        req.extra_payments.set(1, dec!(600));
        let out = compare_savings(&req).unwrap();
        assert_eq!(out.result.periods_saved, 6);
    }
}
