use chrono::NaiveDate;

use super::extra::ExtraPayments;
use super::savings::Savings;
use super::schedule::{compute_dated_schedule, Schedule};
use super::terms::{parse_start_month, LoanRequest, LoanTerms};
use super::LoanAnalysis;
use crate::types::Money;
use crate::LoanPlannerResult;

/// Calculator state owned by a presentation layer.
///
/// Terms are fixed for the lifetime of the value; extra payments are edited
/// in place and every query recomputes from scratch.
#[derive(Debug, Clone)]
pub struct LoanCalculator {
    terms: LoanTerms,
    extra_payments: ExtraPayments,
    start_month: Option<NaiveDate>,
}

impl LoanCalculator {
    /// Start a fresh calculation with no extra payments.
    pub fn new(terms: LoanTerms) -> Self {
        LoanCalculator {
            terms,
            extra_payments: ExtraPayments::new(),
            start_month: None,
        }
    }

    /// Validate a request and load its start month and extra payments.
    pub fn from_request(request: &LoanRequest) -> LoanPlannerResult<Self> {
        let terms = LoanTerms::from_request(request)?;
        let start_month = request
            .start_month
            .as_deref()
            .map(parse_start_month)
            .transpose()?;

        Ok(LoanCalculator {
            terms,
            extra_payments: request.extra_payments.clone(),
            start_month,
        })
    }

    pub fn with_start_month(mut self, start: NaiveDate) -> Self {
        self.start_month = Some(start);
        self
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn extra_payments(&self) -> &ExtraPayments {
        &self.extra_payments
    }

    pub fn set_extra_payment(&mut self, period: u32, amount: Money) {
        self.extra_payments.set(period, amount);
    }

    pub fn apply_extra_edit(&mut self, period: u32, text: &str) {
        self.extra_payments.apply_edit(period, text);
    }

    pub fn clear_extra_payments(&mut self) {
        self.extra_payments.clear();
    }

    /// Schedule without any extra payments.
    pub fn baseline(&self) -> Schedule {
        compute_dated_schedule(&self.terms, &ExtraPayments::new(), self.start_month)
    }

    /// Schedule with the current extra payments.
    pub fn schedule(&self) -> Schedule {
        compute_dated_schedule(&self.terms, &self.extra_payments, self.start_month)
    }

    pub fn savings(&self) -> Savings {
        Savings::compare(&self.terms, &self.baseline(), &self.schedule())
    }

    pub fn analysis(&self) -> LoanAnalysis {
        let baseline = self.baseline();
        let schedule = self.schedule();
        let savings = Savings::compare(&self.terms, &baseline, &schedule);

        LoanAnalysis {
            summary: self.terms.summary(),
            terms: self.terms.clone(),
            schedule,
            savings,
        }
    }
}
