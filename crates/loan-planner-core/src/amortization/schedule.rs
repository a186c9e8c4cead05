use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::extra::ExtraPayments;
use super::terms::{period_date, LoanTerms, MAX_PERIODS};
use crate::types::Money;

/// Balance at or below which the loan is considered paid off.
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

/// One period of the amortization ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub period: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub opening_balance: Money,
    pub extra: Money,
    pub interest: Money,
    pub principal: Money,
    /// Cash paid this period: contracted payment plus extra, or
    /// interest plus remaining balance on the final row.
    pub payment: Money,
    pub balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_paid: Money,
}

impl ScheduleRow {
    /// Short month label such as `May 2024`, when the row is dated.
    pub fn month_label(&self) -> Option<String> {
        self.date.map(|d| d.format("%b %Y").to_string())
    }
}

/// Period-ascending ledger produced by [`compute_schedule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
    /// True when the safety bound stopped the loop before the balance
    /// reached zero.
    pub truncated: bool,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn periods(&self) -> u32 {
        self.rows.last().map_or(0, |r| r.period)
    }

    pub fn total_interest(&self) -> Money {
        self.rows.last().map_or(Decimal::ZERO, |r| r.cumulative_interest)
    }

    pub fn total_paid(&self) -> Money {
        self.rows.last().map_or(Decimal::ZERO, |r| r.cumulative_paid)
    }

    pub fn final_balance(&self) -> Option<Money> {
        self.rows.last().map(|r| r.balance)
    }
}

/// Build the amortization schedule for `terms` with `extra_payments`.
///
/// Runs until the balance is within [`BALANCE_EPSILON`] of zero or the
/// period count exceeds twice the contracted term. An insufficient payment
/// grows the balance and is not rejected; such a schedule stops at the bound
/// with `truncated` set.
pub fn compute_schedule(terms: &LoanTerms, extra_payments: &ExtraPayments) -> Schedule {
    compute_dated_schedule(terms, extra_payments, None)
}

/// [`compute_schedule`], dating each row from `start` when given.
pub fn compute_dated_schedule(
    terms: &LoanTerms,
    extra_payments: &ExtraPayments,
    start: Option<NaiveDate>,
) -> Schedule {
    let bound = terms.safety_bound();
    let mut rows = Vec::with_capacity(terms.contracted_periods.min(MAX_PERIODS) as usize);

    let mut balance = terms.principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut cumulative_paid = Decimal::ZERO;
    let mut period: u32 = 1;

    while balance > BALANCE_EPSILON && period <= bound {
        let opening_balance = balance;
        let extra = extra_payments.get(period);
        let interest = balance.saturating_mul(terms.periodic_rate);
        let mut principal = (terms.contracted_payment - interest) + extra;

        let payment = if principal > balance {
            principal = balance;
            balance = Decimal::ZERO;
            interest + principal
        } else {
            // A negative principal grows the balance; saturate rather than overflow.
            balance = balance.saturating_sub(principal);
            terms.contracted_payment + extra
        };

        cumulative_interest = cumulative_interest.saturating_add(interest);
        cumulative_paid = cumulative_paid.saturating_add(payment);

        rows.push(ScheduleRow {
            period,
            date: start.and_then(|s| period_date(s, period)),
            opening_balance,
            extra,
            interest,
            principal,
            payment,
            balance,
            cumulative_interest,
            cumulative_paid,
        });
        period += 1;
    }

    let truncated = balance > BALANCE_EPSILON;
    if truncated {
        tracing::warn!(
            rows = rows.len(),
            %balance,
            "schedule stopped at safety bound before payoff"
        );
    }

    Schedule { rows, truncated }
}
