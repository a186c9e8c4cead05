//! Stacked principal/interest bar series for plotting a schedule.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{LoanCalculator, LoanRequest, Schedule};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanPlannerResult;

/// Minimum rendered chart height in pixels.
pub const MIN_CHART_HEIGHT_PX: u32 = 300;

/// Pixels allotted to each bar.
pub const BAR_HEIGHT_PX: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentComposition {
    pub labels: Vec<String>,
    pub principal: Vec<Money>,
    pub interest: Vec<Money>,
    pub height_px: u32,
}

impl PaymentComposition {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut labels = Vec::with_capacity(schedule.len());
        let mut principal = Vec::with_capacity(schedule.len());
        let mut interest = Vec::with_capacity(schedule.len());

        for row in &schedule.rows {
            labels.push(format!("M {}", row.period));
            principal.push(row.principal);
            interest.push(row.interest);
        }

        PaymentComposition {
            height_px: chart_height_px(labels.len()),
            labels,
            principal,
            interest,
        }
    }
}

/// Chart height that keeps one bar per period legible.
pub fn chart_height_px(bars: usize) -> u32 {
    let bars = u32::try_from(bars).unwrap_or(u32::MAX);
    bars.saturating_mul(BAR_HEIGHT_PX).max(MIN_CHART_HEIGHT_PX)
}

/// Composition series for a loan request, extra payments included.
pub fn payment_composition(
    request: &LoanRequest,
) -> LoanPlannerResult<ComputationOutput<PaymentComposition>> {
    let start = Instant::now();
    let schedule = LoanCalculator::from_request(request)?.schedule();
    let composition = PaymentComposition::from_schedule(&schedule);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Stacked principal and interest per period",
        request,
        Vec::new(),
        elapsed,
        composition,
    ))
}
