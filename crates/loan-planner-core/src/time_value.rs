use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanPlannerError;
use crate::types::{Money, Rate};
use crate::LoanPlannerResult;

/// Compound growth factor `(1 + rate)^nper`.
///
/// Returns `NonFinitePayment` when the factor overflows the decimal range.
pub fn compound_factor(rate: Rate, nper: u32) -> LoanPlannerResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(LoanPlannerError::invalid(
            "rate",
            "Periodic rate must be greater than -100%",
        ));
    }

    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| LoanPlannerError::NonFinitePayment {
            context: format!("compound factor (1 + {rate})^{nper} overflows"),
        })
}

/// Level payment that fully amortises `principal` over `nper` periods.
///
/// `payment = principal * x * rate / (x - 1)` with `x = (1 + rate)^nper`.
/// A zero rate is special-cased as `principal / nper`, where the annuity
/// form would divide by zero.
pub fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> LoanPlannerResult<Money> {
    if nper == 0 {
        return Err(LoanPlannerError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let x = compound_factor(rate, nper)?;
    let non_finite = || LoanPlannerError::NonFinitePayment {
        context: format!("annuity payment at rate {rate} over {nper} periods"),
    };

    let numerator = principal
        .checked_mul(x)
        .and_then(|v| v.checked_mul(rate))
        .ok_or_else(non_finite)?;
    numerator.checked_div(x - Decimal::ONE).ok_or_else(non_finite)
}
