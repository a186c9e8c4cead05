pub mod amortization;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "chart")]
pub mod chart;

#[cfg(feature = "bundle")]
pub mod bundle;

pub use error::LoanPlannerError;
pub use types::*;

/// Standard result type for all loan-planner operations
pub type LoanPlannerResult<T> = Result<T, LoanPlannerError>;
