use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanPlannerError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Non-finite payment: {context}")]
    NonFinitePayment { context: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "bundle")]
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanPlannerError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanPlannerError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LoanPlannerError {
    fn from(e: serde_json::Error) -> Self {
        LoanPlannerError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "bundle")]
impl From<serde_yaml::Error> for LoanPlannerError {
    fn from(e: serde_yaml::Error) -> Self {
        LoanPlannerError::SerializationError(e.to_string())
    }
}
