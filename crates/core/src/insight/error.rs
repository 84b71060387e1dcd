//! Insight error types.

use expensa_shared::AppError;
use thiserror::Error;

use crate::expense::ValidationErrors;

/// Failure reported by a narrative generator implementation.
#[derive(Debug, Clone, Error)]
#[error("narrative generator failed: {0}")]
pub struct GeneratorError(pub String);

impl GeneratorError {
    /// Create a generator error.
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Insight operation errors.
#[derive(Debug, Error)]
pub enum InsightError {
    /// The candidate does not pass validation.
    #[error("Invalid form data.")]
    InvalidForm(ValidationErrors),

    /// Insight generation is switched off.
    #[error("Expense insights are disabled.")]
    Disabled,

    /// The generator failed or timed out. Details are logged, not returned.
    #[error("Failed to reach the insights service. Please try again later.")]
    ServiceUnavailable,
}

impl InsightError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidForm(_) => "INVALID_FORM",
            Self::Disabled => "INSIGHTS_DISABLED",
            Self::ServiceUnavailable => "INSIGHTS_UNAVAILABLE",
        }
    }
}

impl From<InsightError> for AppError {
    fn from(err: InsightError) -> Self {
        let message = err.to_string();
        match err {
            InsightError::InvalidForm(errors) => errors.into(),
            InsightError::Disabled => Self::BusinessRule(message),
            InsightError::ServiceUnavailable => Self::ExternalService(message),
        }
    }
}
