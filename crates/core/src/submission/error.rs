//! Submission error types.

use expensa_shared::AppError;
use thiserror::Error;

use crate::expense::ValidationErrors;

/// Submission errors.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The candidate does not pass validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The repository rejected or failed to store the expense.
    #[error("repository error: {0}")]
    Persistence(String),
}

impl SubmissionError {
    /// Create a persistence error.
    #[must_use]
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(errors) => errors.into(),
            SubmissionError::Persistence(msg) => Self::Persistence(msg),
        }
    }
}
