//! Expense submission service implementation.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::error::SubmissionError;
use crate::expense::{validate, ExpenseCandidate, ValidatedExpense};

/// Repository trait for expense persistence.
///
/// Only success or failure of `save` is consumed.
pub trait ExpenseRepository: Send + Sync {
    /// Store a validated expense.
    fn save(
        &self,
        expense: ValidatedExpense,
    ) -> impl std::future::Future<Output = Result<(), SubmissionError>> + Send;
}

/// Service submitting expense candidates.
pub struct ExpenseService<R: ExpenseRepository> {
    repo: Arc<R>,
}

impl<R: ExpenseRepository> ExpenseService<R> {
    /// Create a new expense service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validate a candidate and store it.
    ///
    /// Returns the stored expense, including any computed schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The candidate does not pass validation
    /// - The repository fails
    pub async fn submit(
        &self,
        candidate: &ExpenseCandidate,
    ) -> Result<ValidatedExpense, SubmissionError> {
        let expense = validate(candidate).inspect_err(|errors| {
            warn!(error_count = errors.len(), "Expense submission rejected");
        })?;

        self.repo.save(expense.clone()).await.inspect_err(|e| {
            error!(error = %e, "Failed to store expense");
        })?;

        info!(
            cost_center = %expense.cost_center,
            total_value = %expense.total_value,
            payments = expense.payment.installment_count(),
            "Expense submitted"
        );
        Ok(expense)
    }
}
