//! Expense submission.
//!
//! Validates a candidate and hands the resulting expense to persistence.

mod error;
mod service;

pub use error::SubmissionError;
pub use service::{ExpenseRepository, ExpenseService};
