//! Expense entry validation.
//!
//! This module implements the expense-form rule set:
//! - Candidate and validated expense types
//! - Branch selection over allocation and payment modes
//! - Field-attributed validation errors
//! - The validation engine itself

pub mod error;
pub mod mode;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::{
    ApportionmentField, FieldError, FieldIssue, FieldPath, ValidationErrors,
    VariedInstallmentField,
};
pub use mode::{AllocationMode, InstallmentMode, PaymentMode};
pub use types::{
    Allocation, ApportionmentInput, ApportionmentShare, ExpenseCandidate, InstallmentType,
    PaymentMethod, PaymentPlan, ValidatedExpense, VariedInstallment, VariedInstallmentInput,
};
pub use validation::validate;
