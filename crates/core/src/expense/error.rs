//! Expense validation error types.
//!
//! Validation never stops at the first failure. Every violated rule becomes
//! a [`FieldError`] attributed to a [`FieldPath`], and all of them are
//! returned together in [`ValidationErrors`] so a form can show them at once.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use expensa_shared::AppError;

/// Field of an apportionment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApportionmentField {
    /// `resultCenter`
    ResultCenter,
    /// `percentage`
    Percentage,
}

/// Field of a varied installment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariedInstallmentField {
    /// `dueDate`
    DueDate,
    /// `value`
    Value,
}

/// Path of the form field an error is attached to.
///
/// Displays in the dotted camelCase notation form libraries use, e.g.
/// `apportionments.1.percentage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    /// `costCenter`
    CostCenter,
    /// `description`
    Description,
    /// `totalValue`
    TotalValue,
    /// `competenceDate`
    CompetenceDate,
    /// `dueDate`
    DueDate,
    /// `resultCenter`
    ResultCenter,
    /// `apportionments`
    Apportionments,
    /// `apportionments.N.<field>`
    Apportionment(usize, ApportionmentField),
    /// `installments`
    Installments,
    /// `installmentType`
    InstallmentType,
    /// `firstInstallmentDueDate`
    FirstInstallmentDueDate,
    /// `variedInstallments`
    VariedInstallments,
    /// `variedInstallments.N.<field>`
    VariedInstallment(usize, VariedInstallmentField),
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CostCenter => f.write_str("costCenter"),
            Self::Description => f.write_str("description"),
            Self::TotalValue => f.write_str("totalValue"),
            Self::CompetenceDate => f.write_str("competenceDate"),
            Self::DueDate => f.write_str("dueDate"),
            Self::ResultCenter => f.write_str("resultCenter"),
            Self::Apportionments => f.write_str("apportionments"),
            Self::Apportionment(index, field) => {
                let field = match field {
                    ApportionmentField::ResultCenter => "resultCenter",
                    ApportionmentField::Percentage => "percentage",
                };
                write!(f, "apportionments.{index}.{field}")
            }
            Self::Installments => f.write_str("installments"),
            Self::InstallmentType => f.write_str("installmentType"),
            Self::FirstInstallmentDueDate => f.write_str("firstInstallmentDueDate"),
            Self::VariedInstallments => f.write_str("variedInstallments"),
            Self::VariedInstallment(index, field) => {
                let field = match field {
                    VariedInstallmentField::DueDate => "dueDate",
                    VariedInstallmentField::Value => "value",
                };
                write!(f, "variedInstallments.{index}.{field}")
            }
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIssue {
    // ========== Base Field Errors ==========
    /// Cost center is empty.
    #[error("Cost center is required.")]
    CostCenterRequired,

    /// Description is shorter than the minimum.
    #[error("Description must be at least {min} characters long.")]
    DescriptionTooShort {
        /// Minimum number of characters.
        min: usize,
    },

    /// Total value is missing.
    #[error("Total value is required.")]
    TotalValueRequired,

    /// Total value is zero or negative.
    #[error("Total value must be positive.")]
    TotalValueNotPositive,

    /// Competence date is missing.
    #[error("Competence date is required.")]
    CompetenceDateRequired,

    /// Due date is missing.
    #[error("Due date is required.")]
    DueDateRequired,

    // ========== Allocation Errors ==========
    /// Neither a result center nor any apportionment is defined.
    #[error("Define the result center or the apportionment.")]
    AllocationMissing,

    /// An apportionment line has no result center.
    #[error("Result center is required.")]
    ApportionmentResultCenterRequired,

    /// An apportionment line has a negative percentage.
    #[error("Percentage cannot be negative.")]
    NegativePercentage,

    /// Apportionment percentages do not add up to 100.
    #[error("Apportionment percentages must add up to 100% (got {total}%).")]
    PercentageSumMismatch {
        /// Actual sum of the percentages.
        total: Decimal,
    },

    // ========== Installment Errors ==========
    /// Installment count is missing or below the minimum.
    #[error("The number of installments must be at least {min}.")]
    InstallmentCountTooLow {
        /// Minimum number of installments.
        min: u32,
    },

    /// Installment count is above the maximum.
    #[error("The number of installments cannot exceed {max}.")]
    InstallmentCountTooHigh {
        /// Maximum number of installments.
        max: u32,
    },

    /// Installment type was not chosen.
    #[error("Installment type is required.")]
    InstallmentTypeRequired,

    /// Equal schedule without a first due date.
    #[error("The first installment due date is required.")]
    FirstInstallmentDueDateRequired,

    /// A varied installment has no due date.
    #[error("Due date is required.")]
    InstallmentDueDateRequired,

    /// A varied installment value is missing, zero or negative.
    #[error("Value must be positive.")]
    InstallmentValueNotPositive,

    /// Varied installments do not match the count or the total.
    #[error(
        "The installment values must add up to the total value and the number of installments must match."
    )]
    VariedInstallmentsMismatch,
}

impl FieldIssue {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CostCenterRequired => "COST_CENTER_REQUIRED",
            Self::DescriptionTooShort { .. } => "DESCRIPTION_TOO_SHORT",
            Self::TotalValueRequired => "TOTAL_VALUE_REQUIRED",
            Self::TotalValueNotPositive => "TOTAL_VALUE_NOT_POSITIVE",
            Self::CompetenceDateRequired => "COMPETENCE_DATE_REQUIRED",
            Self::DueDateRequired => "DUE_DATE_REQUIRED",
            Self::AllocationMissing => "ALLOCATION_MISSING",
            Self::ApportionmentResultCenterRequired => "APPORTIONMENT_RESULT_CENTER_REQUIRED",
            Self::NegativePercentage => "NEGATIVE_PERCENTAGE",
            Self::PercentageSumMismatch { .. } => "PERCENTAGE_SUM_MISMATCH",
            Self::InstallmentCountTooLow { .. } => "INSTALLMENT_COUNT_TOO_LOW",
            Self::InstallmentCountTooHigh { .. } => "INSTALLMENT_COUNT_TOO_HIGH",
            Self::InstallmentTypeRequired => "INSTALLMENT_TYPE_REQUIRED",
            Self::FirstInstallmentDueDateRequired => "FIRST_INSTALLMENT_DUE_DATE_REQUIRED",
            Self::InstallmentDueDateRequired => "INSTALLMENT_DUE_DATE_REQUIRED",
            Self::InstallmentValueNotPositive => "INSTALLMENT_VALUE_NOT_POSITIVE",
            Self::VariedInstallmentsMismatch => "VARIED_INSTALLMENTS_MISMATCH",
        }
    }

    /// Returns true if the issue concerns the relationship between fields
    /// rather than a single value.
    #[must_use]
    pub const fn is_cross_field(&self) -> bool {
        matches!(
            self,
            Self::AllocationMissing
                | Self::PercentageSumMismatch { .. }
                | Self::VariedInstallmentsMismatch
        )
    }
}

/// A validation failure attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field the error is displayed on.
    pub field: FieldPath,
    /// What is wrong.
    pub issue: FieldIssue,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub const fn new(field: FieldPath, issue: FieldIssue) -> Self {
        Self { field, issue }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.issue.to_string()
    }

    /// Stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        self.issue.error_code()
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.issue)
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 3)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("code", self.error_code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

/// Every rule an expense candidate violated, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[error("Expense has {} validation error(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Records a violation.
    pub fn push(&mut self, field: FieldPath, issue: FieldIssue) {
        self.errors.push(FieldError::new(field, issue));
    }

    /// Returns true if no rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates violations in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Violations attached to `field`.
    pub fn for_field(&self, field: FieldPath) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Returns true if at least one violation is attached to `field`.
    #[must_use]
    pub fn has_field(&self, field: FieldPath) -> bool {
        self.for_field(field).next().is_some()
    }

    /// Messages grouped by field path, for form display.
    #[must_use]
    pub fn messages_by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            grouped
                .entry(error.field.to_string())
                .or_default()
                .push(error.message());
        }
        grouped
    }

    /// Consumes the collection, returning the violations.
    #[must_use]
    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(details)
    }
}
