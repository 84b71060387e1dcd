//! Expense domain types.
//!
//! `ExpenseCandidate` is what a form builds up field by field; every field a
//! user may not have filled in yet is optional. `ValidatedExpense` is the
//! same data after validation, with the branch selections resolved into
//! tagged variants so downstream code never re-checks flags.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::{CalculatedInstallment, Periodicity};

/// How the expense is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// One payment on the due date.
    #[default]
    Single,
    /// Two or more installments.
    Installments,
}

/// How installment values are determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentType {
    /// Computed equal split.
    Equal,
    /// Entered manually per installment.
    Varied,
}

/// One apportionment line as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApportionmentInput {
    /// Result center receiving this share.
    #[serde(default)]
    pub result_center: String,
    /// Share of the total, in percent.
    #[serde(default)]
    pub percentage: Decimal,
}

/// One manually entered installment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariedInstallmentInput {
    /// Due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Amount due.
    #[serde(default)]
    pub value: Option<Decimal>,
}

/// A proposed expense, as assembled by the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseCandidate {
    /// Cost center the expense is charged against.
    pub cost_center: String,
    /// Free-text description (at least 10 characters).
    pub description: String,
    /// Total value of the expense.
    pub total_value: Option<Decimal>,
    /// Accrual (competence) date.
    pub competence_date: Option<NaiveDate>,
    /// Due date of the expense (first due date for single payment).
    pub due_date: Option<NaiveDate>,
    /// Whether the expense is split across several result centers.
    pub is_apportioned: bool,
    /// Result center, when not apportioned.
    pub result_center: Option<String>,
    /// Apportionment lines, when apportioned.
    pub apportionments: Vec<ApportionmentInput>,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Number of installments, when paying in installments.
    pub installments: Option<u32>,
    /// Equal or varied installments.
    pub installment_type: Option<InstallmentType>,
    /// First due date of an equal schedule.
    pub first_installment_due_date: Option<NaiveDate>,
    /// Interval between equal installments.
    pub installment_periodicity: Periodicity,
    /// Manually entered installments, when varied.
    pub varied_installments: Vec<VariedInstallmentInput>,
    /// Supplier name.
    pub supplier: Option<String>,
    /// Additional notes.
    pub notes: Option<String>,
}

/// A validated apportionment share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApportionmentShare {
    /// Result center receiving this share.
    pub result_center: String,
    /// Share of the total, in percent.
    pub percentage: Decimal,
}

/// A validated, manually entered installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariedInstallment {
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount due.
    pub value: Decimal,
}

/// Where the expense is allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Allocation {
    /// Entirely to one result center.
    #[serde(rename_all = "camelCase")]
    Single {
        /// The result center.
        result_center: String,
    },
    /// Split by percentage; shares sum to 100.
    Apportioned {
        /// The shares, in entry order.
        shares: Vec<ApportionmentShare>,
    },
}

impl Allocation {
    /// Returns `(result center, percentage)` pairs; a single allocation is one
    /// center at 100%.
    #[must_use]
    pub fn shares(&self) -> Vec<(&str, Decimal)> {
        match self {
            Self::Single { result_center } => vec![(result_center.as_str(), Decimal::ONE_HUNDRED)],
            Self::Apportioned { shares } => shares
                .iter()
                .map(|s| (s.result_center.as_str(), s.percentage))
                .collect(),
        }
    }
}

/// How the expense is paid, with the schedule resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum PaymentPlan {
    /// One payment on the expense due date.
    Single,
    /// Computed equal installments.
    #[serde(rename_all = "camelCase")]
    EqualInstallments {
        /// First due date.
        first_due_date: NaiveDate,
        /// Interval between installments.
        periodicity: Periodicity,
        /// The computed schedule; its length is the installment count.
        schedule: Vec<CalculatedInstallment>,
    },
    /// Manually entered installments summing to the total.
    VariedInstallments {
        /// The installments, in entry order.
        installments: Vec<VariedInstallment>,
    },
}

impl PaymentPlan {
    /// Number of payments this plan makes.
    #[must_use]
    pub fn installment_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::EqualInstallments { schedule, .. } => schedule.len(),
            Self::VariedInstallments { installments } => installments.len(),
        }
    }

    /// Human-readable one-line description of the plan.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Single => SINGLE_PAYMENT_SUMMARY.to_string(),
            _ => installments_summary(self.installment_count()),
        }
    }
}

pub(crate) const SINGLE_PAYMENT_SUMMARY: &str = "Single payment";

pub(crate) fn installments_summary(count: impl std::fmt::Display) -> String {
    format!("{count} installments")
}

/// An expense that passed every validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedExpense {
    /// Cost center the expense is charged against.
    pub cost_center: String,
    /// Description.
    pub description: String,
    /// Total value (positive).
    pub total_value: Decimal,
    /// Accrual (competence) date.
    pub competence_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Result-center allocation.
    pub allocation: Allocation,
    /// Payment plan.
    pub payment: PaymentPlan,
    /// Supplier name.
    pub supplier: Option<String>,
    /// Additional notes.
    pub notes: Option<String>,
}
