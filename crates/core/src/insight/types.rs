//! Insight request and response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expense::ValidatedExpense;

/// A result center and its share, as seen by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCenterShare {
    /// Result center name.
    pub name: String,
    /// Share of the total, in percent.
    pub percentage: Decimal,
}

/// Structured summary of an expense handed to the narrative generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    /// Cost center name.
    pub cost_center: String,
    /// Full path of the cost center. Cost centers are flat, so this is the name.
    pub cost_center_path: String,
    /// Result centers with their shares.
    pub result_centers: Vec<ResultCenterShare>,
    /// Total value.
    pub total_value: Decimal,
    /// Competence date, ISO-8601.
    pub competence_date: String,
    /// Due date, ISO-8601.
    pub due_date: String,
    /// "Single payment" or "N installments".
    pub installment_summary: String,
    /// Expense description.
    pub description: String,
}

impl From<&ValidatedExpense> for InsightRequest {
    fn from(expense: &ValidatedExpense) -> Self {
        Self {
            cost_center: expense.cost_center.clone(),
            cost_center_path: expense.cost_center.clone(),
            result_centers: expense
                .allocation
                .shares()
                .into_iter()
                .map(|(name, percentage)| ResultCenterShare {
                    name: name.to_string(),
                    percentage,
                })
                .collect(),
            total_value: expense.total_value,
            competence_date: expense.competence_date.format("%Y-%m-%d").to_string(),
            due_date: expense.due_date.format("%Y-%m-%d").to_string(),
            installment_summary: expense.payment.summary(),
            description: expense.description.clone(),
        }
    }
}

/// Narrative returned by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightResponse {
    /// Free-text summary.
    pub summary: String,
}
