//! Live economic preview of an expense being entered.
//!
//! Unlike [`crate::expense::validate`], the preview accepts any candidate,
//! however incomplete, and summarizes whatever is already known. It is meant
//! to be recomputed on every form edit.

use chrono::NaiveDate;
use expensa_shared::types::money::CENT_PLACES;
use expensa_shared::types::{Currency, Money};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::allocation::AllocationUtil;
use crate::expense::mode::{AllocationMode, InstallmentMode, PaymentMode};
use crate::expense::types::{
    installments_summary, ExpenseCandidate, VariedInstallmentInput, SINGLE_PAYMENT_SUMMARY,
};
use crate::expense::validation::{MAX_INSTALLMENTS, MIN_INSTALLMENTS};
use crate::schedule::{compute_equal_schedule, default_varied_installments, CalculatedInstallment};

/// Placeholder shown for anything not filled in yet.
pub const NOT_DEFINED: &str = "Not defined";

/// One result center as shown in the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCenterPreview {
    /// Result center name (may be empty while being typed).
    pub name: String,
    /// Share of the total, in percent.
    pub percentage: Decimal,
    /// Share of the total value, once a positive total is known.
    pub amount: Option<Money>,
}

/// Summary of a possibly incomplete expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicPreview {
    /// Total value, if entered.
    pub total: Option<Money>,
    /// Competence date, if entered.
    pub competence_date: Option<NaiveDate>,
    /// Due date, if entered.
    pub due_date: Option<NaiveDate>,
    /// "Single payment", "N installments" or "Not defined".
    pub installment_summary: String,
    /// Cost center, if entered.
    pub cost_center: Option<String>,
    /// Result centers with their shares.
    pub result_centers: Vec<ResultCenterPreview>,
    /// Equal schedule, once its inputs are usable and the count is in range.
    pub schedule: Vec<CalculatedInstallment>,
    /// Suggested entries for an empty varied schedule.
    pub suggested_varied_installments: Vec<VariedInstallmentInput>,
}

impl EconomicPreview {
    /// Builds the preview for `candidate`.
    ///
    /// `today` dates the suggested varied installments.
    #[must_use]
    pub fn from_candidate(candidate: &ExpenseCandidate, currency: Currency, today: NaiveDate) -> Self {
        let total = candidate.total_value.map(|v| Money::new(v, currency));
        let usable_total = total.filter(Money::is_positive).map(|m| m.amount);

        let (installment_summary, schedule, suggested_varied_installments) =
            payment_preview(candidate.payment_mode(), usable_total, today);

        Self {
            total,
            competence_date: candidate.competence_date,
            due_date: candidate.due_date,
            installment_summary,
            cost_center: Some(candidate.cost_center.trim())
                .filter(|c| !c.is_empty())
                .map(ToString::to_string),
            result_centers: result_centers_preview(candidate.allocation_mode(), usable_total, currency),
            schedule,
            suggested_varied_installments,
        }
    }

    /// Cost center for display.
    #[must_use]
    pub fn cost_center_label(&self) -> &str {
        self.cost_center.as_deref().unwrap_or(NOT_DEFINED)
    }
}

fn payment_preview(
    mode: PaymentMode<'_>,
    total: Option<Decimal>,
    today: NaiveDate,
) -> (String, Vec<CalculatedInstallment>, Vec<VariedInstallmentInput>) {
    let PaymentMode::Installments { count, kind } = mode else {
        return (SINGLE_PAYMENT_SUMMARY.to_string(), vec![], vec![]);
    };
    let Some(count) = count else {
        return (NOT_DEFINED.to_string(), vec![], vec![]);
    };

    let summary = installments_summary(count);
    let usable = total.filter(|_| (MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&count));

    match (kind, usable) {
        (
            InstallmentMode::Equal {
                first_due_date: Some(first_due_date),
                periodicity,
            },
            Some(total),
        ) => (
            summary,
            compute_equal_schedule(total, count, first_due_date, periodicity),
            vec![],
        ),
        (InstallmentMode::Varied { lines }, Some(total)) if lines.is_empty() => {
            (summary, vec![], default_varied_installments(total, count, today))
        }
        _ => (summary, vec![], vec![]),
    }
}

fn result_centers_preview(
    mode: AllocationMode<'_>,
    total: Option<Decimal>,
    currency: Currency,
) -> Vec<ResultCenterPreview> {
    let lines: Vec<(String, Decimal)> = match mode {
        AllocationMode::Single { result_center } => result_center
            .map(str::trim)
            .filter(|rc| !rc.is_empty())
            .map(|rc| vec![(rc.to_string(), Decimal::ONE_HUNDRED)])
            .unwrap_or_default(),
        AllocationMode::Apportioned { lines } => lines
            .iter()
            .map(|line| (line.result_center.trim().to_string(), line.percentage))
            .collect(),
    };

    let amounts = total.and_then(|total| {
        let percentages: Vec<Decimal> = lines.iter().map(|(_, pct)| *pct).collect();
        AllocationUtil::shares_by_percentage(total, &percentages, CENT_PLACES)
    });

    lines
        .into_iter()
        .enumerate()
        .map(|(i, (name, percentage))| ResultCenterPreview {
            name,
            percentage,
            amount: amounts
                .as_ref()
                .and_then(|a| a.get(i))
                .map(|amount| Money::new(*amount, currency)),
        })
        .collect()
}
