//! Business rule validation for expense candidates.
//!
//! Rules run in a fixed order so error display is deterministic:
//!
//! 0. Base fields (cost center, description, total value, dates)
//! 1. Allocation completeness, reported on `resultCenter` in both modes
//! 2. Apportionment percentages sum to 100 (± 0.001)
//! 3. Installment count between 2 and 360, and installment type chosen
//! 4. Equal schedule has a first due date
//! 5. Varied schedule matches the count and the total (± 0.01), checked
//!    only once rule 3 accepted the count
//!
//! Nothing short-circuits: a candidate breaking several rules gets every
//! violation back in one pass.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::{
    ApportionmentField, FieldIssue, FieldPath, ValidationErrors, VariedInstallmentField,
};
use super::mode::{AllocationMode, InstallmentMode, PaymentMode};
use super::types::{
    Allocation, ApportionmentShare, ExpenseCandidate, PaymentPlan, ValidatedExpense,
    VariedInstallment,
};
use crate::schedule::compute_equal_schedule;

/// Minimum description length, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Minimum number of installments.
pub const MIN_INSTALLMENTS: u32 = 2;

/// Maximum number of installments (thirty years of monthly payments).
pub const MAX_INSTALLMENTS: u32 = 360;

/// Allowed deviation of the apportionment percentage sum from 100 (0.001).
pub const PERCENTAGE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Allowed deviation of the varied installment sum from the total (0.01).
pub const INSTALLMENT_SUM_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Validates an expense candidate.
///
/// # Errors
///
/// Returns every violated rule, in evaluation order.
pub fn validate(candidate: &ExpenseCandidate) -> Result<ValidatedExpense, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let base = check_base_fields(candidate, &mut errors);
    let allocation = check_allocation(candidate.allocation_mode(), &mut errors);
    let payment = check_payment(candidate.payment_mode(), candidate.total_value, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    // A check only yields None after recording an error.
    match (base, allocation, payment) {
        (Some(base), Some(allocation), Some(payment)) => Ok(ValidatedExpense {
            cost_center: base.cost_center,
            description: candidate.description.clone(),
            total_value: base.total_value,
            competence_date: base.competence_date,
            due_date: base.due_date,
            allocation,
            payment,
            supplier: non_blank(candidate.supplier.as_deref()),
            notes: non_blank(candidate.notes.as_deref()),
        }),
        _ => Err(errors),
    }
}

struct BaseFields {
    cost_center: String,
    total_value: Decimal,
    competence_date: NaiveDate,
    due_date: NaiveDate,
}

fn check_base_fields(
    candidate: &ExpenseCandidate,
    errors: &mut ValidationErrors,
) -> Option<BaseFields> {
    let cost_center = non_blank(Some(&candidate.cost_center));
    if cost_center.is_none() {
        errors.push(FieldPath::CostCenter, FieldIssue::CostCenterRequired);
    }

    if candidate.description.chars().count() < MIN_DESCRIPTION_CHARS {
        errors.push(
            FieldPath::Description,
            FieldIssue::DescriptionTooShort {
                min: MIN_DESCRIPTION_CHARS,
            },
        );
    }

    let total_value = match candidate.total_value {
        None => {
            errors.push(FieldPath::TotalValue, FieldIssue::TotalValueRequired);
            None
        }
        Some(value) if value <= Decimal::ZERO => {
            errors.push(FieldPath::TotalValue, FieldIssue::TotalValueNotPositive);
            None
        }
        Some(value) => Some(value),
    };

    if candidate.competence_date.is_none() {
        errors.push(FieldPath::CompetenceDate, FieldIssue::CompetenceDateRequired);
    }
    if candidate.due_date.is_none() {
        errors.push(FieldPath::DueDate, FieldIssue::DueDateRequired);
    }

    Some(BaseFields {
        cost_center: cost_center?,
        total_value: total_value?,
        competence_date: candidate.competence_date?,
        due_date: candidate.due_date?,
    })
}

/// Rules 1 and 2.
fn check_allocation(mode: AllocationMode<'_>, errors: &mut ValidationErrors) -> Option<Allocation> {
    match mode {
        AllocationMode::Single { result_center } => {
            let Some(result_center) = non_blank(result_center) else {
                errors.push(FieldPath::ResultCenter, FieldIssue::AllocationMissing);
                return None;
            };
            Some(Allocation::Single { result_center })
        }
        AllocationMode::Apportioned { lines } => {
            let before = errors.len();

            if lines.is_empty() {
                errors.push(FieldPath::ResultCenter, FieldIssue::AllocationMissing);
            }

            for (index, line) in lines.iter().enumerate() {
                if line.result_center.trim().is_empty() {
                    errors.push(
                        FieldPath::Apportionment(index, ApportionmentField::ResultCenter),
                        FieldIssue::ApportionmentResultCenterRequired,
                    );
                }
                if line.percentage < Decimal::ZERO {
                    errors.push(
                        FieldPath::Apportionment(index, ApportionmentField::Percentage),
                        FieldIssue::NegativePercentage,
                    );
                }
            }

            let (total, within) = match checked_sum(lines.iter().map(|line| line.percentage)) {
                Ok(total) => (
                    total,
                    total
                        .checked_sub(Decimal::ONE_HUNDRED)
                        .is_some_and(|diff| diff.abs() < PERCENTAGE_TOLERANCE),
                ),
                Err(bound) => (bound, false),
            };
            if !within {
                errors.push(
                    FieldPath::Apportionments,
                    FieldIssue::PercentageSumMismatch { total },
                );
            }

            if errors.len() > before {
                return None;
            }

            Some(Allocation::Apportioned {
                shares: lines
                    .iter()
                    .map(|line| ApportionmentShare {
                        result_center: line.result_center.trim().to_string(),
                        percentage: line.percentage,
                    })
                    .collect(),
            })
        }
    }
}

/// Rules 3, 4 and 5. Single payment skips all of them.
fn check_payment(
    mode: PaymentMode<'_>,
    total_value: Option<Decimal>,
    errors: &mut ValidationErrors,
) -> Option<PaymentPlan> {
    let PaymentMode::Installments { count, kind } = mode else {
        return Some(PaymentPlan::Single);
    };

    let before = errors.len();

    let count = match count {
        Some(c) if c > MAX_INSTALLMENTS => {
            errors.push(
                FieldPath::Installments,
                FieldIssue::InstallmentCountTooHigh {
                    max: MAX_INSTALLMENTS,
                },
            );
            None
        }
        Some(c) if c >= MIN_INSTALLMENTS => Some(c),
        _ => {
            errors.push(
                FieldPath::Installments,
                FieldIssue::InstallmentCountTooLow {
                    min: MIN_INSTALLMENTS,
                },
            );
            None
        }
    };

    match kind {
        InstallmentMode::Unspecified => {
            errors.push(FieldPath::InstallmentType, FieldIssue::InstallmentTypeRequired);
        }
        InstallmentMode::Equal { first_due_date, .. } => {
            if first_due_date.is_none() {
                errors.push(
                    FieldPath::FirstInstallmentDueDate,
                    FieldIssue::FirstInstallmentDueDateRequired,
                );
            }
        }
        InstallmentMode::Varied { lines } => {
            for (index, line) in lines.iter().enumerate() {
                if line.due_date.is_none() {
                    errors.push(
                        FieldPath::VariedInstallment(index, VariedInstallmentField::DueDate),
                        FieldIssue::InstallmentDueDateRequired,
                    );
                }
                if line.value.is_none_or(|value| value <= Decimal::ZERO) {
                    errors.push(
                        FieldPath::VariedInstallment(index, VariedInstallmentField::Value),
                        FieldIssue::InstallmentValueNotPositive,
                    );
                }
            }

            // Rule 3 reports a missing or out-of-range count; this check needs one.
            let consistent = count.is_none_or(|count| {
                lines.len() == count as usize
                    && checked_sum(lines.iter().filter_map(|line| line.value)).is_ok_and(|sum| {
                        sum.checked_sub(total_value.unwrap_or(Decimal::ZERO))
                            .is_some_and(|diff| diff.abs() < INSTALLMENT_SUM_TOLERANCE)
                    })
            });

            if !consistent {
                errors.push(
                    FieldPath::VariedInstallments,
                    FieldIssue::VariedInstallmentsMismatch,
                );
            }
        }
    }

    if errors.len() > before {
        return None;
    }

    match kind {
        InstallmentMode::Unspecified => None,
        InstallmentMode::Equal {
            first_due_date,
            periodicity,
        } => {
            let first_due_date = first_due_date?;
            Some(PaymentPlan::EqualInstallments {
                first_due_date,
                periodicity,
                schedule: compute_equal_schedule(total_value?, count?, first_due_date, periodicity),
            })
        }
        InstallmentMode::Varied { lines } => {
            let installments = lines
                .iter()
                .map(|line| {
                    Some(VariedInstallment {
                        due_date: line.due_date?,
                        value: line.value?,
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            Some(PaymentPlan::VariedInstallments { installments })
        }
    }
}

/// Sums without overflowing; `Err` carries the bound the sum ran past.
fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal, Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value).ok_or(if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
