//! Installment schedule computation.

use chrono::NaiveDate;
use expensa_shared::types::money::CENT_PLACES;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::periodicity::Periodicity;
use crate::allocation::AllocationUtil;
use crate::expense::types::VariedInstallmentInput;

/// One installment of an equal-split schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedInstallment {
    /// 1-based position in the schedule.
    pub sequence_number: u32,
    /// Due date of this installment.
    pub due_date: NaiveDate,
    /// Amount due.
    pub value: Decimal,
}

/// Expands `total_value` into `count` equal installments.
///
/// Every installment but the last carries `floor(total * 100 / count) / 100`;
/// the last one absorbs the remainder so the schedule sums exactly to
/// `total_value`. Installment `i` (0-based) is due `i` periods after
/// `first_due_date`.
///
/// Callers must ensure `count >= 2` and `total_value > 0`; this is not
/// checked here. The function never panics: `count == 0` yields an empty
/// schedule, and a due date past chrono's range saturates at
/// `NaiveDate::MAX`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use expensa_core::schedule::{compute_equal_schedule, Periodicity};
///
/// let first = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let schedule = compute_equal_schedule(dec!(100), 3, first, Periodicity::Monthly);
/// let values: Vec<_> = schedule.iter().map(|i| i.value).collect();
/// assert_eq!(values, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
/// ```
#[must_use]
pub fn compute_equal_schedule(
    total_value: Decimal,
    count: u32,
    first_due_date: NaiveDate,
    periodicity: Periodicity,
) -> Vec<CalculatedInstallment> {
    AllocationUtil::split_last_absorbs(total_value, count as usize, CENT_PLACES)
        .into_iter()
        .zip(0u32..)
        .map(|(value, index)| CalculatedInstallment {
            sequence_number: index + 1,
            due_date: periodicity
                .advance(first_due_date, index)
                .unwrap_or(NaiveDate::MAX),
            value,
        })
        .collect()
}

/// Builds `count` editable entries for a varied schedule, all due `today`.
///
/// Values are the equal split of `total_value` to the cent, so the entries
/// already satisfy the varied-schedule sum check before the user edits them.
#[must_use]
pub fn default_varied_installments(
    total_value: Decimal,
    count: u32,
    today: NaiveDate,
) -> Vec<VariedInstallmentInput> {
    AllocationUtil::split_last_absorbs(total_value, count as usize, CENT_PLACES)
        .into_iter()
        .map(|value| VariedInstallmentInput {
            due_date: Some(today),
            value: Some(value),
        })
        .collect()
}
