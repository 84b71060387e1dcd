//! Property-based tests for installment scheduling.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::compute_equal_schedule;
use super::periodicity::Periodicity;

/// Strategy to generate a positive total from 0.01 to 10,000,000.00.
fn positive_total() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a first due date between 2000 and 2099.
fn first_due_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        // Clamp the day into the month so every combination is a valid date.
        (28..=d)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(y, m, day))
            .or_else(|| NaiveDate::from_ymd_opt(y, m, d))
            .unwrap()
    })
}

fn periodicity_strategy() -> impl Strategy<Value = Periodicity> {
    prop_oneof![
        Just(Periodicity::Monthly),
        Just(Periodicity::Weekly),
        Just(Periodicity::Biweekly),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* positive total and count >= 2, the schedule sums exactly to
    /// the total and has exactly `count` entries.
    #[test]
    fn prop_schedule_sums_to_total(
        total in positive_total(),
        count in 2u32..120,
        first in first_due_date(),
        periodicity in periodicity_strategy(),
    ) {
        let schedule = compute_equal_schedule(total, count, first, periodicity);
        prop_assert_eq!(schedule.len(), count as usize);
        let sum: Decimal = schedule.iter().map(|i| i.value).sum();
        prop_assert_eq!(sum, total);
    }

    /// *For any* schedule, all installments but the last share one base value
    /// and the last differs from it by less than `count` cents.
    #[test]
    fn prop_last_installment_absorbs_remainder(
        total in positive_total(),
        count in 2u32..120,
        first in first_due_date(),
    ) {
        let schedule = compute_equal_schedule(total, count, first, Periodicity::Monthly);
        let base = schedule[0].value;
        prop_assert!(schedule[..schedule.len() - 1].iter().all(|i| i.value == base));

        let last = schedule[schedule.len() - 1].value;
        let max_extra = Decimal::new(i64::from(count), 2);
        prop_assert!(last >= base);
        prop_assert!(last - base < max_extra);
    }

    /// *For any* schedule, due dates start at the first due date and strictly
    /// increase.
    #[test]
    fn prop_due_dates_strictly_increase(
        total in positive_total(),
        count in 2u32..60,
        first in first_due_date(),
        periodicity in periodicity_strategy(),
    ) {
        let schedule = compute_equal_schedule(total, count, first, periodicity);
        prop_assert_eq!(schedule[0].due_date, first);
        prop_assert!(schedule.windows(2).all(|w| w[0].due_date < w[1].due_date));
    }
}
