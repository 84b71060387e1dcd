//! Property-based tests for expense validation rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::FieldPath;
use super::types::{
    ApportionmentInput, ExpenseCandidate, InstallmentType, PaymentMethod, VariedInstallmentInput,
};
use super::validation::{validate, PERCENTAGE_TOLERANCE};
use crate::allocation::AllocationUtil;

/// Strategy to generate a positive amount from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate percentages with up to four decimal places.
fn percentages() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec((0i64..=1_000_000i64).prop_map(|p| Decimal::new(p, 4)), 1..6)
}

fn base_candidate(total: Decimal) -> ExpenseCandidate {
    ExpenseCandidate {
        cost_center: "Marketing and Sales".to_string(),
        description: "Trade show booth rental".to_string(),
        total_value: Some(total),
        competence_date: NaiveDate::from_ymd_opt(2024, 4, 1),
        due_date: NaiveDate::from_ymd_opt(2024, 4, 30),
        result_center: Some("Product B".to_string()),
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* apportionment, validation accepts exactly when the
    /// percentages sum to 100 within 0.001.
    #[test]
    fn prop_percentage_invariant(pcts in percentages()) {
        let candidate = ExpenseCandidate {
            is_apportioned: true,
            apportionments: pcts
                .iter()
                .enumerate()
                .map(|(i, p)| ApportionmentInput {
                    result_center: format!("RC-{i}"),
                    percentage: *p,
                })
                .collect(),
            ..base_candidate(Decimal::ONE_HUNDRED)
        };

        let sum: Decimal = pcts.iter().copied().sum();
        let expected_ok = (sum - Decimal::ONE_HUNDRED).abs() < PERCENTAGE_TOLERANCE;

        match validate(&candidate) {
            Ok(_) => prop_assert!(expected_ok, "accepted sum {}", sum),
            Err(errors) => {
                prop_assert!(!expected_ok, "rejected sum {}", sum);
                prop_assert!(errors.has_field(FieldPath::Apportionments));
            }
        }
    }

    /// *For any* number of result centers, an exact split of 100% is
    /// accepted and keeps its shares in entry order.
    #[test]
    fn prop_exact_split_accepted(n in 1usize..12) {
        let shares = AllocationUtil::split_last_absorbs(Decimal::ONE_HUNDRED, n, 4);
        let candidate = ExpenseCandidate {
            is_apportioned: true,
            apportionments: shares
                .iter()
                .enumerate()
                .map(|(i, p)| ApportionmentInput {
                    result_center: format!("RC-{i}"),
                    percentage: *p,
                })
                .collect(),
            ..base_candidate(Decimal::ONE_HUNDRED)
        };

        let expense = validate(&candidate).unwrap();
        let resolved: Vec<Decimal> = expense.allocation.shares().iter().map(|(_, p)| *p).collect();
        prop_assert_eq!(resolved, shares);
    }

    /// *For any* equal split of a positive total, the validated schedule sums
    /// exactly to the total.
    #[test]
    fn prop_equal_schedule_sums_to_total(total in positive_amount(), count in 2u32..48) {
        let candidate = ExpenseCandidate {
            payment_method: PaymentMethod::Installments,
            installments: Some(count),
            installment_type: Some(InstallmentType::Equal),
            first_installment_due_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..base_candidate(total)
        };

        let expense = validate(&candidate).unwrap();
        prop_assert_eq!(expense.payment.installment_count(), count as usize);
        if let super::types::PaymentPlan::EqualInstallments { schedule, .. } = expense.payment {
            let sum: Decimal = schedule.iter().map(|i| i.value).sum();
            prop_assert_eq!(sum, total);
        } else {
            prop_assert!(false, "expected an equal schedule");
        }
    }

    /// *For any* single-payment candidate, stray installment fields never
    /// cause rejection.
    #[test]
    fn prop_single_payment_bypass(
        total in positive_amount(),
        stray_count in proptest::option::of(0u32..10),
        stray_type in proptest::option::of(prop_oneof![
            Just(InstallmentType::Equal),
            Just(InstallmentType::Varied),
        ]),
        stray_lines in 0usize..4,
    ) {
        let candidate = ExpenseCandidate {
            payment_method: PaymentMethod::Single,
            installments: stray_count,
            installment_type: stray_type,
            varied_installments: vec![VariedInstallmentInput::default(); stray_lines],
            ..base_candidate(total)
        };
        prop_assert!(validate(&candidate).is_ok());
    }

    /// *For any* varied schedule whose length differs from the count, the
    /// candidate is rejected on `variedInstallments` whatever the values.
    #[test]
    fn prop_varied_length_mismatch_rejected(
        count in 2u32..12,
        values in prop::collection::vec(positive_amount(), 1..12),
    ) {
        prop_assume!(values.len() != count as usize);
        let total: Decimal = values.iter().copied().sum();
        let candidate = ExpenseCandidate {
            payment_method: PaymentMethod::Installments,
            installments: Some(count),
            installment_type: Some(InstallmentType::Varied),
            varied_installments: values
                .iter()
                .map(|v| VariedInstallmentInput {
                    due_date: NaiveDate::from_ymd_opt(2024, 5, 5),
                    value: Some(*v),
                })
                .collect(),
            ..base_candidate(total)
        };

        let errors = validate(&candidate).unwrap_err();
        prop_assert!(errors.has_field(FieldPath::VariedInstallments));
    }
}
