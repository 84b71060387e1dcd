//! Branch selection for expense candidates.
//!
//! The flags on a candidate (`isApportioned`, `paymentMethod`,
//! `installmentType`) are resolved once into these variants. Each variant
//! only borrows the fields that are meaningful for it, so the rules for one
//! branch cannot accidentally read another branch's leftovers.

use chrono::NaiveDate;

use super::types::{
    ApportionmentInput, ExpenseCandidate, InstallmentType, PaymentMethod, VariedInstallmentInput,
};
use crate::schedule::Periodicity;

/// Allocation branch of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationMode<'a> {
    /// A single result center.
    Single {
        /// The selected result center, if any.
        result_center: Option<&'a str>,
    },
    /// Percentage apportionment.
    Apportioned {
        /// Apportionment lines as entered.
        lines: &'a [ApportionmentInput],
    },
}

/// Payment branch of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode<'a> {
    /// One payment.
    Single,
    /// Installments.
    Installments {
        /// Requested installment count, if any.
        count: Option<u32>,
        /// How installment values are determined.
        kind: InstallmentMode<'a>,
    },
}

/// Installment sub-branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallmentMode<'a> {
    /// No installment type chosen yet.
    Unspecified,
    /// Computed equal split.
    Equal {
        /// First due date, if any.
        first_due_date: Option<NaiveDate>,
        /// Interval between installments.
        periodicity: Periodicity,
    },
    /// Manually entered installments.
    Varied {
        /// Installment lines as entered.
        lines: &'a [VariedInstallmentInput],
    },
}

impl ExpenseCandidate {
    /// Resolves the allocation branch.
    #[must_use]
    pub fn allocation_mode(&self) -> AllocationMode<'_> {
        if self.is_apportioned {
            AllocationMode::Apportioned {
                lines: &self.apportionments,
            }
        } else {
            AllocationMode::Single {
                result_center: self.result_center.as_deref(),
            }
        }
    }

    /// Resolves the payment branch.
    #[must_use]
    pub fn payment_mode(&self) -> PaymentMode<'_> {
        match self.payment_method {
            PaymentMethod::Single => PaymentMode::Single,
            PaymentMethod::Installments => PaymentMode::Installments {
                count: self.installments,
                kind: match self.installment_type {
                    None => InstallmentMode::Unspecified,
                    Some(InstallmentType::Equal) => InstallmentMode::Equal {
                        first_due_date: self.first_installment_due_date,
                        periodicity: self.installment_periodicity,
                    },
                    Some(InstallmentType::Varied) => InstallmentMode::Varied {
                        lines: &self.varied_installments,
                    },
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_payment_ignores_installment_fields() {
        let candidate = ExpenseCandidate {
            payment_method: PaymentMethod::Single,
            installments: Some(5),
            installment_type: Some(InstallmentType::Varied),
            ..Default::default()
        };
        assert_eq!(candidate.payment_mode(), PaymentMode::Single);
    }

    #[test]
    fn test_apportioned_ignores_result_center() {
        let candidate = ExpenseCandidate {
            is_apportioned: true,
            result_center: Some("Services".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            candidate.allocation_mode(),
            AllocationMode::Apportioned { lines } if lines.is_empty()
        ));
    }

    #[test]
    fn test_equal_mode_carries_periodicity() {
        let candidate = ExpenseCandidate {
            payment_method: PaymentMethod::Installments,
            installments: Some(3),
            installment_type: Some(InstallmentType::Equal),
            installment_periodicity: Periodicity::Weekly,
            ..Default::default()
        };
        assert_eq!(
            candidate.payment_mode(),
            PaymentMode::Installments {
                count: Some(3),
                kind: InstallmentMode::Equal {
                    first_due_date: None,
                    periodicity: Periodicity::Weekly,
                },
            }
        );
    }
}
