//! Installment scheduling.
//!
//! This module expands a total value into a dated installment schedule:
//! - Periodicity and calendar arithmetic (month-end clamping)
//! - Equal-split schedule computation
//! - Default entries for manually varied schedules

pub mod calculator;
pub mod periodicity;

#[cfg(test)]
mod props;

pub use calculator::{compute_equal_schedule, default_varied_installments, CalculatedInstallment};
pub use periodicity::Periodicity;
