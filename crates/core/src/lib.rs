//! Core business logic for Expensa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here; persistence,
//! reference data and narrative generation are reached through traits.
//!
//! # Modules
//!
//! - `expense` - Expense candidate validation
//! - `schedule` - Installment schedule calculation
//! - `allocation` - Exact splitting of amounts
//! - `preview` - Live economic preview of a partial expense
//! - `insight` - Narrative insight digest and service
//! - `submission` - Expense submission service
//! - `reference` - Cost-center and result-center lookup

pub mod allocation;
pub mod expense;
pub mod insight;
pub mod preview;
pub mod reference;
pub mod schedule;
pub mod submission;
