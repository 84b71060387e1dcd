//! Narrative insights for a proposed expense.
//!
//! This module provides:
//! - The structured digest sent to the narrative generator
//! - The generator seam (implemented outside this crate)
//! - The service that validates, calls the generator and maps failures

mod error;
mod service;
mod types;

pub use error::{GeneratorError, InsightError};
pub use service::{InsightService, NarrativeGenerator};
pub use types::{InsightRequest, InsightResponse, ResultCenterShare};
