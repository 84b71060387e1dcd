//! Reference-data lookup.
//!
//! Cost-center and result-center lists come from outside the core. Validation
//! never checks that a name exists; [`unknown_references`] only reports names
//! missing from the current lists so callers can warn.

use expensa_shared::config::ExpenseConfig;

use crate::expense::mode::AllocationMode;
use crate::expense::ExpenseCandidate;

/// Source of the current reference lists.
pub trait ReferenceDataProvider: Send + Sync {
    /// Known cost-center names.
    fn cost_centers(&self) -> Vec<String>;

    /// Known result-center names.
    fn result_centers(&self) -> Vec<String>;
}

/// Reference lists fixed at construction, typically from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceData {
    cost_centers: Vec<String>,
    result_centers: Vec<String>,
}

impl StaticReferenceData {
    /// Create from explicit lists.
    #[must_use]
    pub fn new(cost_centers: Vec<String>, result_centers: Vec<String>) -> Self {
        Self {
            cost_centers,
            result_centers,
        }
    }
}

impl From<&ExpenseConfig> for StaticReferenceData {
    fn from(config: &ExpenseConfig) -> Self {
        Self::new(config.cost_centers.clone(), config.result_centers.clone())
    }
}

impl ReferenceDataProvider for StaticReferenceData {
    fn cost_centers(&self) -> Vec<String> {
        self.cost_centers.clone()
    }

    fn result_centers(&self) -> Vec<String> {
        self.result_centers.clone()
    }
}

/// A name on the candidate that the provider does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownReference {
    /// Unknown cost center.
    CostCenter(String),
    /// Unknown result center.
    ResultCenter(String),
}

impl std::fmt::Display for UnknownReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CostCenter(name) => write!(f, "unknown cost center '{name}'"),
            Self::ResultCenter(name) => write!(f, "unknown result center '{name}'"),
        }
    }
}

/// Lists the non-empty names on `candidate` that `provider` does not know.
///
/// Only the active allocation branch is inspected.
#[must_use]
pub fn unknown_references<P: ReferenceDataProvider + ?Sized>(
    provider: &P,
    candidate: &ExpenseCandidate,
) -> Vec<UnknownReference> {
    let cost_centers = provider.cost_centers();
    let result_centers = provider.result_centers();
    let mut unknown = Vec::new();

    let cost_center = candidate.cost_center.trim();
    if !cost_center.is_empty() && !cost_centers.iter().any(|c| c == cost_center) {
        unknown.push(UnknownReference::CostCenter(cost_center.to_string()));
    }

    let names: Vec<&str> = match candidate.allocation_mode() {
        AllocationMode::Single { result_center } => result_center.into_iter().collect(),
        AllocationMode::Apportioned { lines } => {
            lines.iter().map(|l| l.result_center.as_str()).collect()
        }
    };
    for name in names.into_iter().map(str::trim).filter(|n| !n.is_empty()) {
        if !result_centers.iter().any(|r| r == name) {
            unknown.push(UnknownReference::ResultCenter(name.to_string()));
        }
    }

    unknown
}
