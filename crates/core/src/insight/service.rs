//! Insight service implementation.

use std::sync::Arc;
use std::time::Duration;

use expensa_shared::config::InsightConfig;
use tracing::{debug, error, info, warn};

use super::error::{GeneratorError, InsightError};
use super::types::{InsightRequest, InsightResponse};
use crate::expense::{validate, ExpenseCandidate};

/// Narrative generator seam.
///
/// Implemented outside this crate by whatever produces the free-text summary.
pub trait NarrativeGenerator: Send + Sync {
    /// Produce a narrative for the digest.
    fn generate(
        &self,
        request: InsightRequest,
    ) -> impl std::future::Future<Output = Result<InsightResponse, GeneratorError>> + Send;
}

/// Service producing narrative insights for expense candidates.
pub struct InsightService<G: NarrativeGenerator> {
    generator: Arc<G>,
    enabled: bool,
    timeout: Duration,
}

impl<G: NarrativeGenerator> InsightService<G> {
    /// Create a new insight service.
    #[must_use]
    pub fn new(generator: Arc<G>, config: &InsightConfig) -> Self {
        Self {
            generator,
            enabled: config.enabled,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Generate insights for a candidate.
    ///
    /// The candidate is validated first; only well-formed expenses are sent
    /// to the generator.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Insights are disabled
    /// - The candidate does not pass validation
    /// - The generator fails or does not answer in time
    pub async fn generate_insights(
        &self,
        candidate: &ExpenseCandidate,
    ) -> Result<InsightResponse, InsightError> {
        if !self.enabled {
            return Err(InsightError::Disabled);
        }

        let expense = validate(candidate).map_err(|errors| {
            debug!(error_count = errors.len(), "Insight request rejected by validation");
            InsightError::InvalidForm(errors)
        })?;

        let request = InsightRequest::from(&expense);
        info!(
            cost_center = %request.cost_center,
            total_value = %request.total_value,
            installments = %request.installment_summary,
            "Requesting expense insights"
        );

        match tokio::time::timeout(self.timeout, self.generator.generate(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                error!(error = %e, "Error generating expense insights");
                Err(InsightError::ServiceUnavailable)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Expense insight generation timed out"
                );
                Err(InsightError::ServiceUnavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ApportionmentInput;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Mock generator for testing.
    struct MockGenerator {
        requests: Mutex<Vec<InsightRequest>>,
        fail: bool,
    }

    impl MockGenerator {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl NarrativeGenerator for MockGenerator {
        async fn generate(&self, request: InsightRequest) -> Result<InsightResponse, GeneratorError> {
            let summary = format!("{} split across {} centers", request.cost_center, request.result_centers.len());
            self.requests.lock().unwrap().push(request);
            if self.fail {
                return Err(GeneratorError::new("upstream returned 500"));
            }
            Ok(InsightResponse { summary })
        }
    }

    /// Generator that never answers.
    struct StalledGenerator;

    impl NarrativeGenerator for StalledGenerator {
        async fn generate(&self, _request: InsightRequest) -> Result<InsightResponse, GeneratorError> {
            std::future::pending::<Result<InsightResponse, GeneratorError>>().await
        }
    }

    fn valid_candidate() -> ExpenseCandidate {
        ExpenseCandidate {
            cost_center: "Marketing and Sales".to_string(),
            description: "Trade show booth rental".to_string(),
            total_value: Some(dec!(1200)),
            competence_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 20),
            is_apportioned: true,
            apportionments: vec![
                ApportionmentInput {
                    result_center: "Product A".to_string(),
                    percentage: dec!(50),
                },
                ApportionmentInput {
                    result_center: "Product B".to_string(),
                    percentage: dec!(50),
                },
            ],
            ..Default::default()
        }
    }

    fn config(enabled: bool, timeout_secs: u64) -> InsightConfig {
        InsightConfig {
            enabled,
            timeout_secs,
        }
    }

    #[tokio::test]
    async fn test_generate_insights_success() {
        let generator = Arc::new(MockGenerator::new());
        let service = InsightService::new(generator.clone(), &config(true, 30));

        let response = service.generate_insights(&valid_candidate()).await.unwrap();

        assert_eq!(response.summary, "Marketing and Sales split across 2 centers");
        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests[0].competence_date, "2024-05-01");
        assert_eq!(requests[0].installment_summary, "Single payment");
    }

    #[tokio::test]
    async fn test_invalid_candidate_never_reaches_generator() {
        let generator = Arc::new(MockGenerator::new());
        let service = InsightService::new(generator.clone(), &config(true, 30));
        let candidate = ExpenseCandidate {
            description: "short".to_string(),
            ..valid_candidate()
        };

        let result = service.generate_insights(&candidate).await;

        assert!(matches!(result, Err(InsightError::InvalidForm(ref e)) if e.len() == 1));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_generator_failure_is_generic() {
        let generator = Arc::new(MockGenerator::failing());
        let service = InsightService::new(generator.clone(), &config(true, 30));

        let err = service.generate_insights(&valid_candidate()).await.unwrap_err();

        assert!(matches!(err, InsightError::ServiceUnavailable));
        assert!(!err.to_string().contains("500"));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_unavailable() {
        let service = InsightService::new(Arc::new(StalledGenerator), &config(true, 0));

        let err = service.generate_insights(&valid_candidate()).await.unwrap_err();

        assert!(matches!(err, InsightError::ServiceUnavailable));
    }

    #[tokio::test]
    async fn test_disabled() {
        let generator = Arc::new(MockGenerator::new());
        let service = InsightService::new(generator.clone(), &config(false, 30));

        let err = service.generate_insights(&valid_candidate()).await.unwrap_err();

        assert!(matches!(err, InsightError::Disabled));
        assert_eq!(generator.calls(), 0);
    }
}
