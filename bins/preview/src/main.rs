//! Expensa Preview
//!
//! Reads an expense candidate as JSON and prints its economic preview,
//! validation outcome and the digest that would be sent for insights.
//!
//! Usage: `expensa-preview <candidate.json>`

use std::process::ExitCode;

use anyhow::Context;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expensa_core::expense::{ExpenseCandidate, validate};
use expensa_core::insight::InsightRequest;
use expensa_core::preview::EconomicPreview;
use expensa_core::reference::{StaticReferenceData, unknown_references};
use expensa_shared::{AppConfig, AppError};

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;

    // Initialize tracing
    let json_logs = config.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: expensa-preview <candidate.json>")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
    let candidate: ExpenseCandidate =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {path}"))?;
    info!(path = %path, "Loaded expense candidate");

    let references = StaticReferenceData::from(&config.expense);
    for unknown in unknown_references(&references, &candidate) {
        warn!(reference = %unknown, "Candidate refers to unknown reference data");
    }

    let today = chrono::Local::now().date_naive();
    let preview = EconomicPreview::from_candidate(&candidate, config.expense.currency, today);
    match preview.total {
        Some(total) => info!(
            total = %total,
            installments = %preview.installment_summary,
            cost_center = preview.cost_center_label(),
            "Economic preview"
        ),
        None => info!(currency = %config.expense.currency, "Economic preview without a total"),
    }

    let (output, code) = match validate(&candidate) {
        Ok(expense) => {
            info!(
                payments = expense.payment.installment_count(),
                "Expense candidate is valid"
            );
            let digest = InsightRequest::from(&expense);
            (
                json!({ "valid": true, "preview": preview, "expense": expense, "insightRequest": digest }),
                ExitCode::SUCCESS,
            )
        }
        Err(errors) => {
            warn!(error_count = errors.len(), "Expense candidate is invalid");
            (
                json!({ "valid": false, "preview": preview, "errors": errors }),
                ExitCode::FAILURE,
            )
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}
