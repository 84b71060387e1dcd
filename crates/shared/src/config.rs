//! Application configuration management.

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Narrative insight configuration.
    #[serde(default)]
    pub insights: InsightConfig,
    /// Expense entry configuration.
    #[serde(default)]
    pub expense: ExpenseConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "expensa=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Narrative insight configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightConfig {
    /// Whether insight generation is offered at all.
    #[serde(default = "default_insights_enabled")]
    pub enabled: bool,
    /// Upper bound for a single generator call, in seconds.
    #[serde(default = "default_insight_timeout")]
    pub timeout_secs: u64,
}

fn default_insights_enabled() -> bool {
    true
}

fn default_insight_timeout() -> u64 {
    30
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            enabled: default_insights_enabled(),
            timeout_secs: default_insight_timeout(),
        }
    }
}

/// Expense entry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseConfig {
    /// Currency every expense is entered in.
    #[serde(default)]
    pub currency: Currency,
    /// Known cost-center names.
    #[serde(default = "default_cost_centers")]
    pub cost_centers: Vec<String>,
    /// Known result-center names.
    #[serde(default = "default_result_centers")]
    pub result_centers: Vec<String>,
}

fn default_cost_centers() -> Vec<String> {
    [
        "Administrative Expenses",
        "Marketing and Sales",
        "Research and Development",
        "Operating Costs",
    ]
    .map(String::from)
    .to_vec()
}

fn default_result_centers() -> Vec<String> {
    ["Product A", "Product B", "Services", "Corporate"]
        .map(String::from)
        .to_vec()
}

impl Default for ExpenseConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            cost_centers: default_cost_centers(),
            result_centers: default_result_centers(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("EXPENSA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_any_source() {
        temp_env::with_vars_unset(
            [
                "EXPENSA__LOGGING__FILTER",
                "EXPENSA__INSIGHTS__TIMEOUT_SECS",
                "EXPENSA__EXPENSE__CURRENCY",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.logging.filter, "expensa=debug");
                assert!(!config.logging.json);
                assert!(config.insights.enabled);
                assert_eq!(config.insights.timeout_secs, 30);
                assert_eq!(config.expense.currency, Currency::Brl);
                assert_eq!(config.expense.cost_centers.len(), 4);
                assert_eq!(config.expense.result_centers.len(), 4);
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("EXPENSA__INSIGHTS__TIMEOUT_SECS", Some("5")),
                ("EXPENSA__INSIGHTS__ENABLED", Some("false")),
                ("EXPENSA__EXPENSE__CURRENCY", Some("USD")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.insights.timeout_secs, 5);
                assert!(!config.insights.enabled);
                assert_eq!(config.expense.currency, Currency::Usd);
            },
        );
    }
}
