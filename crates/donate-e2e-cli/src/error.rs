//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// The scenario stopped at a failing step
    #[error("Scenario failed after {passed} step(s): {source}")]
    ScenarioFailed {
        /// Steps that passed before the failure
        passed: usize,
        /// The failing action or assertion
        #[source]
        source: donate_e2e::E2eError,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Library error outside the scenario
    #[error("donate-e2e error: {0}")]
    E2e(#[from] donate_e2e::E2eError),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML output error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a scenario failure
    #[must_use]
    pub const fn scenario_failed(passed: usize, source: donate_e2e::E2eError) -> Self {
        Self::ScenarioFailed { passed, source }
    }
}
