//! Result and error types for donate-e2e.

use thiserror::Error;

/// Result type for donate-e2e operations
pub type E2eResult<T> = Result<T, E2eError>;

/// Errors that can occur while driving the donation widget
#[derive(Debug, Error)]
pub enum E2eError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// What was being waited for
        waited_for: String,
    },

    /// No element matched the locator (yet)
    #[error("No element matches {locator}")]
    ElementNotFound {
        /// Rendered locator
        locator: String,
    },

    /// Script evaluation error
    #[error("Script evaluation failed: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    Input {
        /// Error message
        message: String,
    },

    /// A `<select>` has no option with that value or label
    #[error("No option {value:?} in {locator}")]
    OptionNotFound {
        /// Rendered locator
        locator: String,
        /// Requested value
        value: String,
    },

    /// Assertion failed (from `expect()`)
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Unrecognized field tag
    #[error("Unknown {kind} field {tag:?}")]
    UnknownField {
        /// Field family ("payment" or "personal")
        kind: &'static str,
        /// The rejected tag
        tag: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl E2eError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether polling may retry after this error.
    ///
    /// Only a missing element is transient; everything else aborts the run.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }
}
