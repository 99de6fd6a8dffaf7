//! Suite configuration.
//!
//! Precedence, lowest first: built-in defaults, YAML file, environment
//! variables, command line flags (applied by the CLI).

use crate::result::{E2eError, E2eResult};
use crate::wait::{
    WaitOptions, DEFAULT_EXPECT_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use url::Url;

/// Host serving the widget test page
pub const DEFAULT_BASE_URL: &str = "https://data.fundraiseup.com";

/// Path of the page embedding the donation widget
pub const START_PATH: &str = "/qa-test-7R58U3/";

/// Environment variable overriding [`SuiteConfig::base_url`]
pub const ENV_BASE_URL: &str = "DONATE_E2E_BASE_URL";
/// Environment variable overriding [`SuiteConfig::headless`]
pub const ENV_HEADLESS: &str = "DONATE_E2E_HEADLESS";
/// Environment variable overriding [`SuiteConfig::chromium_path`]
pub const ENV_CHROMIUM_PATH: &str = "CHROMIUM_PATH";

/// Configuration of one scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Scheme and host of the test page
    pub base_url: String,
    /// Run chromium without a window
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Chromium sandbox
    pub sandbox: bool,
    /// Auto-wait budget for actions and screen readiness
    pub action_timeout_ms: u64,
    /// Retry budget for `expect` assertions
    pub expect_timeout_ms: u64,
    /// Budget for page loads
    pub navigation_timeout_ms: u64,
    /// Delay between polls
    pub poll_interval_ms: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
            action_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            expect_timeout_ms: DEFAULT_EXPECT_TIMEOUT_MS,
            navigation_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl SuiteConfig {
    /// Parse configuration from YAML; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns error if the YAML is malformed or the result is invalid
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_yaml_file(path: impl AsRef<Path>) -> E2eResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Serialize to YAML
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_yaml(&self) -> E2eResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Apply overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an unusable value
    pub fn apply_env(self) -> E2eResult<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an unusable value
    pub fn apply_env_from<F>(mut self, lookup: F) -> E2eResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_HEADLESS) {
            self.headless = parse_bool(ENV_HEADLESS, &raw)?;
        }
        if let Some(path) = lookup(ENV_CHROMIUM_PATH).filter(|p| !p.is_empty()) {
            self.chromium_path = Some(path);
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the base URL and timeouts
    ///
    /// # Errors
    ///
    /// Returns error describing the first invalid setting
    pub fn validate(&self) -> E2eResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| E2eError::config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(E2eError::config(format!(
                "base_url must be http(s), got {:?}",
                self.base_url
            )));
        }

        let timeouts = [
            ("action_timeout_ms", self.action_timeout_ms),
            ("expect_timeout_ms", self.expect_timeout_ms),
            ("navigation_timeout_ms", self.navigation_timeout_ms),
            ("poll_interval_ms", self.poll_interval_ms),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, ms)| *ms == 0) {
            return Err(E2eError::config(format!("{name} must be greater than zero")));
        }
        Ok(())
    }

    /// URL of the page embedding the widget
    #[must_use]
    pub fn start_url(&self) -> String {
        format!("{}{START_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// Wait options for actions and screen readiness
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.action_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    /// Wait options for `expect` assertions
    #[must_use]
    pub const fn expect_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.expect_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}

fn parse_bool(name: &str, raw: &str) -> E2eResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(E2eError::config(format!("{name}: expected a boolean, got {raw:?}"))),
    }
}
