//! Scenario runner implementation

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::StepReporter;
use donate_e2e::fixture::donation_widget;
use donate_e2e::{
    make_donation_wrong_payment_data, Page, ScenarioReport, SharedDriver, SuiteConfig, TestCase,
    Timeouts, TooltipError,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Where the scenario runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Real chromium over CDP
    Chromium,
    /// Scripted in-memory widget
    Mock,
}

/// Runs the declined-card scenario and prints its steps
#[derive(Debug)]
pub struct ScenarioRunner {
    suite: SuiteConfig,
    reporter: StepReporter,
}

impl ScenarioRunner {
    /// Create a runner for one suite configuration
    #[must_use]
    pub fn new(cli: &CliConfig, suite: SuiteConfig) -> Self {
        Self {
            suite,
            reporter: StepReporter::new(cli.color.should_color(), cli.verbosity.is_quiet()),
        }
    }

    /// Suite configuration in use
    #[must_use]
    pub const fn suite(&self) -> &SuiteConfig {
        &self.suite
    }

    async fn driver(&self, backend: Backend) -> CliResult<SharedDriver> {
        match backend {
            Backend::Mock => Ok(Arc::new(donation_widget())),
            #[cfg(feature = "browser")]
            Backend::Chromium => {
                let browser = donate_e2e::BrowserConfig::from(&self.suite);
                let driver = donate_e2e::ChromiumDriver::launch(browser).await?;
                Ok(Arc::new(driver))
            }
            #[cfg(not(feature = "browser"))]
            Backend::Chromium => Err(CliError::config(
                "built without the `browser` feature; rebuild with it or pass --mock",
            )),
        }
    }

    /// Run the scenario with a freshly generated test case
    pub async fn run(&self, backend: Backend) -> CliResult<ScenarioReport> {
        self.run_case(backend, &TestCase::declined_card()).await
    }

    /// Run the scenario with the given test case
    pub async fn run_case(&self, backend: Backend, case: &TestCase) -> CliResult<ScenarioReport> {
        self.reporter.info(&format!(
            "Running declined-card scenario against {}",
            match backend {
                Backend::Chromium => self.suite.start_url(),
                Backend::Mock => "the in-memory widget".to_string(),
            }
        ));
        info!(?backend, base_url = %self.suite.base_url, "starting scenario");

        let driver = self.driver(backend).await?;
        let page = Page::new(driver).with_timeouts(Timeouts::from(&self.suite));
        let mut report = ScenarioReport::new();
        let started = Instant::now();

        let outcome = make_donation_wrong_payment_data(
            &page,
            &self.suite,
            case,
            &TooltipError::expected_decline(),
            &mut report,
        )
        .await;

        if let Err(e) = page.close().await {
            warn!(error = %e, "failed to close page");
        }

        self.reporter.steps(&report);
        match outcome {
            Ok(()) => {
                self.reporter
                    .summary(report.steps.len(), false, started.elapsed());
                Ok(report)
            }
            Err(source) => {
                self.reporter.failure(&source.to_string());
                self.reporter
                    .summary(report.steps.len(), true, started.elapsed());
                Err(CliError::scenario_failed(report.steps.len(), source))
            }
        }
    }
}
