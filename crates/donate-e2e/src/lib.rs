//! donate-e2e: Page objects and end-to-end scenario for a donation widget
//!
//! The widget is a multi-step checkout rendered inside nested iframes. Each
//! step is a typed page object; the terminal action of one step waits for
//! the next step to render and returns it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    donate-e2e Architecture                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Scenario   │    │ Page       │    │ Page /     │            │
//! │   │ (TestCase) │───►│ Objects    │───►│ Frame /    │            │
//! │   │            │    │ (Screens)  │    │ Element    │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │ PageDriver        │
//! │                          ┌──────────────────┴──────┐            │
//! │                          ▼                         ▼            │
//! │                   ChromiumDriver (CDP)        MockDriver        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use donate_e2e::{ChromiumDriver, BrowserConfig, Page, SuiteConfig, Timeouts};
//!
//! let config = SuiteConfig::default();
//! let driver = ChromiumDriver::launch(BrowserConfig::from(&config)).await?;
//! let page = Page::new(Arc::new(driver)).with_timeouts(Timeouts::from(&config));
//! let mut report = ScenarioReport::new();
//! make_donation_wrong_payment_data(
//!     &page,
//!     &config,
//!     &TestCase::declined_card(),
//!     &TooltipError::expected_decline(),
//!     &mut report,
//! )
//! .await?;
//! ```

#![warn(missing_docs)]

mod browser;
mod config;
mod driver;
mod expect;
pub mod fixture;
mod generators;
mod handle;
mod locator;
mod page_object;
pub mod pages;
mod result;
mod scenario;
mod wait;

#[cfg(feature = "browser")]
pub use browser::ChromiumDriver;
pub use browser::{BrowserConfig, CROSS_ORIGIN_ARGS};
pub use config::{
    SuiteConfig, DEFAULT_BASE_URL, ENV_BASE_URL, ENV_CHROMIUM_PATH, ENV_HEADLESS, START_PATH,
};
pub use driver::{MockDriver, MockEffect, MockElement, PageDriver};
pub use expect::{expect, expect_page, Expect, ExpectAssertion, PageExpect};
pub use generators::{Generators, ALPHABET, EMAIL_DOMAIN};
pub use handle::{Element, Frame, Page, SharedDriver, Timeouts};
pub use locator::{FramePath, Locator, Selector, FRAME_SEPARATOR};
pub use page_object::{wait_until_ready, Screen};
pub use pages::{
    DonationSettings, LandingPage, PaymentField, PaymentInformation, PaymentMethod,
    PersonalField, PersonalInformation, TooltipError,
};
pub use result::{E2eError, E2eResult};
pub use scenario::{
    make_donation_wrong_payment_data, ScenarioReport, StepRecord, TestCase, DECLINED_MESSAGE,
    DECLINED_TITLE, PAGE_TITLE,
};
pub use wait::{
    poll_until, Polled, WaitOptions, DEFAULT_EXPECT_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    #[cfg(feature = "browser")]
    pub use super::ChromiumDriver;
    pub use super::{
        expect, expect_page, make_donation_wrong_payment_data, BrowserConfig, E2eError,
        E2eResult, Element, Frame, Generators, LandingPage, MockDriver, Page, PageDriver,
        PaymentField, PersonalField, ScenarioReport, Screen, SuiteConfig, TestCase, Timeouts,
        TooltipError,
    };
}
