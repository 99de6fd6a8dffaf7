//! The declined-card donation scenario.
//!
//! One linear walk through every widget screen with an assertion after each
//! action. The last step submits a known test card and expects the widget to
//! come back to the card form with a decline tooltip.

use crate::config::SuiteConfig;
use crate::expect::{expect, expect_page};
use crate::generators::Generators;
use crate::handle::Page;
use crate::page_object::Screen;
use crate::pages::{LandingPage, PaymentField, PersonalField, TooltipError};
use crate::result::{E2eError, E2eResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

/// Title of the page embedding the widget
pub const PAGE_TITLE: &str = "QA Engineer Test";

/// Tooltip title shown for the test card
pub const DECLINED_TITLE: &str = "Your card was declined";

/// Tooltip message shown for the test card
pub const DECLINED_MESSAGE: &str =
    "Your card was declined. Your request was in live mode, but used a known test card.";

/// Inputs of one scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Text the donate button shows for the chosen frequency
    pub donate_frequency: String,
    /// Currency code
    pub currency: String,
    /// Symbol displayed for the currency
    pub currency_symbol: String,
    /// Donation amount
    pub donate_amount: u32,
    /// Desired state of the "cover transaction costs" checkbox
    pub cover_transaction_cost: bool,
    /// Card number as typed
    pub card_number: String,
    /// Expiration date as typed
    pub expiration_date: String,
    /// CVC
    pub cvc: String,
    /// Donor first name
    pub first_name: String,
    /// Donor last name
    pub last_name: String,
    /// Donor e-mail
    pub email: String,
}

impl TestCase {
    /// Monthly USD donation with the public test card and fresh donor data
    #[must_use]
    pub fn declined_card() -> Self {
        Self::declined_card_with(&mut Generators::new())
    }

    /// Same as [`TestCase::declined_card`] with a caller-supplied generator
    pub fn declined_card_with<R: Rng>(generators: &mut Generators<R>) -> Self {
        Self {
            donate_frequency: "monthly".to_string(),
            currency: "USD".to_string(),
            currency_symbol: "$".to_string(),
            donate_amount: 100,
            cover_transaction_cost: true,
            card_number: "4242 4242 4242 4242".to_string(),
            expiration_date: "04 / 24".to_string(),
            cvc: "000".to_string(),
            first_name: generators.generate_first_name(),
            last_name: generators.generate_last_name(),
            email: generators.generate_email(),
        }
    }

    /// Value typed into a card input
    #[must_use]
    pub fn payment_value(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::CardNumber => &self.card_number,
            PaymentField::ExpirationDate => &self.expiration_date,
            PaymentField::Cvc => &self.cvc,
        }
    }

    /// Value typed into a personal data input
    #[must_use]
    pub fn personal_value(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::FirstName => &self.first_name,
            PersonalField::LastName => &self.last_name,
            PersonalField::Email => &self.email,
        }
    }
}

impl TooltipError {
    /// Tooltip the widget shows for the public test card
    #[must_use]
    pub fn expected_decline() -> Self {
        Self::new(DECLINED_TITLE, DECLINED_MESSAGE)
    }
}

/// A passed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step description
    pub name: String,
    /// Time spent in the step, assertion included
    pub elapsed_ms: u64,
}

/// Passed steps of a run, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Steps that passed
    pub steps: Vec<StepRecord>,
}

impl ScenarioReport {
    /// Empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a passed step started at `started`
    pub fn record(&mut self, name: impl Into<String>, started: Instant) {
        let elapsed = started.elapsed();
        let name = name.into();
        info!(step = self.steps.len() + 1, %name, ?elapsed, "step passed");
        self.steps.push(StepRecord {
            name,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        });
    }

    /// Sum of step durations
    #[must_use]
    pub fn total(&self) -> Duration {
        Duration::from_millis(self.steps.iter().map(|s| s.elapsed_ms).sum())
    }
}

/// Walk the whole checkout with a declined card.
///
/// Passed steps are appended to `report` as they complete, so a failing run
/// still shows how far it got.
///
/// # Errors
///
/// Returns the first failing action or assertion
pub async fn make_donation_wrong_payment_data(
    page: &Page,
    config: &SuiteConfig,
    case: &TestCase,
    expected: &TooltipError,
    report: &mut ScenarioReport,
) -> E2eResult<()> {
    let landing = LandingPage::new(page.clone(), config);

    let started = Instant::now();
    landing.open_page().await?;
    expect_page(page).to_have_title(PAGE_TITLE).await?;
    report.record("open landing page", started);

    let started = Instant::now();
    let donation_settings = landing.click_give_now_button().await?;
    expect(&donation_settings.get_frame()).to_be_visible().await?;
    report.record("open donation dialog", started);

    let started = Instant::now();
    donation_settings.click_monthly_plan().await?;
    expect(&donation_settings.get_donate_button())
        .to_contain_text(case.donate_frequency.as_str())
        .await?;
    report.record("choose monthly plan", started);

    let started = Instant::now();
    donation_settings.choose_currency(&case.currency).await?;
    expect(&donation_settings.get_currency_symbol())
        .to_contain_text(case.currency_symbol.as_str())
        .await?;
    report.record(format!("choose currency {}", case.currency), started);

    let started = Instant::now();
    donation_settings.input_amount(case.donate_amount).await?;
    expect(&donation_settings.get_donate_amount())
        .to_have_value(case.donate_amount.to_string())
        .await?;
    report.record(format!("enter amount {}", case.donate_amount), started);

    let started = Instant::now();
    let payment_method = donation_settings.click_donate_button().await?;
    expect(&payment_method.get_frame()).to_be_visible().await?;
    report.record("open payment method", started);

    let started = Instant::now();
    payment_method
        .click_cover_transaction_cost_checkbox(case.cover_transaction_cost)
        .await?;
    expect(&payment_method.get_checkbox())
        .to_have_attribute("aria-checked", case.cover_transaction_cost.to_string())
        .await?;
    report.record("set cover transaction cost", started);

    let started = Instant::now();
    let payment_information = payment_method.click_credit_card_payment_button().await?;
    expect(&payment_information.get_frame()).to_be_visible().await?;
    report.record("open payment information", started);

    for field in PaymentField::ALL {
        let started = Instant::now();
        let value = case.payment_value(field);
        payment_information.fill_payment_info(field, value).await?;
        expect(&payment_information.get_field(field))
            .to_have_value(value)
            .await?;
        report.record(format!("fill {field}"), started);
    }

    let started = Instant::now();
    let personal_information = payment_information.confirm_payment_info().await?;
    expect(&personal_information.get_frame()).to_be_visible().await?;
    report.record("open personal information", started);

    for field in PersonalField::ALL {
        let started = Instant::now();
        let value = case.personal_value(field);
        personal_information.fill_personal_data(field, value).await?;
        expect(&personal_information.get_field(field))
            .to_have_value(value)
            .await?;
        report.record(format!("fill {field}"), started);
    }

    let started = Instant::now();
    personal_information.accept_personal_data().await?;
    let error = payment_information.get_error().await?;
    expect(&payment_information.get_frame()).to_be_visible().await?;
    if &error != expected {
        return Err(E2eError::AssertionFailed {
            message: format!("Expected tooltip {expected:?} but got {error:?}"),
        });
    }
    report.record("submit and see decline tooltip", started);

    Ok(())
}
