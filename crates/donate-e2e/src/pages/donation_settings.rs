//! Donation settings dialog: frequency, currency and amount.

use super::PaymentMethod;
use crate::handle::{Element, Frame};
use crate::page_object::Screen;
use crate::result::E2eResult;
use tracing::info;

/// Root of the donation form
pub const SCREEN: &str = r#"[data-qa="fiat-donate-form"]"#;
/// "Monthly" frequency tab
pub const MONTHLY_PLAN: &str = r#"[data-tracking-element-name="monthlyPlan"]"#;
/// Currency `<select>`
pub const CURRENCY_SELECTOR: &str = r#"[data-qa="currency-selector"]"#;
/// Currency symbol next to the amount
pub const CURRENCY_SYMBOL: &str = r#"[data-qa="currency-symbol"]"#;
/// Amount input
pub const AMOUNT: &str = r#"[data-qa="amount"]"#;
/// "Donate" button
pub const DONATE_BUTTON: &str = r#"[data-qa="donate-button"]"#;

/// First screen of the widget
#[derive(Debug, Clone)]
pub struct DonationSettings {
    frame: Frame,
}

impl Screen for DonationSettings {
    const NAME: &'static str = "donation settings";
    const ROOT: &'static str = SCREEN;

    fn frame(&self) -> &Frame {
        &self.frame
    }
}

impl DonationSettings {
    /// Wait for the dialog inside `frame`
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`](crate::E2eError::Timeout) if it never
    /// renders
    pub async fn open(frame: Frame) -> E2eResult<Self> {
        let screen = Self { frame };
        screen.init_dialog().await?;
        Ok(screen)
    }

    /// Wait until the dialog is visible
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`](crate::E2eError::Timeout) if it never
    /// renders
    pub async fn init_dialog(&self) -> E2eResult<()> {
        self.init_screen().await
    }

    /// The "Donate" button
    #[must_use]
    pub fn get_donate_button(&self) -> Element {
        self.frame.locator(DONATE_BUTTON)
    }

    /// The currency symbol
    #[must_use]
    pub fn get_currency_symbol(&self) -> Element {
        self.frame.locator(CURRENCY_SYMBOL)
    }

    /// The amount input
    #[must_use]
    pub fn get_donate_amount(&self) -> Element {
        self.frame.locator(AMOUNT)
    }

    /// Choose the monthly plan
    ///
    /// # Errors
    ///
    /// Returns error if the tab never becomes clickable
    pub async fn click_monthly_plan(&self) -> E2eResult<()> {
        info!("choosing monthly plan");
        self.frame.click(MONTHLY_PLAN).await
    }

    /// Select a currency by code (option value or label)
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::OptionNotFound`](crate::E2eError::OptionNotFound)
    /// for an unknown currency
    pub async fn choose_currency(&self, currency: &str) -> E2eResult<()> {
        info!(currency, "choosing currency");
        self.frame.click(CURRENCY_SELECTOR).await?;
        self.frame.select_option(CURRENCY_SELECTOR, currency).await
    }

    /// Type the donation amount
    ///
    /// # Errors
    ///
    /// Returns error if the input never becomes editable
    pub async fn input_amount(&self, amount: u32) -> E2eResult<()> {
        info!(amount, "entering amount");
        self.frame.fill(AMOUNT, &amount.to_string()).await
    }

    /// Click "Donate" and return the payment method screen once visible
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`](crate::E2eError::Timeout) if the next
    /// screen never renders
    pub async fn click_donate_button(&self) -> E2eResult<PaymentMethod> {
        self.frame.click(DONATE_BUTTON).await?;
        PaymentMethod::open(self.frame.clone()).await
    }
}
