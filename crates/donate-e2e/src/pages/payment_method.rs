//! Payment method screen.

use super::PaymentInformation;
use crate::handle::{Element, Frame};
use crate::page_object::Screen;
use crate::result::E2eResult;
use tracing::{debug, info};

/// Root of the payment method screen
pub const SCREEN: &str = r#"[data-qa="active-screen-payment-method"]"#;
/// "Cover transaction costs" checkbox
pub const COVER_FEE_CHECKBOX: &str = r#"[data-qa="cover-fee-checkbox"]"#;
/// "Credit card" button
pub const CREDIT_CARD_BUTTON: &str = r#"[data-qa="cc-button"]"#;

/// Second screen of the widget
#[derive(Debug, Clone)]
pub struct PaymentMethod {
    frame: Frame,
}

impl Screen for PaymentMethod {
    const NAME: &'static str = "payment method";
    const ROOT: &'static str = SCREEN;

    fn frame(&self) -> &Frame {
        &self.frame
    }
}

impl PaymentMethod {
    /// Wait for the screen inside `frame`
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`](crate::E2eError::Timeout) if it never
    /// renders
    pub async fn open(frame: Frame) -> E2eResult<Self> {
        let screen = Self { frame };
        screen.init_screen().await?;
        Ok(screen)
    }

    /// The "cover transaction costs" checkbox
    #[must_use]
    pub fn get_checkbox(&self) -> Element {
        self.frame.locator(COVER_FEE_CHECKBOX)
    }

    /// Bring the checkbox to `state`, clicking only when it differs
    ///
    /// # Errors
    ///
    /// Returns error if the checkbox never appears
    pub async fn click_cover_transaction_cost_checkbox(&self, state: bool) -> E2eResult<()> {
        let checkbox = self.get_checkbox();
        let current = checkbox.is_checked().await?;
        if current == state {
            debug!(state, "cover fee checkbox already in state");
            return Ok(());
        }
        info!(state, "toggling cover fee checkbox");
        checkbox.click().await
    }

    /// Click "Credit card" and return the card form once visible
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`](crate::E2eError::Timeout) if the next
    /// screen never renders
    pub async fn click_credit_card_payment_button(&self) -> E2eResult<PaymentInformation> {
        self.frame.click(CREDIT_CARD_BUTTON).await?;
        PaymentInformation::open(self.frame.clone()).await
    }
}
