//! Card details screen. The three card inputs live in their own iframes.

use super::PersonalInformation;
use crate::handle::{Element, Frame};
use crate::page_object::Screen;
use crate::result::{E2eError, E2eResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Root of the payment information screen
pub const SCREEN: &str = r#"[aria-label="Payment information"]"#;
/// Iframe hosting the card number input
pub const CARD_NUMBER_IFRAME: &str = r#"iframe[title="Secure card number input frame"]"#;
/// Card number input
pub const CARD_NUMBER: &str = r#"[data-elements-stable-field-name="cardNumber"]"#;
/// Iframe hosting the expiration date input
pub const EXPIRATION_DATE_IFRAME: &str = r#"iframe[title="Secure expiration date input frame"]"#;
/// Expiration date input
pub const EXPIRATION_DATE: &str = r#"[data-elements-stable-field-name="cardExpiry"]"#;
/// Iframe hosting the CVC input
pub const CVC_IFRAME: &str = r#"iframe[title="Secure CVC input frame"]"#;
/// CVC input
pub const CVC: &str = r#"[data-elements-stable-field-name="cardCvc"]"#;
/// "Continue" button
pub const CONTINUE_BUTTON: &str = r#"[data-qa="card-continue"]"#;
/// Title of the error tooltip
pub const ERROR_TITLE: &str = r#"[data-qa="card-continue-error-title"]"#;
/// Message of the error tooltip
pub const ERROR_MESSAGE: &str = r#"[data-qa="card-continue-error-message"]"#;

/// A card input on the payment information screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentField {
    /// Card number
    CardNumber,
    /// Expiration date
    ExpirationDate,
    /// Card verification code
    Cvc,
}

impl PaymentField {
    /// Every card input, in form order
    pub const ALL: [Self; 3] = [Self::CardNumber, Self::ExpirationDate, Self::Cvc];

    /// Human-readable tag
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::CardNumber => "card number",
            Self::ExpirationDate => "expiration date",
            Self::Cvc => "CVC",
        }
    }

    /// Selector of the iframe hosting the input
    #[must_use]
    pub const fn iframe(self) -> &'static str {
        match self {
            Self::CardNumber => CARD_NUMBER_IFRAME,
            Self::ExpirationDate => EXPIRATION_DATE_IFRAME,
            Self::Cvc => CVC_IFRAME,
        }
    }

    /// Selector of the input inside its iframe
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::CardNumber => CARD_NUMBER,
            Self::ExpirationDate => EXPIRATION_DATE,
            Self::Cvc => CVC,
        }
    }
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PaymentField {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.tag() == s)
            .ok_or_else(|| E2eError::UnknownField {
                kind: "payment",
                tag: s.to_string(),
            })
    }
}

/// Title and message of the error tooltip; `None` when a node has no text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipError {
    /// Tooltip title
    pub title: Option<String>,
    /// Tooltip message
    pub message: Option<String>,
}

impl TooltipError {
    /// Tooltip with both parts present
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
        }
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

/// Third screen of the widget
#[derive(Debug, Clone)]
pub struct PaymentInformation {
    frame: Frame,
}

impl Screen for PaymentInformation {
    const NAME: &'static str = "payment information";
    const ROOT: &'static str = SCREEN;

    fn frame(&self) -> &Frame {
        &self.frame
    }
}

impl PaymentInformation {
    /// Wait for the screen inside `frame`
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if it never renders
    pub async fn open(frame: Frame) -> E2eResult<Self> {
        let screen = Self { frame };
        screen.init_screen().await?;
        Ok(screen)
    }

    /// Input for `field`, resolved through its iframe
    #[must_use]
    pub fn get_field(&self, field: PaymentField) -> Element {
        self.frame
            .frame_locator(field.iframe())
            .locator(field.selector())
    }

    /// The card number input
    #[must_use]
    pub fn get_card_number(&self) -> Element {
        self.get_field(PaymentField::CardNumber)
    }

    /// The expiration date input
    #[must_use]
    pub fn get_expiration_date(&self) -> Element {
        self.get_field(PaymentField::ExpirationDate)
    }

    /// The CVC input
    #[must_use]
    pub fn get_cvc(&self) -> Element {
        self.get_field(PaymentField::Cvc)
    }

    /// Wait for the error tooltip and read it
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if no tooltip appears within the action
    /// timeout
    pub async fn get_error(&self) -> E2eResult<TooltipError> {
        let title = self.frame.wait_for_selector(ERROR_TITLE).await?;
        let error = TooltipError {
            title: non_empty(title.text_content().await?),
            message: non_empty(self.frame.locator(ERROR_MESSAGE).text_content().await?),
        };
        info!(title = ?error.title, message = ?error.message, "error tooltip shown");
        Ok(error)
    }

    /// Type `value` into a card input
    ///
    /// # Errors
    ///
    /// Returns error if the input never becomes editable
    pub async fn fill_payment_info(&self, field: PaymentField, value: &str) -> E2eResult<()> {
        info!(%field, "filling payment info");
        self.get_field(field).fill(value).await
    }

    /// Click "Continue" and return the personal information screen once
    /// visible
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if the next screen never renders
    pub async fn confirm_payment_info(&self) -> E2eResult<PersonalInformation> {
        self.frame.click(CONTINUE_BUTTON).await?;
        PersonalInformation::open(self.frame.clone()).await
    }
}
