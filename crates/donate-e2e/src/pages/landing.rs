//! Entry page embedding the donation widget.

use super::DonationSettings;
use crate::config::SuiteConfig;
use crate::handle::{Element, Page};
use crate::page_object::Screen;
use crate::result::E2eResult;
use tracing::info;

/// Iframe hosting the donation widget
pub const DONATION_WIDGET_IFRAME: &str = r#"iframe[title="Donation Widget"]"#;

/// Accessible title of the "Give now" call to action
pub const GIVE_NOW_TITLE: &str = "Donate Button";

/// The page that opens the donation widget
#[derive(Debug, Clone)]
pub struct LandingPage {
    page: Page,
    url: String,
}

impl LandingPage {
    /// Entry page at the configured start URL
    #[must_use]
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            url: config.start_url(),
        }
    }

    /// The browser tab
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Start URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The "Give now" button
    #[must_use]
    pub fn get_give_now_button(&self) -> Element {
        self.page.get_by_title(GIVE_NOW_TITLE)
    }

    /// Load the start page
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Navigation`](crate::E2eError::Navigation) if the
    /// page does not load
    pub async fn open_page(&self) -> E2eResult<()> {
        info!(url = %self.url, "opening landing page");
        self.page.goto(&self.url).await
    }

    /// Click "Give now" and return the donation dialog once it is visible
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`](crate::E2eError::Timeout) if the button,
    /// the widget iframe or the dialog never appear
    pub async fn click_give_now_button(&self) -> E2eResult<DonationSettings> {
        self.get_give_now_button().click().await?;
        let frame = self.page.content_frame(DONATION_WIDGET_IFRAME).await?;
        info!(screen = DonationSettings::NAME, "give now clicked");
        DonationSettings::open(frame).await
    }
}
