//! Page Object Model support.
//!
//! Every widget screen is a [`Screen`]: a root selector scoped to a [`Frame`]
//! plus the interactions that screen offers. Screens are only handed out by
//! an async `open` that has already waited for the root to be visible, so an
//! operation can never run against a screen that has not rendered yet.
//!
//! ```text
//! LandingPage ──give now──▶ DonationSettings ──donate──▶ PaymentMethod
//!      ──credit card──▶ PaymentInformation ──continue──▶ PersonalInformation
//! ```

use crate::handle::{Element, Frame};
use crate::result::E2eResult;
use async_trait::async_trait;
use tracing::info;

/// A screen of the donation widget
#[async_trait]
pub trait Screen: Send + Sync {
    /// Screen name for logging
    const NAME: &'static str;

    /// Selector of the screen's root container
    const ROOT: &'static str;

    /// The frame every locator of this screen is scoped to
    fn frame(&self) -> &Frame;

    /// Root container, for visibility assertions
    fn get_frame(&self) -> Element {
        self.frame().locator(Self::ROOT)
    }

    /// Wait until the root container is visible
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`](crate::E2eError::Timeout) if the screen
    /// never renders
    async fn init_screen(&self) -> E2eResult<()> {
        wait_until_ready::<Self>(self.frame()).await
    }
}

/// Wait for the root of screen `S` inside `frame`
///
/// # Errors
///
/// Returns [`E2eError::Timeout`](crate::E2eError::Timeout) if the screen never
/// renders
pub async fn wait_until_ready<S: Screen + ?Sized>(frame: &Frame) -> E2eResult<()> {
    info!(screen = S::NAME, frame = %frame.path(), "waiting for screen");
    let _ = frame.wait_for_selector(S::ROOT).await?;
    info!(screen = S::NAME, "screen ready");
    Ok(())
}
