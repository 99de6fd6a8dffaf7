//! Auto-waiting handles over a [`PageDriver`].
//!
//! [`Page`] is the top-level tab, [`Frame`] a document reached through a chain
//! of iframes and [`Element`] a lazily resolved element inside a frame. None
//! of them touch the DOM when created; every action first waits for its
//! target and fails with [`E2eError::Timeout`] when the budget runs out.

use crate::config::SuiteConfig;
use crate::driver::PageDriver;
use crate::locator::{FramePath, Locator, Selector};
use crate::result::{E2eError, E2eResult};
use crate::wait::{poll_until, Polled, WaitOptions, DEFAULT_EXPECT_TIMEOUT_MS};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Driver shared by every handle of one page
pub type SharedDriver = Arc<dyn PageDriver>;

/// Wait budgets carried by every handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Actions and readiness waits
    pub action: WaitOptions,
    /// `expect` assertions
    pub expect: WaitOptions,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            action: WaitOptions::default(),
            expect: WaitOptions::default().with_timeout(DEFAULT_EXPECT_TIMEOUT_MS),
        }
    }
}

impl From<&SuiteConfig> for Timeouts {
    fn from(config: &SuiteConfig) -> Self {
        Self {
            action: config.wait_options(),
            expect: config.expect_options(),
        }
    }
}

/// The browser tab
#[derive(Debug, Clone)]
pub struct Page {
    driver: SharedDriver,
    timeouts: Timeouts,
}

impl Page {
    /// Wrap a driver with default timeouts
    #[must_use]
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            driver,
            timeouts: Timeouts::default(),
        }
    }

    /// Set the wait budgets
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// The underlying driver
    #[must_use]
    pub const fn driver(&self) -> &SharedDriver {
        &self.driver
    }

    /// Wait budgets
    #[must_use]
    pub const fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Navigate to `url` and wait for the load event
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Navigation`] if the page does not load
    pub async fn goto(&self, url: &str) -> E2eResult<()> {
        debug!(url, "goto");
        self.driver.navigate(url).await
    }

    /// Document title
    ///
    /// # Errors
    ///
    /// Returns error if the driver cannot read it
    pub async fn title(&self) -> E2eResult<String> {
        self.driver.title().await
    }

    /// Current URL
    ///
    /// # Errors
    ///
    /// Returns error if the driver cannot read it
    pub async fn url(&self) -> E2eResult<String> {
        self.driver.current_url().await
    }

    /// The top-level document
    #[must_use]
    pub fn main_frame(&self) -> Frame {
        Frame {
            driver: Arc::clone(&self.driver),
            path: FramePath::root(),
            timeouts: self.timeouts,
        }
    }

    /// Element in the top-level document
    #[must_use]
    pub fn locator(&self, css: &str) -> Element {
        self.main_frame().locator(css)
    }

    /// Element whose `title` contains `title` (case-insensitive)
    #[must_use]
    pub fn get_by_title(&self, title: &str) -> Element {
        self.main_frame().get_by_title(title)
    }

    /// Wait for a top-level iframe and return its document
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if the iframe never appears
    pub async fn content_frame(&self, iframe_css: &str) -> E2eResult<Frame> {
        self.main_frame().content_frame(iframe_css).await
    }

    /// Close the browser
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails to shut down
    pub async fn close(&self) -> E2eResult<()> {
        self.driver.close().await
    }
}

/// A document inside the page, possibly behind nested iframes
#[derive(Debug, Clone)]
pub struct Frame {
    driver: SharedDriver,
    path: FramePath,
    timeouts: Timeouts,
}

impl Frame {
    /// Iframe chain leading to this document
    #[must_use]
    pub const fn path(&self) -> &FramePath {
        &self.path
    }

    /// Wait budgets
    #[must_use]
    pub const fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    fn element(&self, selector: Selector) -> Element {
        Element {
            driver: Arc::clone(&self.driver),
            locator: Locator::new(self.path.clone(), selector),
            timeouts: self.timeouts,
        }
    }

    /// Element matching a CSS selector in this frame
    #[must_use]
    pub fn locator(&self, css: &str) -> Element {
        self.element(Selector::css(css))
    }

    /// Element whose `title` contains `title` (case-insensitive)
    #[must_use]
    pub fn get_by_title(&self, title: &str) -> Element {
        self.element(Selector::title(title))
    }

    /// Document of a child iframe, resolved lazily
    #[must_use]
    pub fn frame_locator(&self, iframe_css: &str) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            path: self.path.child(iframe_css),
            timeouts: self.timeouts,
        }
    }

    /// Wait until the child iframe exists and return its document
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if the iframe never appears
    pub async fn content_frame(&self, iframe_css: &str) -> E2eResult<Self> {
        self.locator(iframe_css).wait_for_attached().await?;
        debug!(frame = %self.path, iframe = iframe_css, "content frame resolved");
        Ok(self.frame_locator(iframe_css))
    }

    /// Wait until a matching element is visible and return it
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if it never becomes visible
    pub async fn wait_for_selector(&self, css: &str) -> E2eResult<Element> {
        let element = self.locator(css);
        element.wait_for().await?;
        Ok(element)
    }

    /// Click the element matching `css`
    ///
    /// # Errors
    ///
    /// Returns error if the element never becomes clickable
    pub async fn click(&self, css: &str) -> E2eResult<()> {
        self.locator(css).click().await
    }

    /// Fill the element matching `css`
    ///
    /// # Errors
    ///
    /// Returns error if the element never becomes editable
    pub async fn fill(&self, css: &str, value: &str) -> E2eResult<()> {
        self.locator(css).fill(value).await
    }

    /// Select an option in the `<select>` matching `css`
    ///
    /// # Errors
    ///
    /// Returns error if the element or option is missing
    pub async fn select_option(&self, css: &str, value: &str) -> E2eResult<()> {
        self.locator(css).select_option(value).await
    }
}

/// A lazily resolved element
#[derive(Debug, Clone)]
pub struct Element {
    driver: SharedDriver,
    locator: Locator,
    timeouts: Timeouts,
}

impl Element {
    /// Address of the element
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Wait budgets
    #[must_use]
    pub const fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Override the action timeout for this handle
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeouts.action.timeout_ms = timeout_ms;
        self
    }

    pub(crate) const fn driver(&self) -> &SharedDriver {
        &self.driver
    }

    fn timeout(&self, waited_for: &str) -> E2eError {
        E2eError::Timeout {
            ms: self.timeouts.action.timeout_ms,
            waited_for: format!("{} to be {waited_for}", self.locator),
        }
    }

    async fn wait_state<F, Fut>(&self, state: &str, probe: F) -> E2eResult<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = E2eResult<bool>>,
    {
        match poll_until(&self.timeouts.action, probe, |ok| *ok).await? {
            Polled::Ready { elapsed, .. } => {
                debug!(locator = %self.locator, state, ?elapsed, "element ready");
                Ok(())
            }
            Polled::TimedOut { .. } => Err(self.timeout(state)),
        }
    }

    /// Retry `action` while the element is missing
    async fn retry<T, F, Fut>(&self, what: &str, action: F) -> E2eResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = E2eResult<T>>,
    {
        match poll_until(&self.timeouts.action, action, |_| true).await? {
            Polled::Ready { value, .. } => Ok(value),
            Polled::TimedOut { .. } => Err(self.timeout(what)),
        }
    }

    /// Wait until the element is visible
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if it never becomes visible
    pub async fn wait_for(&self) -> E2eResult<()> {
        let (driver, locator) = (&self.driver, &self.locator);
        self.wait_state("visible", move || driver.is_visible(locator))
            .await
    }

    /// Wait until the element is in the DOM
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if it never appears
    pub async fn wait_for_attached(&self) -> E2eResult<()> {
        let (driver, locator) = (&self.driver, &self.locator);
        self.wait_state("attached", move || driver.exists(locator))
            .await
    }

    /// Whether the element is visible right now (no waiting)
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub async fn is_visible(&self) -> E2eResult<bool> {
        self.driver.is_visible(&self.locator).await
    }

    /// Wait for visibility, then click
    ///
    /// # Errors
    ///
    /// Returns error if the element never becomes clickable
    pub async fn click(&self) -> E2eResult<()> {
        self.wait_for().await?;
        let (driver, locator) = (&self.driver, &self.locator);
        self.retry("clickable", move || driver.click(locator)).await
    }

    /// Wait for visibility, then replace the value
    ///
    /// # Errors
    ///
    /// Returns error if the element never becomes editable
    pub async fn fill(&self, value: &str) -> E2eResult<()> {
        self.wait_for().await?;
        let (driver, locator) = (&self.driver, &self.locator);
        self.retry("editable", move || driver.fill(locator, value))
            .await
    }

    /// Wait for visibility, then select an option by value or label
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::OptionNotFound`] if no option matches
    pub async fn select_option(&self, value: &str) -> E2eResult<()> {
        self.wait_for().await?;
        let (driver, locator) = (&self.driver, &self.locator);
        self.retry("selectable", move || driver.select_option(locator, value))
            .await
    }

    /// Checked state
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if the element never appears
    pub async fn is_checked(&self) -> E2eResult<bool> {
        let (driver, locator) = (&self.driver, &self.locator);
        self.retry("attached", move || driver.is_checked(locator))
            .await
    }

    /// Text content
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if the element never appears
    pub async fn text_content(&self) -> E2eResult<Option<String>> {
        let (driver, locator) = (&self.driver, &self.locator);
        self.retry("attached", move || driver.text_content(locator))
            .await
    }

    /// Input value
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if the element never appears
    pub async fn input_value(&self) -> E2eResult<String> {
        let (driver, locator) = (&self.driver, &self.locator);
        self.retry("attached", move || driver.input_value(locator))
            .await
    }

    /// Attribute value
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if the element never appears
    pub async fn get_attribute(&self, name: &str) -> E2eResult<Option<String>> {
        let (driver, locator) = (&self.driver, &self.locator);
        self.retry("attached", move || driver.attribute(locator, name))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockEffect, MockElement};

    fn fast() -> Timeouts {
        let options = WaitOptions::new().with_timeout(80).with_poll_interval(5);
        Timeouts {
            action: options,
            expect: options,
        }
    }

    fn page_with(mock: MockDriver) -> (Page, Arc<MockDriver>) {
        let mock = Arc::new(mock);
        let driver: SharedDriver = mock.clone();
        (Page::new(driver).with_timeouts(fast()), mock)
    }

    mod page_tests {
        use super::*;

        #[tokio::test]
        async fn test_goto_and_title() {
            let mock = MockDriver::new();
            mock.on_navigate(vec![MockEffect::SetTitle("QA Engineer Test".into())]);
            let (page, _) = page_with(mock);

            page.goto("https://example.com/").await.unwrap();

            assert_eq!(page.title().await.unwrap(), "QA Engineer Test");
            assert_eq!(page.url().await.unwrap(), "https://example.com/");
        }

        #[tokio::test]
        async fn test_content_frame_waits_for_iframe() {
            let mock = MockDriver::new();
            mock.insert(&Locator::css("iframe#w"), MockElement::new());
            let (page, _) = page_with(mock);

            let frame = page.content_frame("iframe#w").await.unwrap();

            assert_eq!(frame.path().depth(), 1);
        }

        #[tokio::test]
        async fn test_content_frame_times_out() {
            let (page, _) = page_with(MockDriver::new());

            let err = page.content_frame("iframe#missing").await.unwrap_err();

            assert!(matches!(err, E2eError::Timeout { ms: 80, .. }));
        }
    }

    mod frame_tests {
        use super::*;

        #[test]
        fn test_frame_locator_nests_paths() {
            let (page, _) = page_with(MockDriver::new());
            let inner = page
                .main_frame()
                .frame_locator("iframe#a")
                .frame_locator("iframe#b");

            let element = inner.locator("input");
            assert_eq!(element.locator().key(), "iframe#a >> iframe#b >> input");
        }

        #[tokio::test]
        async fn test_wait_for_selector_requires_visibility() {
            let mock = MockDriver::new();
            mock.insert(&Locator::css("#hidden"), MockElement::new().hidden());
            mock.insert(&Locator::css("#shown"), MockElement::new());
            let (page, _) = page_with(mock);
            let frame = page.main_frame();

            assert!(frame.wait_for_selector("#shown").await.is_ok());
            assert!(matches!(
                frame.wait_for_selector("#hidden").await,
                Err(E2eError::Timeout { .. })
            ));
        }

        #[tokio::test]
        async fn test_fill_and_select_by_css() {
            let mock = MockDriver::new();
            mock.insert(&Locator::css("#amount"), MockElement::new());
            mock.insert(&Locator::css("#currency"), MockElement::new().with_options(&["USD"]));
            let (page, mock) = page_with(mock);
            let frame = page.main_frame();

            frame.fill("#amount", "100").await.unwrap();
            frame.select_option("#currency", "USD").await.unwrap();

            assert!(mock.was_called("fill:#amount=100"));
            assert!(mock.was_called("select:#currency=USD"));
        }
    }

    mod element_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_waits_for_late_element() {
            let mock = MockDriver::new();
            let trigger = Locator::css("#trigger");
            let late = Locator::css("#late");
            mock.insert(&trigger, MockElement::new());
            mock.on_click(
                &trigger,
                vec![MockEffect::Show(late.clone(), MockElement::new())],
            );
            let (page, mock) = page_with(mock);

            let waiting = page.locator("#late");
            let clicker = page.locator("#trigger");
            let (clicked, _) = tokio::join!(waiting.click(), async {
                tokio::time::sleep(std::time::Duration::from_millis(15)).await;
                clicker.click().await
            });

            clicked.unwrap();
            assert_eq!(mock.clicks_on(&late), 1);
        }

        #[tokio::test]
        async fn test_click_missing_element_times_out() {
            let (page, _) = page_with(MockDriver::new());

            let err = page.locator("#nope").click().await.unwrap_err();

            assert!(err.to_string().contains("#nope to be visible"));
        }

        #[tokio::test]
        async fn test_reads() {
            let mock = MockDriver::new();
            mock.insert(
                &Locator::css("#box"),
                MockElement::new()
                    .with_text("hello")
                    .with_value("42")
                    .with_checked(true)
                    .with_attribute("title", "Donate Button"),
            );
            let (page, _) = page_with(mock);
            let element = page.locator("#box");

            assert_eq!(element.text_content().await.unwrap(), Some("hello".into()));
            assert_eq!(element.input_value().await.unwrap(), "42");
            assert!(element.is_checked().await.unwrap());
            assert_eq!(
                element.get_attribute("title").await.unwrap(),
                Some("Donate Button".into())
            );
            assert_eq!(element.get_attribute("alt").await.unwrap(), None);
        }

        #[tokio::test]
        async fn test_with_timeout_overrides_budget() {
            let (page, _) = page_with(MockDriver::new());

            let err = page
                .locator("#nope")
                .with_timeout(10)
                .wait_for()
                .await
                .unwrap_err();

            assert!(matches!(err, E2eError::Timeout { ms: 10, .. }));
        }
    }
}
