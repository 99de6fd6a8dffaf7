//! Playwright-style assertions with auto-retry.
//!
//! ```ignore
//! expect(&amount).to_have_value("100").await?;
//! expect_page(&page).to_have_title("QA Engineer Test").await?;
//! ```
//!
//! Each assertion re-reads the element until it matches or the expect
//! timeout expires, then fails with [`E2eError::AssertionFailed`] quoting the
//! last observed value.

use crate::handle::{Element, Page};
use crate::result::{E2eError, E2eResult};
use crate::wait::{poll_until, Polled, WaitOptions};
use std::fmt;
use std::future::Future;
use tracing::debug;

const VISIBLE: &str = "visible";
const HIDDEN: &str = "hidden";
const CHECKED: &str = "checked";
const UNCHECKED: &str = "unchecked";

/// Assertion types for `expect()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectAssertion {
    /// Element has exact text (surrounding whitespace ignored)
    HasText {
        /// Expected text
        expected: String,
    },
    /// Element contains text
    ContainsText {
        /// Text to find
        expected: String,
    },
    /// Input has exact value
    HasValue {
        /// Expected value
        expected: String,
    },
    /// Attribute has exact value
    HasAttribute {
        /// Attribute name
        name: String,
        /// Expected value
        expected: String,
    },
    /// Element is visible
    IsVisible,
    /// Element is hidden or missing
    IsHidden,
    /// Element is checked
    IsChecked,
    /// Page has exact title
    HasTitle {
        /// Expected title
        expected: String,
    },
}

impl ExpectAssertion {
    /// Whether an observed value satisfies the assertion
    #[must_use]
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Self::HasText { expected } => actual.trim() == expected,
            Self::ContainsText { expected } => actual.contains(expected.as_str()),
            Self::HasValue { expected }
            | Self::HasAttribute { expected, .. }
            | Self::HasTitle { expected } => actual == expected,
            Self::IsVisible => actual == VISIBLE,
            Self::IsHidden => actual == HIDDEN,
            Self::IsChecked => actual == CHECKED,
        }
    }

    /// Validate an observed value
    ///
    /// # Errors
    ///
    /// Returns error if assertion fails
    pub fn validate(&self, subject: &str, actual: Option<&str>) -> E2eResult<()> {
        match actual {
            Some(actual) if self.matches(actual) => Ok(()),
            Some(actual) => Err(E2eError::AssertionFailed {
                message: format!("Expected {subject} {self} but got '{actual}'"),
            }),
            None => Err(E2eError::AssertionFailed {
                message: format!("Expected {subject} {self} but it was never found"),
            }),
        }
    }
}

impl fmt::Display for ExpectAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasText { expected } => write!(f, "to have text '{expected}'"),
            Self::ContainsText { expected } => write!(f, "to contain text '{expected}'"),
            Self::HasValue { expected } => write!(f, "to have value '{expected}'"),
            Self::HasAttribute { name, expected } => {
                write!(f, "to have attribute {name}='{expected}'")
            }
            Self::IsVisible => f.write_str("to be visible"),
            Self::IsHidden => f.write_str("to be hidden"),
            Self::IsChecked => f.write_str("to be checked"),
            Self::HasTitle { expected } => write!(f, "to have title '{expected}'"),
        }
    }
}

/// Poll `observe` until `assertion` matches or `options` expires
async fn settle<F, Fut>(
    options: &WaitOptions,
    subject: &str,
    assertion: &ExpectAssertion,
    observe: F,
) -> E2eResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<String>>,
{
    match poll_until(options, observe, |actual| assertion.matches(actual)).await? {
        Polled::Ready { elapsed, .. } => {
            debug!(subject, %assertion, ?elapsed, "expect passed");
            Ok(())
        }
        Polled::TimedOut { last, .. } => assertion.validate(subject, last.as_deref()),
    }
}

/// Expectation on an [`Element`]
#[derive(Debug, Clone)]
pub struct Expect<'a> {
    element: &'a Element,
    options: WaitOptions,
}

impl<'a> Expect<'a> {
    /// Create a new expectation using the element's expect timeout
    #[must_use]
    pub const fn new(element: &'a Element) -> Self {
        Self {
            element,
            options: element.timeouts().expect,
        }
    }

    /// Override the retry budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.options.timeout_ms = timeout_ms;
        self
    }

    async fn observe(&self, assertion: &ExpectAssertion) -> E2eResult<String> {
        let driver = self.element.driver();
        let locator = self.element.locator();
        match assertion {
            ExpectAssertion::HasText { .. } | ExpectAssertion::ContainsText { .. } => {
                Ok(driver.text_content(locator).await?.unwrap_or_default())
            }
            ExpectAssertion::HasValue { .. } => driver.input_value(locator).await,
            ExpectAssertion::HasAttribute { name, .. } => {
                Ok(driver.attribute(locator, name).await?.unwrap_or_default())
            }
            ExpectAssertion::IsVisible | ExpectAssertion::IsHidden => {
                let visible = driver.is_visible(locator).await?;
                Ok(if visible { VISIBLE } else { HIDDEN }.to_string())
            }
            ExpectAssertion::IsChecked => {
                let checked = driver.is_checked(locator).await?;
                Ok(if checked { CHECKED } else { UNCHECKED }.to_string())
            }
            ExpectAssertion::HasTitle { .. } => driver.title().await,
        }
    }

    async fn check(&self, assertion: ExpectAssertion) -> E2eResult<()> {
        let subject = self.element.locator().to_string();
        settle(&self.options, &subject, &assertion, || self.observe(&assertion)).await
    }

    /// Assert the element has specific text
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::AssertionFailed`] if the text never matches
    pub async fn to_have_text(&self, expected: impl Into<String>) -> E2eResult<()> {
        self.check(ExpectAssertion::HasText {
            expected: expected.into(),
        })
        .await
    }

    /// Assert the element contains text
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::AssertionFailed`] if the text never appears
    pub async fn to_contain_text(&self, text: impl Into<String>) -> E2eResult<()> {
        self.check(ExpectAssertion::ContainsText {
            expected: text.into(),
        })
        .await
    }

    /// Assert the input has a value
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::AssertionFailed`] if the value never matches
    pub async fn to_have_value(&self, expected: impl Into<String>) -> E2eResult<()> {
        self.check(ExpectAssertion::HasValue {
            expected: expected.into(),
        })
        .await
    }

    /// Assert an attribute value
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::AssertionFailed`] if the attribute never matches
    pub async fn to_have_attribute(
        &self,
        name: impl Into<String>,
        expected: impl Into<String>,
    ) -> E2eResult<()> {
        self.check(ExpectAssertion::HasAttribute {
            name: name.into(),
            expected: expected.into(),
        })
        .await
    }

    /// Assert the element is visible
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::AssertionFailed`] if it never becomes visible
    pub async fn to_be_visible(&self) -> E2eResult<()> {
        self.check(ExpectAssertion::IsVisible).await
    }

    /// Assert the element is hidden
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::AssertionFailed`] if it stays visible
    pub async fn to_be_hidden(&self) -> E2eResult<()> {
        self.check(ExpectAssertion::IsHidden).await
    }

    /// Assert the element is checked
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::AssertionFailed`] if it never becomes checked
    pub async fn to_be_checked(&self) -> E2eResult<()> {
        self.check(ExpectAssertion::IsChecked).await
    }
}

/// Expectation on a [`Page`]
#[derive(Debug, Clone)]
pub struct PageExpect<'a> {
    page: &'a Page,
    options: WaitOptions,
}

impl<'a> PageExpect<'a> {
    /// Create a new expectation using the page's expect timeout
    #[must_use]
    pub const fn new(page: &'a Page) -> Self {
        Self {
            page,
            options: page.timeouts().expect,
        }
    }

    /// Assert the document title
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::AssertionFailed`] if the title never matches
    pub async fn to_have_title(&self, expected: impl Into<String>) -> E2eResult<()> {
        let assertion = ExpectAssertion::HasTitle {
            expected: expected.into(),
        };
        settle(&self.options, "page", &assertion, || self.page.title()).await
    }
}

/// Create an expectation for an element (Playwright-style)
#[must_use]
pub const fn expect(element: &Element) -> Expect<'_> {
    Expect::new(element)
}

/// Create an expectation for a page
#[must_use]
pub const fn expect_page(page: &Page) -> PageExpect<'_> {
    PageExpect::new(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockEffect, MockElement};
    use crate::handle::{SharedDriver, Timeouts};
    use crate::locator::Locator;
    use std::sync::Arc;

    fn page_with(mock: MockDriver) -> Page {
        let options = WaitOptions::new().with_timeout(60).with_poll_interval(5);
        let driver: SharedDriver = Arc::new(mock);
        Page::new(driver).with_timeouts(Timeouts {
            action: options,
            expect: options,
        })
    }

    mod assertion_tests {
        use super::*;

        #[test]
        fn test_has_text_trims() {
            let assertion = ExpectAssertion::HasText {
                expected: "Donate".into(),
            };
            assert!(assertion.matches("  Donate\n"));
            assert!(!assertion.matches("Donate monthly"));
        }

        #[test]
        fn test_validate_failure_message() {
            let assertion = ExpectAssertion::HasValue {
                expected: "100".into(),
            };
            let err = assertion.validate("#amount", Some("10")).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Assertion failed: Expected #amount to have value '100' but got '10'"
            );
        }

        #[test]
        fn test_validate_never_found() {
            let err = ExpectAssertion::IsVisible
                .validate("#x", None)
                .unwrap_err();
            assert!(err.to_string().contains("never found"));
        }
    }

    mod element_expect_tests {
        use super::*;

        #[tokio::test]
        async fn test_to_contain_text_passes() {
            let mock = MockDriver::new();
            mock.insert(&Locator::css("#btn"), MockElement::new().with_text("Donate monthly"));
            let page = page_with(mock);

            expect(&page.locator("#btn"))
                .to_contain_text("monthly")
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_to_have_value_reports_last_value() {
            let mock = MockDriver::new();
            mock.insert(&Locator::css("#amount"), MockElement::new().with_value("10"));
            let page = page_with(mock);

            let err = expect(&page.locator("#amount"))
                .to_have_value("100")
                .await
                .unwrap_err();

            assert!(matches!(err, E2eError::AssertionFailed { .. }));
            assert!(err.to_string().contains("but got '10'"));
        }

        #[tokio::test]
        async fn test_to_be_visible_waits_for_change() {
            let mock = MockDriver::new();
            let trigger = Locator::css("#go");
            let panel = Locator::css("#panel");
            mock.insert(&trigger, MockElement::new());
            mock.on_click(&trigger, vec![MockEffect::Show(panel, MockElement::new())]);
            let page = page_with(mock);

            let panel = page.locator("#panel");
            let panel_expect = expect(&panel);
            let (visible, clicked) = tokio::join!(panel_expect.to_be_visible(), async {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                page.locator("#go").click().await
            });

            clicked.unwrap();
            visible.unwrap();
        }

        #[tokio::test]
        async fn test_to_be_hidden_for_missing_element() {
            let page = page_with(MockDriver::new());
            expect(&page.locator("#gone")).to_be_hidden().await.unwrap();
        }

        #[tokio::test]
        async fn test_to_have_attribute_and_checked() {
            let mock = MockDriver::new();
            mock.insert(&Locator::css("#cover"), MockElement::new().with_checked(true));
            let page = page_with(mock);
            let checkbox = page.locator("#cover");

            expect(&checkbox)
                .to_have_attribute("aria-checked", "true")
                .await
                .unwrap();
            expect(&checkbox).to_be_checked().await.unwrap();
        }

        #[tokio::test]
        async fn test_with_timeout() {
            let page = page_with(MockDriver::new());
            let element = page.locator("#never");

            let err = expect(&element)
                .with_timeout(5)
                .to_be_visible()
                .await
                .unwrap_err();

            assert!(err
                .to_string()
                .contains("Expected #never to be visible but got 'hidden'"));
        }

        #[tokio::test]
        async fn test_text_of_missing_element_never_found() {
            let page = page_with(MockDriver::new());
            let err = expect(&page.locator("#never"))
                .to_have_text("x")
                .await
                .unwrap_err();
            assert!(err.to_string().contains("never found"));
        }
    }

    mod page_expect_tests {
        use super::*;

        #[tokio::test]
        async fn test_to_have_title() {
            let mock = MockDriver::new();
            mock.on_navigate(vec![MockEffect::SetTitle("QA Engineer Test".into())]);
            let page = page_with(mock);
            page.goto("https://example.com/").await.unwrap();

            expect_page(&page)
                .to_have_title("QA Engineer Test")
                .await
                .unwrap();
            assert!(expect_page(&page).to_have_title("Other").await.is_err());
        }
    }
}
