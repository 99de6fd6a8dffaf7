//! PageDriver - abstract browser automation seam.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Page objects (pages::*)                                     │
//! │        │  Page / Frame / Element  (auto-wait, expect)        │
//! │        ▼                                                     │
//! │  PageDriver (trait)                                          │
//! │   ├── ChromiumDriver   CDP via chromiumoxide (`browser`)     │
//! │   └── MockDriver       in-memory DOM for offline tests       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Driver calls never wait: a missing element is reported as
//! [`E2eError::ElementNotFound`] and the handle layer decides whether to
//! poll again.

use crate::locator::{FramePath, Locator, Selector};
use crate::result::{E2eError, E2eResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;

/// Abstract driver trait for browser automation
///
/// # Implementations
///
/// - `ChromiumDriver` - uses chromiumoxide (feature `browser`)
/// - `MockDriver` - for unit testing
#[async_trait]
pub trait PageDriver: Send + Sync + fmt::Debug {
    /// Navigate the page to URL
    async fn navigate(&self, url: &str) -> E2eResult<()>;

    /// Document title of the top-level page
    async fn title(&self) -> E2eResult<String>;

    /// Current URL of the top-level page
    async fn current_url(&self) -> E2eResult<String>;

    /// Whether an element matches (frames included)
    async fn exists(&self, locator: &Locator) -> E2eResult<bool>;

    /// Whether the element exists and is rendered; `false` when missing
    async fn is_visible(&self, locator: &Locator) -> E2eResult<bool>;

    /// Click the element with a real pointer event
    async fn click(&self, locator: &Locator) -> E2eResult<()>;

    /// Replace the element's value with `value` as typed input
    async fn fill(&self, locator: &Locator, value: &str) -> E2eResult<()>;

    /// Select the option whose value or label equals `value`
    async fn select_option(&self, locator: &Locator, value: &str) -> E2eResult<()>;

    /// Checked state (`aria-checked` when present, else `checked`)
    async fn is_checked(&self, locator: &Locator) -> E2eResult<bool>;

    /// `textContent` of the element
    async fn text_content(&self, locator: &Locator) -> E2eResult<Option<String>>;

    /// `value` of an input-like element
    async fn input_value(&self, locator: &Locator) -> E2eResult<String>;

    /// Attribute value, `None` when absent
    async fn attribute(&self, locator: &Locator, name: &str) -> E2eResult<Option<String>>;

    /// Close the browser
    async fn close(&self) -> E2eResult<()>;
}

// ============================================================================
// Mock driver
// ============================================================================

/// Element state held by the [`MockDriver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// Text content
    pub text: Option<String>,
    /// Input value
    pub value: String,
    /// Checked state; `Some` makes a click toggle it
    pub checked: Option<bool>,
    /// Whether the element is rendered
    pub visible: bool,
    /// Attributes
    pub attributes: HashMap<String, String>,
    /// Allowed option values for a `<select>` (empty accepts anything)
    pub options: Vec<String>,
}

impl Default for MockElement {
    fn default() -> Self {
        Self::new()
    }
}

impl MockElement {
    /// A visible element without text or value
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: None,
            value: String::new(),
            checked: None,
            visible: true,
            attributes: HashMap::new(),
            options: Vec::new(),
        }
    }

    /// Set text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set input value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Make the element a checkbox in the given state
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.set_checked(checked);
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Restrict a `<select>` to these option values
    #[must_use]
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| (*o).to_string()).collect();
        self
    }

    /// Mark the element as not rendered
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = Some(checked);
        let _ = self
            .attributes
            .insert("aria-checked".to_string(), checked.to_string());
    }
}

/// Scripted reaction of the mock page to an interaction
#[derive(Debug, Clone)]
pub enum MockEffect {
    /// Insert (or replace) a visible element
    Show(Locator, MockElement),
    /// Hide an element, keeping its state
    Hide(Locator),
    /// Change an element's text
    SetText(Locator, String),
    /// Change the document title
    SetTitle(String),
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    title: String,
    elements: HashMap<String, MockElement>,
    on_navigate: Vec<MockEffect>,
    on_click: HashMap<String, Vec<MockEffect>>,
    on_select: HashMap<(String, String), Vec<MockEffect>>,
    call_history: Vec<String>,
}

impl MockState {
    /// Resolve an element, requiring every iframe host on the way to exist
    fn resolve(&self, locator: &Locator) -> Option<&MockElement> {
        let mut parent = FramePath::root();
        for host in locator.frame().frames() {
            let host_locator = Locator::new(parent.clone(), Selector::css(host.clone()));
            if !self.elements.contains_key(&host_locator.key()) {
                return None;
            }
            parent = parent.child(host.clone());
        }
        self.elements.get(&locator.key())
    }

    fn require(&self, locator: &Locator) -> E2eResult<&MockElement> {
        self.resolve(locator).ok_or_else(|| not_found(locator))
    }

    fn require_visible(&mut self, locator: &Locator) -> E2eResult<&mut MockElement> {
        match self.resolve(locator) {
            Some(element) if element.visible => {}
            _ => return Err(not_found(locator)),
        }
        self.elements
            .get_mut(&locator.key())
            .ok_or_else(|| not_found(locator))
    }

    fn apply(&mut self, effects: Vec<MockEffect>) {
        for effect in effects {
            match effect {
                MockEffect::Show(locator, element) => {
                    let _ = self.elements.insert(locator.key(), element);
                }
                MockEffect::Hide(locator) => {
                    if let Some(element) = self.elements.get_mut(&locator.key()) {
                        element.visible = false;
                    }
                }
                MockEffect::SetText(locator, text) => {
                    if let Some(element) = self.elements.get_mut(&locator.key()) {
                        element.text = Some(text);
                    }
                }
                MockEffect::SetTitle(title) => self.title = title,
            }
        }
    }
}

fn not_found(locator: &Locator) -> E2eError {
    E2eError::ElementNotFound {
        locator: locator.to_string(),
    }
}

/// In-memory driver for unit testing
///
/// Elements are addressed by [`Locator::key`]; interactions are recorded in a
/// call history and can trigger scripted [`MockEffect`]s.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an element
    pub fn insert(&self, locator: &Locator, element: MockElement) {
        let _ = self.state.lock().elements.insert(locator.key(), element);
    }

    /// Effects applied after every navigation
    pub fn on_navigate(&self, effects: Vec<MockEffect>) {
        self.state.lock().on_navigate.extend(effects);
    }

    /// Effects applied after each click on `locator`
    pub fn on_click(&self, locator: &Locator, effects: Vec<MockEffect>) {
        self.state
            .lock()
            .on_click
            .entry(locator.key())
            .or_default()
            .extend(effects);
    }

    /// Effects applied after selecting `value` in `locator`
    pub fn on_select(&self, locator: &Locator, value: &str, effects: Vec<MockEffect>) {
        self.state
            .lock()
            .on_select
            .entry((locator.key(), value.to_string()))
            .or_default()
            .extend(effects);
    }

    /// Snapshot of an element's state
    #[must_use]
    pub fn element(&self, locator: &Locator) -> Option<MockElement> {
        self.state.lock().elements.get(&locator.key()).cloned()
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().call_history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state
            .lock()
            .call_history
            .iter()
            .any(|c| c.starts_with(method))
    }

    /// Number of clicks delivered to `locator`
    #[must_use]
    pub fn clicks_on(&self, locator: &Locator) -> usize {
        let entry = format!("click:{}", locator.key());
        self.state
            .lock()
            .call_history
            .iter()
            .filter(|c| **c == entry)
            .count()
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn navigate(&self, url: &str) -> E2eResult<()> {
        let mut state = self.state.lock();
        state.call_history.push(format!("navigate:{url}"));
        state.url = url.to_string();
        let effects = state.on_navigate.clone();
        state.apply(effects);
        Ok(())
    }

    async fn title(&self) -> E2eResult<String> {
        Ok(self.state.lock().title.clone())
    }

    async fn current_url(&self) -> E2eResult<String> {
        Ok(self.state.lock().url.clone())
    }

    async fn exists(&self, locator: &Locator) -> E2eResult<bool> {
        Ok(self.state.lock().resolve(locator).is_some())
    }

    async fn is_visible(&self, locator: &Locator) -> E2eResult<bool> {
        Ok(self
            .state
            .lock()
            .resolve(locator)
            .is_some_and(|e| e.visible))
    }

    async fn click(&self, locator: &Locator) -> E2eResult<()> {
        let mut state = self.state.lock();
        let element = state.require_visible(locator)?;
        if let Some(checked) = element.checked {
            element.set_checked(!checked);
        }
        let key = locator.key();
        state.call_history.push(format!("click:{key}"));
        let effects = state.on_click.get(&key).cloned().unwrap_or_default();
        state.apply(effects);
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> E2eResult<()> {
        let mut state = self.state.lock();
        state.require_visible(locator)?.value = value.to_string();
        state
            .call_history
            .push(format!("fill:{}={value}", locator.key()));
        Ok(())
    }

    async fn select_option(&self, locator: &Locator, value: &str) -> E2eResult<()> {
        let mut state = self.state.lock();
        let element = state.require_visible(locator)?;
        if !element.options.is_empty() && !element.options.iter().any(|o| o == value) {
            return Err(E2eError::OptionNotFound {
                locator: locator.to_string(),
                value: value.to_string(),
            });
        }
        element.value = value.to_string();
        let key = locator.key();
        state.call_history.push(format!("select:{key}={value}"));
        let effects = state
            .on_select
            .get(&(key, value.to_string()))
            .cloned()
            .unwrap_or_default();
        state.apply(effects);
        Ok(())
    }

    async fn is_checked(&self, locator: &Locator) -> E2eResult<bool> {
        let state = self.state.lock();
        Ok(state.require(locator)?.checked.unwrap_or(false))
    }

    async fn text_content(&self, locator: &Locator) -> E2eResult<Option<String>> {
        let state = self.state.lock();
        Ok(state.require(locator)?.text.clone())
    }

    async fn input_value(&self, locator: &Locator) -> E2eResult<String> {
        let state = self.state.lock();
        Ok(state.require(locator)?.value.clone())
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> E2eResult<Option<String>> {
        let state = self.state.lock();
        Ok(state.require(locator)?.attributes.get(name).cloned())
    }

    async fn close(&self) -> E2eResult<()> {
        self.state.lock().call_history.push("close".to_string());
        Ok(())
    }
}
