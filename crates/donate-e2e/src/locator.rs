//! Locator abstraction for element selection across nested frames.
//!
//! A [`Locator`] is plain data: the chain of iframe selectors leading from the
//! top document to a frame ([`FramePath`]) plus the [`Selector`] of the element
//! inside that frame. Drivers turn it into something executable; the Chromium
//! driver uses [`Locator::script`] to build a self-contained JavaScript
//! expression that walks `contentDocument` through every iframe.

use std::fmt;

/// Separator used when rendering a frame chain, Playwright style.
pub const FRAME_SEPARATOR: &str = " >> ";

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., `[data-qa="amount"]`)
    Css(String),
    /// Element whose `title` attribute contains the text (case-insensitive)
    Title(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a title selector (Playwright's `getByTitle`)
    #[must_use]
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title(text.into())
    }

    /// JavaScript expression finding the first match inside `doc`
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("doc.querySelector({})", js_string(s)),
            Self::Title(t) => format!(
                "Array.from(doc.querySelectorAll('[title]')).find(e => e.getAttribute('title').toLowerCase().includes({}))",
                js_string(&t.to_lowercase())
            ),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => f.write_str(s),
            Self::Title(t) => write!(f, "title={t}"),
        }
    }
}

/// Ordered iframe selectors from the top document down to a frame.
///
/// The empty path is the top-level document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FramePath {
    frames: Vec<String>,
}

impl FramePath {
    /// The top-level document
    #[must_use]
    pub const fn root() -> Self {
        Self { frames: Vec::new() }
    }

    /// Path to the frame hosted by `iframe` inside this frame
    #[must_use]
    pub fn child(&self, iframe: impl Into<String>) -> Self {
        let mut frames = self.frames.clone();
        frames.push(iframe.into());
        Self { frames }
    }

    /// Whether this is the top-level document
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.frames.is_empty()
    }

    /// Nesting depth (0 for the top-level document)
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Iframe selectors, outermost first
    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}

impl fmt::Display for FramePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return f.write_str("document");
        }
        f.write_str(&self.frames.join(FRAME_SEPARATOR))
    }
}

/// An element address: frame chain plus selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    frame: FramePath,
    selector: Selector,
}

impl Locator {
    /// Create a locator for a selector inside a frame
    #[must_use]
    pub const fn new(frame: FramePath, selector: Selector) -> Self {
        Self { frame, selector }
    }

    /// Create a CSS locator in the top-level document
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(FramePath::root(), Selector::css(selector))
    }

    /// The frame this locator searches in
    #[must_use]
    pub const fn frame(&self) -> &FramePath {
        &self.frame
    }

    /// The selector inside the frame
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Stable string key, used by the mock driver to address elements
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Build a JavaScript expression that resolves the element and runs `body`.
    ///
    /// `body` sees `el` (the element), `hosts` (the iframe elements crossed,
    /// outermost first) and `offset()` (the viewport offset of the element's
    /// frame). The expression evaluates to `null` when any frame or the
    /// element is missing, otherwise to whatever `body` returns.
    #[must_use]
    pub fn script(&self, body: &str) -> String {
        let frames = serde_json::to_string(self.frame.frames()).unwrap_or_else(|_| "[]".into());
        format!(
            "(() => {{\n\
             let doc = document;\n\
             const hosts = [];\n\
             for (const sel of {frames}) {{\n\
               const host = doc.querySelector(sel);\n\
               if (!host || !host.contentDocument) {{ return null; }}\n\
               hosts.push(host);\n\
               doc = host.contentDocument;\n\
             }}\n\
             const offset = () => hosts.reduce((acc, h) => {{\n\
               const r = h.getBoundingClientRect();\n\
               return {{ x: acc.x + r.left + h.clientLeft, y: acc.y + r.top + h.clientTop }};\n\
             }}, {{ x: 0, y: 0 }});\n\
             const el = {query};\n\
             if (!el) {{ return null; }}\n\
             {body}\n\
             }})()",
            query = self.selector.to_query(),
        )
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frame.is_root() {
            write!(f, "{}", self.selector)
        } else {
            write!(f, "{}{FRAME_SEPARATOR}{}", self.frame, self.selector)
        }
    }
}

/// Render a Rust string as a JavaScript string literal
pub(crate) fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
