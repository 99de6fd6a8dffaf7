//! Browser control for headless testing.
//!
//! Real browser control goes through the Chrome `DevTools` Protocol. When
//! compiled with the `browser` feature, [`ChromiumDriver`] implements
//! [`PageDriver`](crate::driver::PageDriver) with chromiumoxide. Without the
//! feature only [`BrowserConfig`] is available and tests run against the
//! mock driver.

use crate::config::SuiteConfig;

/// Chromium flags that make cross-origin iframes scriptable from the top
/// document (the donation widget and the card fields live on other origins).
pub const CROSS_ORIGIN_ARGS: [&str; 3] = [
    "--disable-web-security",
    "--disable-site-isolation-trials",
    "--disable-features=IsolateOrigins,site-per-process",
];

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Allow scripting into cross-origin iframes
    pub cross_origin_frames: bool,
    /// Navigation timeout in milliseconds
    pub navigation_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            user_agent: None,
            sandbox: true,
            cross_origin_frames: true,
            navigation_timeout_ms: crate::wait::DEFAULT_WAIT_TIMEOUT_MS,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Keep the same-origin policy for iframes
    #[must_use]
    pub const fn with_same_origin_frames(mut self) -> Self {
        self.cross_origin_frames = false;
        self
    }

    /// Set navigation timeout in milliseconds
    #[must_use]
    pub const fn with_navigation_timeout(mut self, ms: u64) -> Self {
        self.navigation_timeout_ms = ms;
        self
    }

    /// Extra command line arguments passed to chromium
    #[must_use]
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.cross_origin_frames {
            args.extend(CROSS_ORIGIN_ARGS.iter().map(|a| (*a).to_string()));
        }
        if let Some(ref ua) = self.user_agent {
            args.push(format!("--user-agent={ua}"));
        }
        args
    }
}

impl From<&SuiteConfig> for BrowserConfig {
    fn from(config: &SuiteConfig) -> Self {
        let mut browser = Self::default()
            .with_headless(config.headless)
            .with_viewport(config.viewport_width, config.viewport_height)
            .with_navigation_timeout(config.navigation_timeout_ms);
        browser.chromium_path.clone_from(&config.chromium_path);
        browser.sandbox = config.sandbox;
        browser
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
#[allow(clippy::significant_drop_tightening, clippy::missing_errors_doc)]
mod cdp {
    use super::BrowserConfig;
    use crate::driver::PageDriver;
    use crate::locator::{js_string, Locator};
    use crate::result::{E2eError, E2eResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::input::InsertTextParams;
    use chromiumoxide::layout::Point;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::Deserialize;
    use serde_json::Value;
    use std::time::Duration;
    use tokio::sync::Mutex;
    use tracing::{debug, warn};

    #[derive(Debug, Deserialize)]
    struct ClickPoint {
        x: f64,
        y: f64,
    }

    /// [`PageDriver`] backed by a real Chromium over CDP
    #[derive(Debug)]
    pub struct ChromiumDriver {
        config: BrowserConfig,
        browser: Mutex<CdpBrowser>,
        page: CdpPage,
        handle: tokio::task::JoinHandle<()>,
    }

    impl ChromiumDriver {
        /// Launch chromium and open a blank page
        ///
        /// # Errors
        ///
        /// Returns error if browser cannot be launched
        pub async fn launch(config: BrowserConfig) -> E2eResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            for arg in config.launch_args() {
                builder = builder.arg(arg);
            }

            let cdp_config = builder
                .build()
                .map_err(|message| E2eError::BrowserLaunch { message })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| E2eError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| E2eError::Page {
                    message: e.to_string(),
                })?;

            debug!(headless = config.headless, "chromium launched");
            Ok(Self {
                config,
                browser: Mutex::new(browser),
                page,
                handle,
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Evaluate `body` against the element and return its `v` field.
        ///
        /// The script result is serialized in the page so `null` survives the
        /// CDP round trip and maps to [`E2eError::ElementNotFound`].
        async fn eval(&self, locator: &Locator, body: &str) -> E2eResult<Value> {
            let script = format!("JSON.stringify({})", locator.script(body));
            let raw: String = self
                .page
                .evaluate(script)
                .await
                .map_err(|e| E2eError::Script {
                    message: e.to_string(),
                })?
                .into_value()
                .map_err(|e| E2eError::Script {
                    message: e.to_string(),
                })?;

            match serde_json::from_str::<Value>(&raw)? {
                Value::Null => Err(E2eError::ElementNotFound {
                    locator: locator.to_string(),
                }),
                Value::Object(mut map) => Ok(map.remove("v").unwrap_or(Value::Null)),
                other => Err(E2eError::Script {
                    message: format!("unexpected result {other} for {locator}"),
                }),
            }
        }

        async fn eval_bool(&self, locator: &Locator, body: &str) -> E2eResult<bool> {
            Ok(self.eval(locator, body).await?.as_bool().unwrap_or(false))
        }
    }

    #[async_trait]
    impl PageDriver for ChromiumDriver {
        async fn navigate(&self, url: &str) -> E2eResult<()> {
            debug!(url, "navigate");
            let timeout = Duration::from_millis(self.config.navigation_timeout_ms);
            match tokio::time::timeout(timeout, self.page.goto(url)).await {
                Ok(Ok(_)) => Ok(()),
                Ok(Err(e)) => Err(E2eError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                }),
                Err(_) => Err(E2eError::Navigation {
                    url: url.to_string(),
                    message: format!(
                        "no load event within {}ms",
                        self.config.navigation_timeout_ms
                    ),
                }),
            }
        }

        async fn title(&self) -> E2eResult<String> {
            let title = self.page.get_title().await.map_err(|e| E2eError::Page {
                message: e.to_string(),
            })?;
            Ok(title.unwrap_or_default())
        }

        async fn current_url(&self) -> E2eResult<String> {
            let url = self.page.url().await.map_err(|e| E2eError::Page {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_default())
        }

        async fn exists(&self, locator: &Locator) -> E2eResult<bool> {
            match self.eval(locator, "return { v: true };").await {
                Ok(_) => Ok(true),
                Err(e) if e.is_retryable() => Ok(false),
                Err(e) => Err(e),
            }
        }

        async fn is_visible(&self, locator: &Locator) -> E2eResult<bool> {
            let body = "const r = el.getBoundingClientRect();\n\
                        const s = el.ownerDocument.defaultView.getComputedStyle(el);\n\
                        return { v: r.width > 0 && r.height > 0 \
                        && s.visibility !== 'hidden' && s.display !== 'none' };";
            match self.eval_bool(locator, body).await {
                Err(e) if e.is_retryable() => Ok(false),
                other => other,
            }
        }

        async fn click(&self, locator: &Locator) -> E2eResult<()> {
            let body = "el.scrollIntoView({ block: 'center', inline: 'center' });\n\
                        const r = el.getBoundingClientRect();\n\
                        const o = offset();\n\
                        return { v: { x: o.x + r.left + r.width / 2, y: o.y + r.top + r.height / 2 } };";
            let point: ClickPoint = serde_json::from_value(self.eval(locator, body).await?)?;
            debug!(%locator, x = point.x, y = point.y, "click");
            self.page
                .click(Point::new(point.x, point.y))
                .await
                .map_err(|e| E2eError::Input {
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn fill(&self, locator: &Locator, value: &str) -> E2eResult<()> {
            debug!(%locator, value, "fill");
            let focus = "el.focus();\n\
                         if (typeof el.select === 'function') { el.select(); }\n\
                         return { v: true };";
            let _ = self.eval(locator, focus).await?;

            if value.is_empty() {
                let clear = "el.value = '';\n\
                             el.dispatchEvent(new Event('input', { bubbles: true }));\n\
                             return { v: true };";
                let _ = self.eval(locator, clear).await?;
                return Ok(());
            }

            self.page
                .execute(InsertTextParams::new(value))
                .await
                .map_err(|e| E2eError::Input {
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn select_option(&self, locator: &Locator, value: &str) -> E2eResult<()> {
            debug!(%locator, value, "select option");
            let body = format!(
                "const want = {};\n\
                 const opt = Array.from(el.options || []).find(o => \
                 o.value === want || o.label === want || o.text.trim() === want);\n\
                 if (!opt) {{ return {{ v: false }}; }}\n\
                 el.value = opt.value;\n\
                 el.dispatchEvent(new Event('input', {{ bubbles: true }}));\n\
                 el.dispatchEvent(new Event('change', {{ bubbles: true }}));\n\
                 return {{ v: true }};",
                js_string(value)
            );
            if self.eval_bool(locator, &body).await? {
                Ok(())
            } else {
                Err(E2eError::OptionNotFound {
                    locator: locator.to_string(),
                    value: value.to_string(),
                })
            }
        }

        async fn is_checked(&self, locator: &Locator) -> E2eResult<bool> {
            let body = "const a = el.getAttribute('aria-checked');\n\
                        return { v: a !== null ? a === 'true' : !!el.checked };";
            self.eval_bool(locator, body).await
        }

        async fn text_content(&self, locator: &Locator) -> E2eResult<Option<String>> {
            let value = self.eval(locator, "return { v: el.textContent };").await?;
            Ok(value.as_str().map(ToString::to_string))
        }

        async fn input_value(&self, locator: &Locator) -> E2eResult<String> {
            let value = self
                .eval(locator, "return { v: el.value === undefined ? '' : String(el.value) };")
                .await?;
            Ok(value.as_str().unwrap_or_default().to_string())
        }

        async fn attribute(&self, locator: &Locator, name: &str) -> E2eResult<Option<String>> {
            let body = format!("return {{ v: el.getAttribute({}) }};", js_string(name));
            let value = self.eval(locator, &body).await?;
            Ok(value.as_str().map(ToString::to_string))
        }

        async fn close(&self) -> E2eResult<()> {
            let mut browser = self.browser.lock().await;
            if let Err(e) = browser.close().await {
                warn!(error = %e, "browser close failed");
            }
            if let Err(e) = browser.wait().await {
                warn!(error = %e, "browser process did not exit cleanly");
            }
            self.handle.abort();
            debug!("chromium closed");
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::ChromiumDriver;
