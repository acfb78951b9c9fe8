use async_trait::async_trait;
use playwright::api::{Browser, BrowserContext, Page, Viewport};
use playwright::Playwright;
use serde_json::Value;
use tracing::info;

use super::{BrowserCookie, BrowserDriver, BrowserError};
use crate::core::config::ClientOptions;

/// Production driver running a headless Chromium via Playwright.
///
/// One driver owns exactly one browser, context and page; the whole stack is
/// torn down by [`BrowserDriver::close`].
pub struct PlaywrightDriver {
    _playwright: Playwright,
    browser: Browser,
    context: BrowserContext,
    page: Page,
}

impl PlaywrightDriver {
    pub async fn launch(options: &ClientOptions) -> Result<Self, BrowserError> {
        info!("Initializing Playwright...");
        let playwright = Playwright::initialize().await.map_err(|e| {
            BrowserError::ConnectionFailed(format!("Failed to initialize Playwright: {}", e))
        })?;

        playwright.prepare().map_err(|e| {
            BrowserError::ConnectionFailed(format!("Failed to prepare browser binaries: {}", e))
        })?;

        let chromium = playwright.chromium();

        info!("Launching headless Chromium...");
        let browser = chromium
            .launcher()
            .headless(true)
            .launch()
            .await
            .map_err(|e| {
                BrowserError::ConnectionFailed(format!("Failed to launch Chromium: {}", e))
            })?;

        let context = browser
            .context_builder()
            .build()
            .await
            .map_err(|e| BrowserError::Other(format!("Failed to create context: {}", e)))?;

        let page = context
            .new_page()
            .await
            .map_err(|e| BrowserError::Other(format!("Failed to create page: {}", e)))?;

        page.set_viewport_size(Viewport {
            width: 1280,
            height: options.viewport_height as i32,
        })
        .await
        .map_err(|e| BrowserError::Other(format!("Failed to set viewport: {}", e)))?;

        Ok(Self {
            _playwright: playwright,
            browser,
            context,
            page,
        })
    }

    fn cookie_to_protocol(cookie: &BrowserCookie) -> Value {
        let mut obj = serde_json::Map::new();
        obj.insert("name".into(), Value::String(cookie.name.clone()));
        obj.insert("value".into(), Value::String(cookie.value.clone()));
        if let Some(url) = &cookie.url {
            obj.insert("url".into(), Value::String(url.clone()));
        }
        if let Some(domain) = &cookie.domain {
            obj.insert("domain".into(), Value::String(domain.clone()));
        }
        if let Some(path) = &cookie.path {
            obj.insert("path".into(), Value::String(path.clone()));
        }
        if let Some(expires) = cookie.expires {
            if let Some(n) = serde_json::Number::from_f64(expires) {
                obj.insert("expires".into(), Value::Number(n));
            }
        }
        if let Some(http_only) = cookie.http_only {
            obj.insert("httpOnly".into(), Value::Bool(http_only));
        }
        if let Some(secure) = cookie.secure {
            obj.insert("secure".into(), Value::Bool(secure));
        }
        if let Some(same_site) = &cookie.same_site {
            obj.insert("sameSite".into(), Value::String(same_site.clone()));
        }
        Value::Object(obj)
    }
}

#[async_trait]
impl BrowserDriver for PlaywrightDriver {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.page
            .goto_builder(url)
            .goto()
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<(), BrowserError> {
        self.page
            .wait_for_selector_builder(selector)
            .timeout(timeout_ms as f64)
            .wait_for_selector()
            .await
            .map_err(|e| {
                BrowserError::Timeout(format!("Timeout waiting for {}: {}", selector, e))
            })?;
        Ok(())
    }

    async fn evaluate(&self, script: &str, arg: Value) -> Result<Value, BrowserError> {
        self.page
            .evaluate::<Value, Value>(script, arg)
            .await
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }

    async fn screenshot(&self, path: &str) -> Result<(), BrowserError> {
        self.page
            .screenshot_builder()
            .path(std::path::PathBuf::from(path))
            .screenshot()
            .await
            .map_err(|e| BrowserError::Other(format!("Failed to take screenshot: {}", e)))?;
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<BrowserCookie>, BrowserError> {
        let cookies = self
            .context
            .cookies(&[])
            .await
            .map_err(|e| BrowserError::Other(format!("Failed to get cookies: {}", e)))?;

        Ok(cookies
            .into_iter()
            .map(|c| BrowserCookie {
                name: c.name,
                value: c.value,
                url: None,
                domain: c.domain,
                path: c.path,
                expires: c.expires,
                http_only: c.http_only,
                secure: c.secure,
                same_site: c.same_site.map(|s| format!("{:?}", s)),
            })
            .collect())
    }

    async fn set_cookies(&self, cookies: &[BrowserCookie]) -> Result<(), BrowserError> {
        let raw = Value::Array(cookies.iter().map(Self::cookie_to_protocol).collect());
        let protocol_cookies: Vec<playwright::api::Cookie> = serde_json::from_value(raw)
            .map_err(|e| BrowserError::Other(format!("Invalid cookie record: {}", e)))?;

        self.context
            .add_cookies(&protocol_cookies)
            .await
            .map_err(|e| BrowserError::Other(format!("Failed to set cookies: {}", e)))?;
        Ok(())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::Other(format!("Failed to close browser: {}", e)))?;
        Ok(())
    }
}
