use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod mock_driver;
pub mod playwright_driver;

pub use mock_driver::{MockCall, MockDriver};
pub use playwright_driver::PlaywrightDriver;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    #[error("Timeout waiting for element: {0}")]
    Timeout(String),
    #[error("Script evaluation failed: {0}")]
    Evaluation(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Browser error: {0}")]
    Other(String),
}

/// One cookie as the browser context reports or accepts it.
///
/// For injection, either `url` or `domain`/`path` must be present to scope
/// the cookie; reads always carry `domain`/`path`.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserCookie {
    pub name: String,
    pub value: String,
    pub url: Option<String>,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub expires: Option<f64>,
    pub http_only: Option<bool>,
    pub secure: Option<bool>,
    pub same_site: Option<String>,
}

/// Browser automation capability required by the workflows.
///
/// The workflows drive the remote UI exclusively through these seven
/// primitives. A driver is a sequential resource: callers must not run two
/// operations against the same driver concurrently.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate the page to a URL and wait for the load to settle.
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Wait until the selector matches an element, up to `timeout_ms`.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<(), BrowserError>;

    /// Evaluate a page-side function with a single JSON argument and return
    /// its JSON result. The script must be a function expression, e.g.
    /// `(args) => { ... return value; }`.
    async fn evaluate(&self, script: &str, arg: Value) -> Result<Value, BrowserError>;

    /// Write a screenshot of the current page to `path`.
    async fn screenshot(&self, path: &str) -> Result<(), BrowserError>;

    /// Read the context's cookie jar.
    async fn cookies(&self) -> Result<Vec<BrowserCookie>, BrowserError>;

    /// Add cookies to the context. Re-adding existing cookies is safe.
    async fn set_cookies(&self, cookies: &[BrowserCookie]) -> Result<(), BrowserError>;

    /// End the browser session and release its resources.
    async fn close(&self) -> Result<(), BrowserError>;
}
