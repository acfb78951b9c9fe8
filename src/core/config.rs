use std::path::PathBuf;

/// Base URL of the remote site. Every relative URL returned by a search is
/// normalized against this, and session cookies are scoped to this origin.
pub const BASE_URL: &str = "https://dimora.jp/";

/// Client construction options.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Browser viewport height in pixels. Affects only rendering: the login
    /// page lays out the CAPTCHA below the fold on short viewports.
    pub viewport_height: u32,
    /// When set, each workflow step drops a diagnostic screenshot into this
    /// directory. Screenshots are best-effort and never fail a workflow.
    pub screenshot_dir: Option<PathBuf>,
    /// Settle delays used where the site exposes no completion signal.
    pub delays: Delays,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            viewport_height: 1600,
            screenshot_dir: None,
            delays: Delays::default(),
        }
    }
}

/// Fixed wait intervals, in milliseconds.
///
/// The remote UI gives no programmatic "done" event for any of these steps,
/// so the workflows sleep a fixed interval instead. The defaults are the
/// values the site has been observed to need; raise them on slow networks.
#[derive(Clone, Debug)]
pub struct Delays {
    /// Wait after submitting the login form before reading the cookie jar.
    pub login_settle_ms: u64,
    /// Wait after reconciling the filter UI before the submit control is
    /// reliably clickable.
    pub filter_settle_ms: u64,
    /// Wait for the search result listing to render after submit.
    pub results_wait_ms: u64,
    /// Wait between opening the reservation panel and confirming.
    pub reserve_settle_ms: u64,
    /// Upper bound for waits on expected page controls. Expiry means the
    /// markup changed, not a transient condition.
    pub selector_timeout_ms: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            login_settle_ms: 10_000,
            filter_settle_ms: 400,
            results_wait_ms: 1_000,
            reserve_settle_ms: 1_000,
            selector_timeout_ms: 10_000,
        }
    }
}
