use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::{BrowserCookie, BrowserDriver, BrowserError};

/// Calls recorded by [`MockDriver`], in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Navigate(String),
    WaitForSelector(String),
    Evaluate { script: String, arg: Value },
    Screenshot(String),
    GetCookies,
    SetCookies(Vec<BrowserCookie>),
    Close,
}

#[derive(Default)]
struct MockState {
    evaluate_results: VecDeque<Result<Value, BrowserError>>,
    missing_selectors: HashSet<String>,
    cookie_jar: Vec<BrowserCookie>,
    calls: Vec<MockCall>,
    fail_navigation: Option<String>,
}

/// Scripted in-memory driver for workflow tests.
///
/// Queue `evaluate` results in the order the workflow will request them,
/// mark selectors that should never appear, then assert against the call
/// log afterwards.
#[derive(Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next `evaluate` return value.
    pub fn push_evaluate(&self, value: Value) -> &Self {
        self.state
            .lock()
            .unwrap()
            .evaluate_results
            .push_back(Ok(value));
        self
    }

    /// Queues an `evaluate` failure.
    pub fn push_evaluate_error(&self, message: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .evaluate_results
            .push_back(Err(BrowserError::Evaluation(message.to_string())));
        self
    }

    /// Marks a selector as never appearing; waits on it time out.
    pub fn with_missing_selector(&self, selector: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .missing_selectors
            .insert(selector.to_string());
        self
    }

    /// Pre-fills the cookie jar returned by `cookies()`.
    pub fn set_cookie_jar(&self, cookies: Vec<BrowserCookie>) -> &Self {
        self.state.lock().unwrap().cookie_jar = cookies;
        self
    }

    /// Makes every `navigate` call fail with the given message.
    pub fn fail_navigation(&self, message: &str) -> &Self {
        self.state.lock().unwrap().fail_navigation = Some(message.to_string());
        self
    }

    /// Snapshot of all recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// The `evaluate` invocations only, as (script, argument) pairs.
    pub fn evaluate_calls(&self) -> Vec<(String, Value)> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter_map(|c| match c {
                MockCall::Evaluate { script, arg } => Some((script.clone(), arg.clone())),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl BrowserDriver for MockDriver {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        info!("[Mock] Navigating to {}", url);
        self.record(MockCall::Navigate(url.to_string()));
        let failure = self.state.lock().unwrap().fail_navigation.clone();
        match failure {
            Some(message) => Err(BrowserError::NavigationFailed(message)),
            None => Ok(()),
        }
    }

    async fn wait_for_selector(&self, selector: &str, _timeout_ms: u64) -> Result<(), BrowserError> {
        info!("[Mock] Waiting for {}", selector);
        self.record(MockCall::WaitForSelector(selector.to_string()));
        let missing = self
            .state
            .lock()
            .unwrap()
            .missing_selectors
            .contains(selector);
        if missing {
            return Err(BrowserError::Timeout(format!(
                "Timeout waiting for {}",
                selector
            )));
        }
        Ok(())
    }

    async fn evaluate(&self, script: &str, arg: Value) -> Result<Value, BrowserError> {
        info!("[Mock] Evaluating script ({} bytes)", script.len());
        self.record(MockCall::Evaluate {
            script: script.to_string(),
            arg,
        });
        self.state
            .lock()
            .unwrap()
            .evaluate_results
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }

    async fn screenshot(&self, path: &str) -> Result<(), BrowserError> {
        info!("[Mock] Taking screenshot to {}", path);
        self.record(MockCall::Screenshot(path.to_string()));

        use tokio::fs::File;
        use tokio::io::AsyncWriteExt;

        if let Some(parent) = std::path::Path::new(path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BrowserError::Other(e.to_string()))?;
        }
        let mut file = File::create(path)
            .await
            .map_err(|e| BrowserError::Other(e.to_string()))?;
        file.write_all(b"mock screenshot")
            .await
            .map_err(|e| BrowserError::Other(e.to_string()))?;
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<BrowserCookie>, BrowserError> {
        info!("[Mock] Getting cookies");
        self.record(MockCall::GetCookies);
        Ok(self.state.lock().unwrap().cookie_jar.clone())
    }

    async fn set_cookies(&self, cookies: &[BrowserCookie]) -> Result<(), BrowserError> {
        info!("[Mock] Setting {} cookies", cookies.len());
        self.record(MockCall::SetCookies(cookies.to_vec()));
        Ok(())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        info!("[Mock] Closing session");
        self.record(MockCall::Close);
        Ok(())
    }
}
