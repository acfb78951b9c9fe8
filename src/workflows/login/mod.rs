use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::core::config::{ClientOptions, BASE_URL};
use crate::core::error::{Error, Result};
use crate::core::session::SessionData;
use crate::infrastructure::browser::{BrowserDriver, BrowserError};
use crate::workflows::capture_diagnostic;

pub mod constants;
use constants::{CAPTCHA_EXTRACT_SCRIPT, CONFIG, FILL_FORM_SCRIPT, SUBMIT_SCRIPT};

/// CAPTCHA image presented by the login page. One challenge per attempt;
/// the answer comes from a human and is not retried automatically.
#[derive(Debug, Clone)]
pub struct CaptchaChallenge {
    image: Vec<u8>,
}

impl CaptchaChallenge {
    /// JPEG bytes of the CAPTCHA image.
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.image
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChallengeState {
    NotStarted,
    ChallengeIssued,
    Completed,
    Failed,
}

/// Interactive login challenge against the site.
///
/// [`LoginChallenger::start`] fetches the CAPTCHA image; the caller shows it
/// to a human and then calls [`LoginChallenger::finish`] with the
/// credentials and the answer. A successful finish yields the
/// [`SessionData`] for constructing an authenticated client.
///
/// Note that `finish` does not prove the login succeeded, because the site
/// gives no machine-readable signal. An empty cookie jar is rejected, but
/// callers should validate the session by performing an authenticated
/// action.
pub struct LoginChallenger {
    driver: Arc<dyn BrowserDriver>,
    options: Arc<ClientOptions>,
    state: ChallengeState,
}

impl LoginChallenger {
    pub fn new(driver: Arc<dyn BrowserDriver>, options: ClientOptions) -> Self {
        Self {
            driver,
            options: Arc::new(options),
            state: ChallengeState::NotStarted,
        }
    }

    /// Navigates to the login page and fetches the CAPTCHA image.
    pub async fn start(&mut self) -> Result<CaptchaChallenge> {
        self.state = ChallengeState::Failed;

        let login_url = format!("{}{}", BASE_URL, CONFIG.login_path);
        info!("Starting login challenge at {}", login_url);
        self.driver
            .navigate(&login_url)
            .await
            .map_err(Error::Submission)?;
        capture_diagnostic(self.driver.as_ref(), &self.options, "login-start").await;

        let data_url = self
            .driver
            .evaluate(CAPTCHA_EXTRACT_SCRIPT, Value::Null)
            .await
            .map_err(Error::Submission)?;

        let data_url = match data_url {
            Value::String(s) => s,
            _ => {
                return Err(Error::ElementNotFound(
                    "CAPTCHA image on the login page".into(),
                ))
            }
        };

        let encoded = data_url.split(',').nth(1).ok_or_else(|| {
            Error::PageStructure("CAPTCHA image did not rasterize to a data URL".into())
        })?;
        let image = STANDARD.decode(encoded).map_err(|e| {
            Error::PageStructure(format!("CAPTCHA data URL payload is not base64: {}", e))
        })?;

        debug!("Fetched CAPTCHA image ({} bytes)", image.len());
        self.state = ChallengeState::ChallengeIssued;
        Ok(CaptchaChallenge { image })
    }

    /// Submits the credentials and the CAPTCHA answer, then captures the
    /// resulting session.
    pub async fn finish(
        &mut self,
        login_id: &str,
        password: &str,
        captcha_answer: &str,
    ) -> Result<SessionData> {
        if self.state != ChallengeState::ChallengeIssued {
            return Err(Error::NotInitialized(
                "login challenge has not been started",
            ));
        }
        self.state = ChallengeState::Failed;

        let filled = self
            .driver
            .evaluate(
                FILL_FORM_SCRIPT,
                json!({
                    "loginId": login_id,
                    "password": password,
                    "captchaAnswer": captcha_answer,
                }),
            )
            .await
            .map_err(Error::Submission)?;
        if filled != Value::Bool(true) {
            return Err(Error::ElementNotFound("login form fields".into()));
        }

        let submitted = self
            .driver
            .evaluate(SUBMIT_SCRIPT, Value::Null)
            .await
            .map_err(Error::Submission)?;
        if submitted != Value::Bool(true) {
            return Err(Error::ElementNotFound("login submit button".into()));
        }

        // The site redirects a few times after submit and exposes no "done"
        // signal; give it a fixed interval to settle.
        tokio::time::sleep(Duration::from_millis(self.options.delays.login_settle_ms)).await;
        capture_diagnostic(self.driver.as_ref(), &self.options, "login-finish").await;

        let cookies = self.driver.cookies().await.map_err(Error::Submission)?;
        let session = SessionData::from_browser_cookies(cookies);
        if session.is_empty() {
            return Err(Error::Submission(BrowserError::Other(
                "login produced an empty cookie jar".into(),
            )));
        }

        info!("Login challenge completed; captured {} cookies", session.len());
        self.state = ChallengeState::Completed;
        Ok(session)
    }
}
