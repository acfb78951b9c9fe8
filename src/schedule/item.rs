use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde_json::Value;
use tracing::{debug, info};

use super::constants::{CONFIG, CONFIRM_RESERVE_SCRIPT, OPEN_DETAIL_SCRIPT, READ_RESULT_SCRIPT};
use super::normalize_url;
use crate::core::config::ClientOptions;
use crate::core::error::{Error, Result};
use crate::infrastructure::browser::{BrowserDriver, BrowserError};
use crate::workflows::capture_diagnostic;

/// One parsed broadcast entry from a schedule search.
///
/// Immutable value plus one action: [`ScheduleItem::record_once`] books a
/// one-time recording of the program. The item holds the handle of the
/// client's browser context, so reservation actions of items sharing one
/// client must not run concurrently.
#[derive(Clone)]
pub struct ScheduleItem {
    driver: Arc<dyn BrowserDriver>,
    options: Arc<ClientOptions>,
    title: String,
    url: String,
    start_date: DateTime<Local>,
    end_date: DateTime<Local>,
    broadcaster_name: String,
}

impl ScheduleItem {
    pub(crate) fn new(
        driver: Arc<dyn BrowserDriver>,
        options: Arc<ClientOptions>,
        title: String,
        url: &str,
        start_date: DateTime<Local>,
        end_date: DateTime<Local>,
        broadcaster_name: String,
    ) -> Self {
        Self {
            driver,
            options,
            title,
            url: normalize_url(url),
            start_date,
            end_date,
            broadcaster_name,
        }
    }

    /// Program title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Absolute URL of the program's detail page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Scheduled broadcast start.
    pub fn start_date(&self) -> DateTime<Local> {
        self.start_date
    }

    /// Scheduled broadcast end.
    pub fn end_date(&self) -> DateTime<Local> {
        self.end_date
    }

    /// Name of the broadcasting station.
    pub fn broadcaster_name(&self) -> &str {
        &self.broadcaster_name
    }

    /// Reserves a one-time recording of this program.
    ///
    /// Drives the per-program reservation UI and interprets the site's
    /// confirmation text: a message matching the "already reserved" pattern
    /// resolves as success, anything else fails with
    /// [`Error::ReservationRejected`] carrying the site's own words.
    pub async fn record_once(&self) -> Result<()> {
        info!("Reserving recording for {:?}", self.title);

        self.driver
            .navigate(&self.url)
            .await
            .map_err(Error::Reservation)?;
        capture_diagnostic(self.driver.as_ref(), &self.options, "reserve-open").await;

        let opened = self
            .driver
            .evaluate(OPEN_DETAIL_SCRIPT, Value::Null)
            .await
            .map_err(Error::Reservation)?;
        if opened != Value::Bool(true) {
            return Err(Error::Reservation(BrowserError::ElementNotFound(
                "reservation detail button".into(),
            )));
        }

        // The detail panel animates open with no completion event.
        tokio::time::sleep(Duration::from_millis(self.options.delays.reserve_settle_ms)).await;

        let confirmed = self
            .driver
            .evaluate(CONFIRM_RESERVE_SCRIPT, Value::Null)
            .await
            .map_err(Error::Reservation)?;
        if confirmed != Value::Bool(true) {
            return Err(Error::Reservation(BrowserError::ElementNotFound(
                "confirm control in the reservation section".into(),
            )));
        }

        self.driver
            .wait_for_selector(
                &CONFIG.result_selector,
                self.options.delays.selector_timeout_ms,
            )
            .await
            .map_err(Error::Reservation)?;
        capture_diagnostic(self.driver.as_ref(), &self.options, "reserve-result").await;

        let result = self
            .driver
            .evaluate(READ_RESULT_SCRIPT, Value::Null)
            .await
            .map_err(Error::Reservation)?;

        let text = match result {
            Value::String(text) => text,
            _ => {
                return Err(Error::Reservation(BrowserError::ElementNotFound(
                    CONFIG.result_selector.clone(),
                )))
            }
        };

        debug!("Reservation confirmation text: {}", text);
        if text.contains(&CONFIG.success_text) {
            info!("Reservation confirmed for {:?}", self.title);
            Ok(())
        } else {
            Err(Error::ReservationRejected(text))
        }
    }
}

impl fmt::Debug for ScheduleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleItem")
            .field("title", &self.title)
            .field("url", &self.url)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("broadcaster_name", &self.broadcaster_name)
            .finish()
    }
}
