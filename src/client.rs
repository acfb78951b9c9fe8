use std::sync::Arc;

use crate::core::config::ClientOptions;
use crate::core::error::{Error, Result};
use crate::core::models::ScheduleFilter;
use crate::core::session::SessionData;
use crate::core::time::{SystemTimeProvider, TimeProvider};
use crate::infrastructure::browser::BrowserDriver;
use crate::schedule::ScheduleItem;
use crate::workflows;

/// Client for the DiMORA TV-recording reservation portal.
///
/// The browser context behind `driver` is an explicitly owned, sequential
/// resource: only one workflow call (a search, or a reservation on one of
/// the returned items) may be in flight against a given client at a time,
/// and the caller releases the context by closing the driver it passed in.
/// Independent clients with their own drivers run fully in parallel.
///
/// Authenticated workflows need a [`SessionData`] obtained out-of-band via
/// [`crate::workflows::login::LoginChallenger`].
pub struct DimoraClient {
    driver: Arc<dyn BrowserDriver>,
    options: Arc<ClientOptions>,
    time: Arc<dyn TimeProvider>,
    session: Option<SessionData>,
}

impl DimoraClient {
    /// Builds a client from an optional serialized session blob.
    ///
    /// Fails with [`Error::Session`] when the blob does not parse.
    pub fn new(
        driver: Arc<dyn BrowserDriver>,
        session_data: Option<&str>,
        options: ClientOptions,
    ) -> Result<Self> {
        let session = session_data.map(SessionData::from_json).transpose()?;
        Ok(Self {
            driver,
            options: Arc::new(options),
            time: Arc::new(SystemTimeProvider),
            session,
        })
    }

    /// Replaces the clock used to date parsed schedules. Intended for tests.
    pub fn with_time_provider(mut self, time: Arc<dyn TimeProvider>) -> Self {
        self.time = time;
        self
    }

    /// The loaded session, if any.
    pub fn session(&self) -> Option<&SessionData> {
        self.session.as_ref()
    }

    /// Searches broadcast schedules matching the filter.
    ///
    /// Returns the parsed program entries in the site's own order; zero
    /// matches is an empty list, not an error. Never returns a truncated
    /// list: any step failing fails the whole call.
    pub async fn search(&self, filter: &ScheduleFilter) -> Result<Vec<ScheduleItem>> {
        filter.validate()?;
        let session = self.session.as_ref().ok_or(Error::NotInitialized(
            "no session data is loaded; complete the login challenge first",
        ))?;
        workflows::search::run(&self.driver, &self.options, self.time.as_ref(), session, filter)
            .await
    }
}
