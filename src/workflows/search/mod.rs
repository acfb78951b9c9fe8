use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::core::config::{ClientOptions, BASE_URL};
use crate::core::error::{Error, Result};
use crate::core::models::{RawScheduleRecord, ScheduleFilter};
use crate::core::session::SessionData;
use crate::core::time::TimeProvider;
use crate::infrastructure::browser::BrowserDriver;
use crate::schedule::date::parse_broadcast_range;
use crate::schedule::ScheduleItem;
use crate::workflows::capture_diagnostic;

pub mod constants;
use constants::{
    CONFIG, EXPAND_DETAIL_SCRIPT, EXTRACT_RESULTS_SCRIPT, FILL_KEYWORD_SCRIPT,
    RECONCILE_CHANNELS_SCRIPT, SUBMIT_SEARCH_SCRIPT,
};

/// Runs a schedule search against an authenticated browser context and
/// parses the result listing.
///
/// The filter must already be validated. Driver faults surface as
/// [`Error::Search`]; controls that fail to appear surface as
/// [`Error::PageStructure`]. The markup is assumed stable, so a missing
/// control signals incompatibility rather than a transient condition and is
/// not retried.
pub(crate) async fn run(
    driver: &Arc<dyn BrowserDriver>,
    options: &Arc<ClientOptions>,
    time: &dyn TimeProvider,
    session: &SessionData,
    filter: &ScheduleFilter,
) -> Result<Vec<ScheduleItem>> {
    let delays = &options.delays;

    // Re-injecting the stored session is idempotent and keeps the context
    // authenticated even when it was freshly created.
    driver
        .set_cookies(&session.to_browser_cookies(BASE_URL))
        .await
        .map_err(Error::Search)?;

    info!("Searching schedules for keyword {:?}", filter.keyword);
    driver.navigate(BASE_URL).await.map_err(Error::Search)?;
    driver
        .wait_for_selector(&CONFIG.basic_input_selector, delays.selector_timeout_ms)
        .await
        .map_err(|e| Error::PageStructure(format!("basic search control did not appear: {}", e)))?;

    let expanded = driver
        .evaluate(EXPAND_DETAIL_SCRIPT, Value::Null)
        .await
        .map_err(Error::Search)?;
    if expanded != Value::Bool(true) {
        return Err(Error::PageStructure(
            "advanced search toggle is missing".into(),
        ));
    }
    driver
        .wait_for_selector(&CONFIG.detail_panel_selector, delays.selector_timeout_ms)
        .await
        .map_err(|e| Error::PageStructure(format!("advanced search panel did not open: {}", e)))?;

    let filled = driver
        .evaluate(FILL_KEYWORD_SCRIPT, json!(filter.keyword))
        .await
        .map_err(Error::Search)?;
    if filled != Value::Bool(true) {
        return Err(Error::PageStructure("keyword field is missing".into()));
    }

    if let Some(labels) = filter.channel_labels() {
        let toggled = driver
            .evaluate(RECONCILE_CHANNELS_SCRIPT, json!(labels))
            .await
            .map_err(Error::Search)?;
        debug!("Toggled off channel checkboxes: {}", toggled);
    }

    // The filter UI keeps reconciling for a moment; the submit control is
    // only reliably clickable after it settles.
    tokio::time::sleep(Duration::from_millis(delays.filter_settle_ms)).await;

    let submitted = driver
        .evaluate(SUBMIT_SEARCH_SCRIPT, Value::Null)
        .await
        .map_err(Error::Search)?;
    if submitted != Value::Bool(true) {
        return Err(Error::PageStructure(
            "search submit control is missing".into(),
        ));
    }

    // No completion event for the result listing either.
    tokio::time::sleep(Duration::from_millis(delays.results_wait_ms)).await;
    capture_diagnostic(driver.as_ref(), options, "search-results").await;

    let raw = driver
        .evaluate(EXTRACT_RESULTS_SCRIPT, Value::Null)
        .await
        .map_err(Error::Search)?;
    let records: Vec<RawScheduleRecord> = serde_json::from_value(raw)
        .map_err(|e| Error::PageStructure(format!("result listing had unexpected shape: {}", e)))?;

    let now = time.now();
    let mut items = Vec::with_capacity(records.len());
    for record in records {
        // Nodes without a title are non-program UI artifacts.
        if record.title.is_empty() {
            debug!("Skipping untitled result node");
            continue;
        }
        // Nodes whose time text does not parse are not program entries.
        let Some((start_date, end_date)) = parse_broadcast_range(&record.date_text, now) else {
            debug!(
                "Skipping result node with unparseable time text {:?}",
                record.date_text
            );
            continue;
        };
        items.push(ScheduleItem::new(
            driver.clone(),
            options.clone(),
            record.title,
            &record.url,
            start_date,
            end_date,
            record.broadcaster_name,
        ));
    }

    info!(
        "Search for {:?} returned {} program(s)",
        filter.keyword,
        items.len()
    );
    Ok(items)
}
