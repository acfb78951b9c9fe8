use chrono::Local;
use tracing::warn;

use crate::core::config::ClientOptions;
use crate::infrastructure::browser::BrowserDriver;

pub mod login;
pub mod search;

/// Drops a diagnostic screenshot when a screenshot directory is configured.
/// Best-effort: failures are logged and never fail the workflow.
pub(crate) async fn capture_diagnostic(
    driver: &dyn BrowserDriver,
    options: &ClientOptions,
    label: &str,
) {
    let Some(dir) = &options.screenshot_dir else {
        return;
    };
    let path = dir.join(format!(
        "{}-{}.png",
        Local::now().format("%Y%m%d-%H%M%S"),
        label
    ));
    if let Err(e) = driver.screenshot(&path.to_string_lossy()).await {
        warn!("Failed to capture diagnostic screenshot {:?}: {}", path, e);
    }
}
