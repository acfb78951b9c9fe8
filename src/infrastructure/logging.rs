use anyhow::Result;
use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct LocalTime;

impl tracing_subscriber::fmt::time::FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

/// Installs the global tracing subscriber: `RUST_LOG`-filtered (default
/// `info`), mirrored to stdout and to a daily rolling file under `logs/`.
///
/// Call at most once per process; embedding applications that install their
/// own subscriber should skip this entirely.
pub fn init_logging(service_name: &str) -> Result<()> {
    let file_name = format!("{}.log", service_name);
    let file_appender = tracing_appender::rolling::daily("logs", file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the writer on drop; the subscriber is global, so the
    // guard must live for the rest of the process.
    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_timer(LocalTime),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_timer(LocalTime),
        )
        .init();

    Ok(())
}
