//! Error reporting to Sentry.
//!
//! Initialized once at process start from `SENTRY_URL`. While the returned
//! guard is alive, panics and `error` tracing events (see
//! [`crate::logging`]) are sent to the DSN. Nothing here ever affects the
//! deployment outcome.

use sentry::types::Dsn;
use sentry::{ClientInitGuard, ClientOptions};

/// Start the Sentry client for `dsn`. `None` or an unparseable DSN leaves
/// reporting disabled. Hold the guard until exit so queued events are flushed.
pub fn init(dsn: Option<&str>) -> Option<ClientInitGuard> {
    let Some(dsn) = dsn else {
        tracing::debug!("error reporting disabled (no SENTRY_URL)");
        return None;
    };
    let Some(options) = client_options(dsn) else {
        tracing::warn!("error reporting disabled: invalid DSN");
        return None;
    };
    let guard = sentry::init(options);
    if guard.is_enabled() {
        tracing::info!("error reporting enabled");
    }
    Some(guard)
}

/// Send a fatal run error. No-op without an active client.
pub fn report_fatal(message: &str) {
    sentry::capture_message(message, sentry::Level::Fatal);
}

fn client_options(dsn: &str) -> Option<ClientOptions> {
    let dsn: Dsn = dsn.trim().parse().ok()?;
    Some(ClientOptions {
        dsn: Some(dsn),
        release: sentry::release_name!(),
        traces_sample_rate: 1.0,
        ..Default::default()
    })
}
