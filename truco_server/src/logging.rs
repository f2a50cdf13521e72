//! Structured logging configuration.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable. Store actions log
/// under the `truco` target; rejected requests show up at `debug`.
pub const DEFAULT_FILTER: &str = "info,truco=info,truco_server=info,hyper=warn,tower_http=warn";

/// Build the event filter from an optional `RUST_LOG`-style directive string
///
/// Falls back to [`DEFAULT_FILTER`] when `directives` is missing, blank or
/// does not parse.
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging
///
/// Records emitted through the `log` facade (as the `truco` crate does) are
/// routed into the same subscriber.
///
/// # Example
///
/// ```no_run
/// use truco_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let directives = std::env::var("RUST_LOG").ok();
    let filter = build_filter(directives.as_deref());
    let active = filter.to_string();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_target(true))
        .init();

    tracing::info!(filter = %active, "Logging initialized");
}

/// Log a rejected store action with structured fields
pub fn log_rejected_action(action: &str, game_id: Option<&str>, reason: &str) {
    tracing::debug!(action, game_id, reason, "Store action rejected");
}
