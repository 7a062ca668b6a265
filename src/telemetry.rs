use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Initialize structured logging on stderr.
///
/// `RUST_LOG` takes precedence over the configured level. Stdout is left to
/// the console screens.
pub fn init_telemetry(settings: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if settings.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    tracing::debug!(level = %settings.log_level, json = settings.json, "Telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for one console session
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping everything a user does in one console run
pub fn create_session_span(session_id: &str, user_id: &str, role: &str) -> tracing::Span {
    tracing::info_span!(
        "console_session",
        session.id = session_id,
        user.id = user_id,
        role = role,
    )
}

/// Shutdown telemetry gracefully
pub fn shutdown_telemetry() {
    // The fmt layer writes synchronously, nothing to flush
    tracing::debug!("rackops telemetry shutdown complete");
}
