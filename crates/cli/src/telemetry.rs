//! Logging and error-reporting setup.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "complaint_desk_cli=info,complaint_desk_db=warn";

/// Telemetry settings read from the environment.
#[derive(Debug, Clone, Default)]
pub struct TelemetrySettings {
    /// Emit JSON log lines instead of human-readable text.
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

impl TelemetrySettings {
    /// Load settings from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            json_logs: lookup("COMPLAINT_DESK_LOG_FORMAT")
                .is_some_and(|format| format.eq_ignore_ascii_case("json")),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
pub fn init_sentry(settings: &TelemetrySettings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: settings
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(settings: &TelemetrySettings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let json_layer = settings.json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!settings.json_logs).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if settings.sentry_dsn.is_some() {
        tracing::debug!("Sentry initialized");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> TelemetrySettings {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        TelemetrySettings::from_lookup(|key| map.get(key).map(|v| (*v).to_owned()))
    }

    #[test]
    fn test_defaults() {
        let settings = load(&[]);
        assert!(!settings.json_logs);
        assert!(settings.sentry_dsn.is_none());
        assert!(settings.sentry_environment.is_none());
    }

    #[test]
    fn test_json_log_format_case_insensitive() {
        assert!(load(&[("COMPLAINT_DESK_LOG_FORMAT", "JSON")]).json_logs);
        assert!(!load(&[("COMPLAINT_DESK_LOG_FORMAT", "text")]).json_logs);
    }

    #[test]
    fn test_blank_sentry_dsn_disables_sentry() {
        let settings = load(&[("SENTRY_DSN", "  ")]);
        assert!(settings.sentry_dsn.is_none());
        assert!(init_sentry(&settings).is_none());
    }

    #[test]
    fn test_default_filter_targets_workspace_crates() {
        assert!(DEFAULT_FILTER.contains("complaint_desk_cli=info"));
        assert!(DEFAULT_FILTER.contains("complaint_desk_db=warn"));
    }
}
