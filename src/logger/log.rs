use crate::logger::severity::LogSeverity;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default `info` filter.
/// Calling it twice is harmless; the second install is ignored.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Emits `msg` at the tracing level matching `log_severity`.
/// Fatal has no tracing counterpart and is reported as an error with a `fatal` marker.
pub fn log(msg: String, log_severity: LogSeverity) {
    match log_severity {
        LogSeverity::Debug => tracing::debug!("{}", msg),
        LogSeverity::Info => tracing::info!("{}", msg),
        LogSeverity::Warning => tracing::warn!("{}", msg),
        LogSeverity::Error => tracing::error!("{}", msg),
        LogSeverity::Fatal => tracing::error!(fatal = true, "{}", msg),
    }
}
