//! Logging Setup
//!
//! Installs the fmt subscriber. Outside production the sink stays a no-op
//! unless logging was explicitly enabled.

use crate::config::AppConfig;
use tracing_subscriber::fmt::format::FmtSpan;

/// Whether a log sink should be installed for `cfg`.
pub fn logging_enabled(cfg: &AppConfig) -> bool {
    cfg.environment.is_production() || cfg.log_enabled
}

/// Install the global subscriber.
///
/// Returns false when logging is disabled for this environment or a
/// subscriber was already installed.
pub fn init_logging(cfg: &AppConfig) -> bool {
    if !logging_enabled(cfg) {
        return false;
    }

    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .try_init()
        .is_ok()
}
