//! Config Provider Port
//!
//! Defines the interface for loading the redirect configuration.

use crate::domain::entities::RedirectConfig;
use async_trait::async_trait;

/// Failure while loading a redirect configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Transport failure reported by the HTTP client (connect, timeout, body read).
    #[error("failed to fetch config: {0}")]
    Http(String),
    #[error("config endpoint returned status {0}")]
    Status(u16),
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of the redirect configuration.
///
/// This is an outbound port; implementations may read a local file,
/// fetch a remote document, or hand back a fixed value.
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Load the configuration.
    async fn load(&self) -> Result<RedirectConfig, ConfigError>;

    /// Short description used in log lines.
    fn describe(&self) -> String;
}
