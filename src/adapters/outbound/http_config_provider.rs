//! HTTP Config Provider
//!
//! Implements ConfigProvider by fetching a JSON document over HTTP.

use crate::domain::entities::RedirectConfig;
use crate::domain::ports::{ConfigError, ConfigProvider};
use async_trait::async_trait;
use std::time::Duration;

/// Fetches the redirect configuration from a remote URL.
pub struct HttpConfigProvider {
    url: String,
    client: reqwest::Client,
}

impl HttpConfigProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl ConfigProvider for HttpConfigProvider {
    async fn load(&self) -> Result<RedirectConfig, ConfigError> {
        let resp = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ConfigError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(transport_error)?;
        let config: RedirectConfig = serde_json::from_str(&body)?;
        tracing::debug!(url = %self.url, redirects = config.redirects.len(), "fetched config");
        Ok(config)
    }

    fn describe(&self) -> String {
        format!("url:{}", self.url)
    }
}

fn transport_error(err: reqwest::Error) -> ConfigError {
    ConfigError::Http(err.to_string())
}
