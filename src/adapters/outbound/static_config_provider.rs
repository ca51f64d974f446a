//! Static Config Provider
//!
//! Hands back a fixed configuration. Used when no source is configured
//! and in tests.

use crate::domain::entities::RedirectConfig;
use crate::domain::ports::{ConfigError, ConfigProvider};
use async_trait::async_trait;

pub struct StaticConfigProvider {
    config: RedirectConfig,
}

impl StaticConfigProvider {
    pub fn new(config: RedirectConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ConfigProvider for StaticConfigProvider {
    async fn load(&self) -> Result<RedirectConfig, ConfigError> {
        Ok(self.config.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}
