//! File Config Provider
//!
//! Implements ConfigProvider by reading a JSON document from disk.

use crate::domain::entities::RedirectConfig;
use crate::domain::ports::{ConfigError, ConfigProvider};
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads the redirect configuration from a local JSON file.
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigProvider for FileConfigProvider {
    async fn load(&self) -> Result<RedirectConfig, ConfigError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ConfigError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let config: RedirectConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"redirects": {{"DEFAULT": "https://example.com", "US": "https://us.example.com"}},
                "flags": {{"US": "https://flags.example.com/us.svg"}}}}"#
        )
        .unwrap();

        let provider = FileConfigProvider::new(file.path());
        let cfg = provider.load().await.unwrap();

        assert_eq!(cfg.redirects.len(), 2);
        assert_eq!(cfg.flags.len(), 1);
        assert_eq!(cfg.settings.wait_time_max_ms, 3000);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let provider = FileConfigProvider::new("/nonexistent/redirects.json");
        let err = provider.load().await.unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/redirects.json"));
    }

    #[tokio::test]
    async fn test_bad_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let provider = FileConfigProvider::new(file.path());
        let err = provider.load().await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_describe() {
        let provider = FileConfigProvider::new("config/redirects.json");
        assert_eq!(provider.describe(), "file:config/redirects.json");
    }
}
