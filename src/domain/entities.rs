//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the redirect domain.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::{CountryCode, DetectionStage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the fallback entry in `redirects`.
pub const DEFAULT_REDIRECT_KEY: &str = "DEFAULT";

/// Outcome of running the country detection chain once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Detected code, or the sentinel when nothing matched
    pub country: CountryCode,
    /// Stage that produced the code (None for the sentinel)
    pub stage: Option<DetectionStage>,
    /// Raw name of the header that produced the code
    pub source_header: Option<String>,
}

impl Detection {
    pub fn new(country: CountryCode, stage: DetectionStage, source_header: &str) -> Self {
        Self {
            country,
            stage: Some(stage),
            source_header: Some(source_header.to_string()),
        }
    }

    /// Detection that found nothing.
    pub fn undetected() -> Self {
        Self {
            country: CountryCode::UNKNOWN,
            stage: None,
            source_header: None,
        }
    }

    pub fn is_detected(&self) -> bool {
        self.stage.is_some()
    }
}

/// Redirect configuration supplied by a [`ConfigProvider`].
///
/// [`ConfigProvider`]: crate::domain::ports::ConfigProvider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectConfig {
    /// Country code (or `DEFAULT`) -> destination URL
    #[serde(default)]
    pub redirects: BTreeMap<String, String>,
    /// Country code -> flag image URL
    #[serde(default)]
    pub flags: BTreeMap<String, String>,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub settings: Settings,
}

impl RedirectConfig {
    /// Destination configured for `country`, without validation.
    pub fn redirect_for(&self, country: &CountryCode) -> Option<&str> {
        self.redirects.get(country.as_str()).map(String::as_str)
    }

    /// Destination configured under `DEFAULT`, without validation.
    pub fn default_redirect(&self) -> Option<&str> {
        self.redirects.get(DEFAULT_REDIRECT_KEY).map(String::as_str)
    }

    pub fn flag_for(&self, country: &CountryCode) -> Option<&str> {
        self.flags.get(country.as_str()).map(String::as_str)
    }

    /// Copy of this config keeping only the URLs accepted by `is_safe`.
    pub fn retain_safe<F>(&self, is_safe: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let keep = |map: &BTreeMap<String, String>| -> BTreeMap<String, String> {
            map.iter()
                .filter(|(_, url)| is_safe(url))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        };

        Self {
            redirects: keep(&self.redirects),
            flags: keep(&self.flags),
            counter: self.counter.clone(),
            settings: self.settings.clone(),
        }
    }

    /// Clamp settings into a usable shape.
    pub fn normalized(mut self) -> Self {
        let s = &mut self.settings;
        if s.wait_time_min_ms > s.wait_time_max_ms {
            std::mem::swap(&mut s.wait_time_min_ms, &mut s.wait_time_max_ms);
        }
        s.vpn_detection.threshold = s.vpn_detection.threshold.min(100);
        self
    }
}

impl Default for RedirectConfig {
    /// Hardcoded fallback used whenever the configured source cannot be loaded.
    fn default() -> Self {
        let mut redirects = BTreeMap::new();
        redirects.insert(
            DEFAULT_REDIRECT_KEY.to_string(),
            "https://example.com".to_string(),
        );

        Self {
            redirects,
            flags: BTreeMap::new(),
            counter: CounterConfig::default(),
            settings: Settings::default(),
        }
    }
}

/// Visitor counter shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CounterConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub initial: u64,
}

/// Timing and detection toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Lower bound of the randomized wait before redirecting
    pub wait_time_min_ms: u64,
    /// Upper bound of the randomized wait before redirecting
    pub wait_time_max_ms: u64,
    /// When false, the country chain is skipped and `XX` is used
    pub country_detection: bool,
    pub vpn_detection: VpnDetection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wait_time_min_ms: 1500,
            wait_time_max_ms: 3000,
            country_detection: true,
            vpn_detection: VpnDetection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VpnDetection {
    pub enabled: bool,
    /// Score (0-100) above which a visitor is treated as proxied
    pub threshold: u8,
}

impl Default for VpnDetection {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 60,
        }
    }
}
