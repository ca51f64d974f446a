//! geo-redirect Library
//!
//! Country detection from edge headers and redirect target validation,
//! exposed for the binary and for integration tests.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{load_or_default, GeoService};
pub use config::{load_config, AppConfig};
pub use domain::entities::{Detection, RedirectConfig};
pub use domain::headers::HeaderIndex;
pub use domain::ports::{ConfigError, ConfigProvider};
pub use domain::services::{is_safe_url, CountryResolver, UrlSafetyValidator};
pub use domain::value_objects::{CountryCode, DetectionStage, Diagnostics, Environment};
