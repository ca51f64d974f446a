//! Geo Service - Main application use case
//!
//! Ties country detection to the redirect configuration: detects the
//! visitor's country and picks a destination that passes URL validation.

use crate::domain::entities::{Detection, RedirectConfig};
use crate::domain::headers::HeaderIndex;
use crate::domain::ports::ConfigProvider;
use crate::domain::services::{CountryResolver, UrlSafetyValidator};
use crate::domain::value_objects::{CountryCode, Diagnostics, Environment};

/// Load the redirect config, substituting the hardcoded default on failure.
pub async fn load_or_default(provider: &dyn ConfigProvider) -> RedirectConfig {
    match provider.load().await {
        Ok(config) => {
            tracing::info!(
                source = %provider.describe(),
                redirects = config.redirects.len(),
                flags = config.flags.len(),
                "redirect config loaded"
            );
            config.normalized()
        }
        Err(e) => {
            tracing::warn!(
                source = %provider.describe(),
                error = %e,
                "failed to load redirect config, using defaults"
            );
            RedirectConfig::default()
        }
    }
}

/// Geo service - main application use case.
///
/// Immutable after construction; share it behind an `Arc`.
pub struct GeoService {
    resolver: CountryResolver,
    validator: UrlSafetyValidator,
    config: RedirectConfig,
    environment: Environment,
    diagnostics: Diagnostics,
}

impl GeoService {
    pub fn new(config: RedirectConfig, environment: Environment, diagnostics: Diagnostics) -> Self {
        Self {
            resolver: CountryResolver::new(diagnostics),
            validator: UrlSafetyValidator::new(environment),
            config,
            environment,
            diagnostics,
        }
    }

    /// Build the service from a config provider, falling back to defaults.
    pub async fn from_provider(
        provider: &dyn ConfigProvider,
        environment: Environment,
        diagnostics: Diagnostics,
    ) -> Self {
        let config = load_or_default(provider).await;
        Self::new(config, environment, diagnostics)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn validator(&self) -> &UrlSafetyValidator {
        &self.validator
    }

    /// Detect the visitor's country.
    ///
    /// Returns the sentinel without inspecting headers when country
    /// detection is switched off in the settings.
    pub fn detect(&self, headers: &HeaderIndex) -> Detection {
        if !self.config.settings.country_detection {
            tracing::debug!("country detection disabled by settings");
            return Detection::undetected();
        }
        self.resolver.detect(headers)
    }

    /// Pick a safe redirect destination.
    ///
    /// Order: caller-supplied override, the country's entry, then `DEFAULT`.
    /// Each candidate must pass URL validation.
    pub fn destination_for(
        &self,
        country: &CountryCode,
        override_url: Option<&str>,
    ) -> Option<String> {
        let candidates = [
            ("override", override_url),
            ("country", self.config.redirect_for(country)),
            ("default", self.config.default_redirect()),
        ];

        for (kind, candidate) in candidates {
            let Some(url) = candidate else {
                continue;
            };
            if self.validator.is_safe(url) {
                tracing::debug!(%country, kind, url, "redirect destination selected");
                return Some(url.to_string());
            }
            tracing::warn!(%country, kind, url, "skipping unsafe redirect destination");
        }

        tracing::warn!(%country, "no safe redirect destination");
        None
    }

    /// Safe flag image URL for `country`.
    pub fn flag_for(&self, country: &CountryCode) -> Option<String> {
        self.config
            .flag_for(country)
            .filter(|url| self.validator.is_safe(url))
            .map(str::to_string)
    }

    /// The loaded config with every unsafe URL removed.
    pub fn public_config(&self) -> RedirectConfig {
        self.config.retain_safe(|url| self.validator.is_safe(url))
    }
}
