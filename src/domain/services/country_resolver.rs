//! Country Resolver - Domain service
//!
//! Derives the visitor's country from edge-injected headers. Edge platforms
//! are inconsistent about header casing, so several spellings are tried
//! before falling back to a substring scan and then to Cloudflare.

use crate::domain::entities::Detection;
use crate::domain::headers::HeaderIndex;
use crate::domain::value_objects::{CountryCode, DetectionStage, Diagnostics};

/// Known Vercel header spellings, in priority order.
pub const VERCEL_COUNTRY_HEADERS: [&str; 5] = [
    "x-vercel-ip-country",
    "X-Vercel-Ip-Country",
    "X-VERCEL-IP-COUNTRY",
    "x-vercel-ipcountry",
    "X-Vercel-IPCountry",
];

/// Cloudflare's country header.
pub const CLOUDFLARE_COUNTRY_HEADER: &str = "cf-ipcountry";

/// A single lookup step of the detection chain.
pub type LookupStrategy = fn(&HeaderIndex) -> Option<Detection>;

/// Detection chain, evaluated in order; the first hit wins.
const STRATEGIES: [(DetectionStage, LookupStrategy); 3] = [
    (DetectionStage::ExactHeader, exact_header),
    (DetectionStage::FuzzyScan, fuzzy_scan),
    (DetectionStage::SecondaryProvider, secondary_provider),
];

/// Stateless country resolver.
///
/// Never fails: when no header yields a valid alpha-2 code the sentinel
/// [`CountryCode::UNKNOWN`] is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryResolver {
    diagnostics: Diagnostics,
}

impl CountryResolver {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self { diagnostics }
    }

    /// Resolve the visitor's country code.
    pub fn resolve(&self, headers: &HeaderIndex) -> CountryCode {
        self.detect(headers).country
    }

    /// Run the detection chain and report which stage matched.
    pub fn detect(&self, headers: &HeaderIndex) -> Detection {
        for (stage, strategy) in STRATEGIES {
            match strategy(headers) {
                Some(detection) => {
                    if self.diagnostics.verbose {
                        tracing::debug!(
                            stage = %stage,
                            header = detection.source_header.as_deref().unwrap_or_default(),
                            country = %detection.country,
                            "country detected"
                        );
                    }
                    return detection;
                }
                None => {
                    if self.diagnostics.verbose {
                        tracing::debug!(stage = %stage, "no valid country at stage");
                    }
                }
            }
        }

        tracing::warn!(
            available_headers = ?headers.names().collect::<Vec<_>>(),
            "country not detected, using {}",
            CountryCode::UNKNOWN
        );
        Detection::undetected()
    }
}

/// Names of the headers that look geo-related, for debug output.
pub fn geo_header_names(headers: &HeaderIndex) -> Vec<String> {
    headers
        .names()
        .filter(|name| {
            let lower = name.to_lowercase();
            lower.contains("country") || lower.contains("geo") || lower.starts_with("cf-ip")
        })
        .map(str::to_string)
        .collect()
}

fn first_valid(values: &[String]) -> Option<CountryCode> {
    values.iter().find_map(|v| CountryCode::parse(v))
}

/// Try the raw header stored under `name` first, then every other casing.
fn lookup(headers: &HeaderIndex, name: &str, stage: DetectionStage) -> Option<Detection> {
    if let Some(code) = first_valid(headers.get_exact(name)) {
        return Some(Detection::new(code, stage, name));
    }
    headers
        .matching(name)
        .find_map(|(raw, values)| first_valid(values).map(|code| Detection::new(code, stage, raw)))
}

fn exact_header(headers: &HeaderIndex) -> Option<Detection> {
    VERCEL_COUNTRY_HEADERS
        .iter()
        .find_map(|name| lookup(headers, name, DetectionStage::ExactHeader))
}

fn fuzzy_scan(headers: &HeaderIndex) -> Option<Detection> {
    headers
        .iter()
        .filter(|(name, _)| {
            let lower = name.to_lowercase();
            lower.contains("vercel") && lower.contains("country")
        })
        .find_map(|(name, values)| {
            first_valid(values).map(|code| Detection::new(code, DetectionStage::FuzzyScan, name))
        })
}

fn secondary_provider(headers: &HeaderIndex) -> Option<Detection> {
    lookup(
        headers,
        CLOUDFLARE_COUNTRY_HEADER,
        DetectionStage::SecondaryProvider,
    )
}
