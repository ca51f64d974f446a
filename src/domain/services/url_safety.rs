//! URL Safety Validator - Domain service
//!
//! Screens redirect destinations before they are followed. Only absolute
//! http(s) URLs with a host pass; in production, loopback and private-looking
//! hosts are rejected as well.

use crate::domain::value_objects::Environment;
use url::Url;

/// Literal placeholder used by config authors for "no link".
const PLACEHOLDER: &str = "#";

/// Host prefixes rejected in production.
///
/// This is a coarse string-prefix blocklist, not a CIDR match: domain names
/// such as `10.example.com` are rejected too, while `10x.example.com` is not.
const BLOCKED_HOST_PREFIXES: [&str; 3] = ["192.168.", "10.", "172."];

const BLOCKED_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Validator bound to the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlSafetyValidator {
    mode: Environment,
}

impl UrlSafetyValidator {
    pub fn new(mode: Environment) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Environment {
        self.mode
    }

    /// Whether `url` may be used as a redirect target.
    pub fn is_safe(&self, url: &str) -> bool {
        let safe = is_safe_url(url, self.mode);
        if !safe {
            tracing::debug!(url, mode = %self.mode, "rejected unsafe url");
        }
        safe
    }
}

/// Check `url` against the redirect policy for `mode`.
///
/// # Examples
/// ```
/// use geo_redirect::{is_safe_url, Environment};
///
/// assert!(is_safe_url("https://example.com/path", Environment::Development));
/// assert!(!is_safe_url("javascript:alert(1)", Environment::Production));
/// assert!(!is_safe_url("http://10.0.0.5", Environment::Production));
/// ```
pub fn is_safe_url(url: &str, mode: Environment) -> bool {
    if url.is_empty() || url == PLACEHOLDER {
        return false;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_lowercase(),
        _ => return false,
    };

    if mode.is_production() && is_private_host(&host) {
        return false;
    }

    true
}

fn is_private_host(host: &str) -> bool {
    BLOCKED_HOSTS.contains(&host) || BLOCKED_HOST_PREFIXES.iter().any(|p| host.starts_with(p))
}
