//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize, Serializer};

/// ISO 3166-1 alpha-2 country code.
///
/// A `CountryCode` always holds two ASCII uppercase letters. The sentinel
/// [`CountryCode::UNKNOWN`] (`XX`) means the country could not be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Sentinel for "undetected".
    pub const UNKNOWN: CountryCode = CountryCode(*b"XX");

    /// Normalize and validate a raw header value.
    ///
    /// The value is trimmed and uppercased; anything that is not exactly
    /// two ASCII letters afterwards is rejected.
    ///
    /// # Examples
    /// ```
    /// use geo_redirect::CountryCode;
    ///
    /// assert_eq!(CountryCode::parse(" us ").unwrap().as_str(), "US");
    /// assert!(CountryCode::parse("en-US").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_uppercase();
        match normalized.as_bytes() {
            [a, b] if a.is_ascii_uppercase() && b.is_ascii_uppercase() => Some(Self([*a, *b])),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII uppercase by construction.
        std::str::from_utf8(&self.0).unwrap_or("XX")
    }

    /// Whether this is the "undetected" sentinel.
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Deployment mode of the running process.
///
/// Only `Production` changes validation policy; `Development` additionally
/// exposes error details in 500 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Development,
    Test,
}

impl Environment {
    /// Parse an environment name, falling back to `Development`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which step of the header fallback chain produced a country code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStage {
    /// One of the well-known Vercel header spellings
    ExactHeader,
    /// Any header whose name mentions both "vercel" and "country"
    FuzzyScan,
    /// Cloudflare's `cf-ipcountry`
    SecondaryProvider,
}

impl DetectionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactHeader => "exact_header",
            Self::FuzzyScan => "fuzzy_scan",
            Self::SecondaryProvider => "secondary_provider",
        }
    }
}

impl std::fmt::Display for DetectionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide diagnostic switches.
///
/// Set once at startup from the environment and injected into the
/// components that log or expose debug payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Emit per-stage detection events
    pub verbose: bool,
    /// Allow a request to opt into the debug payload
    pub debug_payload: bool,
}

impl Diagnostics {
    pub fn new(verbose: bool, debug_payload: bool) -> Self {
        Self {
            verbose,
            debug_payload,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    // ===== CountryCode::parse Tests =====

    #[test]
    fn test_country_parse_normalizes_case_and_whitespace() {
        let tests = vec![("us", "US"), ("De", "DE"), ("  fr\t", "FR"), ("JP", "JP")];

        for (input, expected) in tests {
            assert_eq!(
                CountryCode::parse(input).map(|c| c.to_string()),
                Some(expected.to_string()),
                "Failed for input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_country_parse_trim_and_uppercase_commute() {
        for input in ["\n br \r", "\u{a0}mx", " ß ", "\tu s", "  "] {
            let upper_first = input.to_uppercase().trim().to_string();
            let trim_first = input.trim().to_uppercase();
            assert_eq!(upper_first, trim_first, "input: {:?}", input);
            assert_eq!(
                CountryCode::parse(input),
                CountryCode::parse(&upper_first),
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_country_parse_rejects_malformed() {
        let invalid_inputs = vec!["", " ", "usa", "1X", "U", "en-US", "U S", "ü", "é1", "__"];

        for input in invalid_inputs {
            assert!(
                CountryCode::parse(input).is_none(),
                "Should reject input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_country_parse_accepts_literal_xx() {
        let code = CountryCode::parse("xx").unwrap();
        assert_eq!(code, CountryCode::UNKNOWN);
        assert!(code.is_unknown());
    }

    #[test]
    fn test_country_default_is_unknown() {
        assert_eq!(CountryCode::default().as_str(), "XX");
    }

    #[test]
    fn test_country_serializes_as_string() {
        let code = CountryCode::parse("br").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"BR\"");
    }

    // ===== Environment Tests =====

    #[test]
    fn test_environment_from_str() {
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("PROD"), Environment::Production);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("staging"), Environment::Development);
        assert_eq!(Environment::from_str(""), Environment::Development);
    }

    #[test]
    fn test_environment_predicates() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Test.is_production());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_detection_stage_display() {
        assert_eq!(DetectionStage::ExactHeader.to_string(), "exact_header");
        assert_eq!(DetectionStage::FuzzyScan.to_string(), "fuzzy_scan");
        assert_eq!(
            DetectionStage::SecondaryProvider.to_string(),
            "secondary_provider"
        );
    }
}
