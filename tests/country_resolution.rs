//! Integration tests for country resolution and URL validation
//!
//! Exercises the public library API the way a host request handler would.

use geo_redirect::{is_safe_url, CountryCode, CountryResolver, Diagnostics, Environment, HeaderIndex};

fn resolve(pairs: &[(&str, &str)]) -> String {
    let headers = HeaderIndex::from_pairs(pairs.iter().copied());
    CountryResolver::new(Diagnostics::default())
        .resolve(&headers)
        .to_string()
}

/// Exact header values are uppercased
#[test]
fn test_exact_header_case_normalization() {
    assert_eq!(resolve(&[("x-vercel-ip-country", "us")]), "US");
}

/// Substring-matching header is used when no exact name exists
#[test]
fn test_substring_header_fallback() {
    assert_eq!(resolve(&[("x-custom-vercel-country-code", "de")]), "DE");
}

/// Cloudflare header is the last provider tried
#[test]
fn test_cloudflare_fallback() {
    assert_eq!(resolve(&[("cf-ipcountry", "fr")]), "FR");
}

/// No geo headers at all yields the sentinel
#[test]
fn test_no_headers_sentinel() {
    assert_eq!(resolve(&[]), "XX");
    assert_eq!(resolve(&[("accept-language", "en-US")]), "XX");
}

/// Exact match outranks Cloudflare
#[test]
fn test_priority_ordering() {
    assert_eq!(
        resolve(&[("cf-ipcountry", "FR"), ("X-Vercel-IPCountry", "it")]),
        "IT"
    );
}

/// A provider that literally sends XX is treated as a valid code
#[test]
fn test_literal_xx_stops_the_chain() {
    let headers = HeaderIndex::from_pairs([("x-vercel-ip-country", "xx"), ("cf-ipcountry", "FR")]);
    let detection = CountryResolver::default().detect(&headers);
    assert_eq!(detection.country, CountryCode::UNKNOWN);
    assert!(detection.is_detected());
}

/// Resolution is stable across concurrent callers
#[tokio::test]
async fn test_concurrent_resolution_is_idempotent() {
    let headers = std::sync::Arc::new(HeaderIndex::from_pairs([
        ("x-zz-vercel-country", "nl"),
        ("x-aa-vercel-country", "be"),
    ]));
    let resolver = CountryResolver::default();

    let tasks = (0..32).map(|_| {
        let headers = headers.clone();
        tokio::spawn(async move { resolver.resolve(&headers) })
    });

    let results = futures::future::join_all(tasks).await;
    for result in results {
        assert_eq!(result.unwrap().as_str(), "BE");
    }
}

/// Redirect target policy table
#[test]
fn test_url_safety_table() {
    let cases = [
        ("https://example.com/path", Environment::Development, true),
        ("javascript:alert(1)", Environment::Development, false),
        ("javascript:alert(1)", Environment::Production, false),
        ("http://10.0.0.5", Environment::Production, false),
        ("http://10.0.0.5", Environment::Development, true),
        ("#", Environment::Development, false),
        ("#", Environment::Production, false),
        ("not a url", Environment::Development, false),
        ("not a url", Environment::Production, false),
    ];

    for (url, mode, expected) in cases {
        assert_eq!(is_safe_url(url, mode), expected, "{} in {}", url, mode);
    }
}
