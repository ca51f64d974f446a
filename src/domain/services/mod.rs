mod country_resolver;
mod url_safety;

pub use country_resolver::{
    geo_header_names, CountryResolver, LookupStrategy, CLOUDFLARE_COUNTRY_HEADER,
    VERCEL_COUNTRY_HEADERS,
};
pub use url_safety::{is_safe_url, UrlSafetyValidator};
