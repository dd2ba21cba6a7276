//! CORS origin allow-list.
//!
//! # Responsibilities
//! - Decide the `Access-Control-Allow-Origin` value for a request
//! - Emit the fixed allowed-methods and allowed-headers values
//!
//! # Design Decisions
//! - Ordered list of matcher variants, first match wins
//! - A matching origin is echoed back; anything else gets `*`

use axum::http::header::{self, HeaderMap, HeaderValue};

/// One entry in the origin allow-list.
#[derive(Debug, Clone)]
pub enum OriginRule {
    /// Exact, case-sensitive origin match.
    Exact(&'static str),
    /// `https://<label>.<domain>` where `<label>` is a single label of
    /// ASCII alphanumerics or hyphens.
    Subdomain(&'static str),
}

impl OriginRule {
    fn matches(&self, origin: &str) -> bool {
        match self {
            OriginRule::Exact(expected) => origin == *expected,
            OriginRule::Subdomain(domain) => {
                let Some(rest) = origin.strip_prefix("https://") else {
                    return false;
                };
                let Some(label) = rest
                    .strip_suffix(domain)
                    .and_then(|s| s.strip_suffix('.'))
                else {
                    return false;
                };
                !label.is_empty()
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            }
        }
    }
}

/// Local development origins plus the static hosting domains the
/// frontend deploys to.
const ALLOWED_ORIGINS: &[OriginRule] = &[
    OriginRule::Exact("http://localhost:3000"),
    OriginRule::Exact("http://127.0.0.1:3000"),
    OriginRule::Exact("http://localhost:5000"),
    OriginRule::Exact("http://localhost:8080"),
    OriginRule::Subdomain("github.io"),
    OriginRule::Subdomain("github.pages.dev"),
];

/// Compute the CORS response headers for a request origin.
pub fn cors_headers(origin: Option<&str>) -> HeaderMap {
    let allow_origin = origin
        .filter(|o| ALLOWED_ORIGINS.iter().any(|rule| rule.matches(o)))
        .unwrap_or("*");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_str(allow_origin).unwrap_or_else(|_| HeaderValue::from_static("*")),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PATCH, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_origin(origin: Option<&str>) -> String {
        cors_headers(origin)
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_exact_origin_is_echoed() {
        assert_eq!(
            allow_origin(Some("http://localhost:3000")),
            "http://localhost:3000"
        );
        assert_eq!(
            allow_origin(Some("http://127.0.0.1:3000")),
            "http://127.0.0.1:3000"
        );
    }

    #[test]
    fn test_subdomain_origin_is_echoed() {
        assert_eq!(
            allow_origin(Some("https://my-app.github.io")),
            "https://my-app.github.io"
        );
        assert_eq!(
            allow_origin(Some("https://preview1.github.pages.dev")),
            "https://preview1.github.pages.dev"
        );
    }

    #[test]
    fn test_non_matching_origin_gets_wildcard() {
        assert_eq!(allow_origin(Some("https://evil.example.com")), "*");
        // Wrong scheme
        assert_eq!(allow_origin(Some("http://my-app.github.io")), "*");
        // Nested label
        assert_eq!(allow_origin(Some("https://a.b.github.io")), "*");
        // Bare domain, no label
        assert_eq!(allow_origin(Some("https://github.io")), "*");
        assert_eq!(allow_origin(None), "*");
    }

    #[test]
    fn test_fixed_headers_always_present() {
        let headers = cors_headers(None);
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, PATCH, DELETE, OPTIONS"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "Content-Type"
        );
    }
}
