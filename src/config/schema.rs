//! Configuration schema definitions.

use url::Url;

/// Immutable process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Airtable bearer token, injected into every upstream request.
    pub token: String,

    /// Airtable base identifier.
    pub base_id: String,

    /// Table name (path-escaped when composing the base URL).
    pub table_name: String,

    /// Listening port.
    pub port: u16,

    /// Derived upstream collection URL:
    /// `<api-url>/v0/<base-id>/<escaped-table-name>`.
    pub upstream_base: Url,

    /// Optional Prometheus exporter address (e.g. "127.0.0.1:9090").
    pub metrics_address: Option<String>,
}
