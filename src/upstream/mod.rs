//! Upstream Airtable interface.
//!
//! # Data Flow
//! ```text
//! matched route + inbound query
//!     → build_upstream_url (record-id suffix, records[] re-encoding)
//!     → client.rs (credential injected, body attached, full read)
//!     → UpstreamResponse { status, content_type, body }
//! ```
//!
//! # Design Decisions
//! - Upstream 4xx/5xx are pass-through data, not proxy errors
//! - The response body is read fully as text and never re-serialized
//! - No retry and no outbound timeout; a hung upstream holds only its
//!   own request

pub mod client;

pub use client::{UpstreamClient, UpstreamResponse};

use axum::http::Method;
use url::{form_urlencoded, Url};

use crate::routing::RecordRoute;

/// Query key selecting records for a batch delete.
pub const RECORDS_KEY: &str = "records[]";

/// Build the outbound URL for one request.
///
/// Record routes get the id appended as a path segment, for any
/// method. The id arrives percent-encoded from the request path and is
/// appended verbatim, never re-escaped. A collection `DELETE` carries
/// any `records[]` query values over, re-encoded under the same
/// repeated key; with none present the bare collection URL is
/// forwarded as-is. Everything else hits the bare collection URL
/// (inbound query strings are dropped).
pub fn build_upstream_url(
    base: &Url,
    route: &RecordRoute,
    query: Option<&str>,
    method: &Method,
) -> Url {
    let mut url = base.clone();
    match route {
        RecordRoute::Record(id) => {
            // set_path preserves existing percent-encoding; pushing
            // through path_segments_mut would escape the `%` itself.
            let mut path = url.path().trim_end_matches('/').to_string();
            path.push('/');
            path.push_str(id);
            url.set_path(&path);
        }
        RecordRoute::Collection => {
            if *method == Method::DELETE {
                let ids = record_ids(query);
                if !ids.is_empty() {
                    let pairs: Vec<String> = ids
                        .iter()
                        .map(|id| {
                            let encoded: String =
                                form_urlencoded::byte_serialize(id.as_bytes()).collect();
                            format!("{RECORDS_KEY}={encoded}")
                        })
                        .collect();
                    url.set_query(Some(&pairs.join("&")));
                }
            }
        }
    }
    url
}

/// Decode the `records[]` values from an inbound query string.
fn record_ids(query: Option<&str>) -> Vec<String> {
    let Some(query) = query else {
        return Vec::new();
    };
    form_urlencoded::parse(query.as_bytes())
        .filter_map(|(key, value)| (key == RECORDS_KEY).then(|| value.into_owned()))
        .collect()
}
