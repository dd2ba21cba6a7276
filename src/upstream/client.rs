//! Outbound HTTP client with the credential injected.

use std::sync::Arc;

use axum::http::{header, Method, StatusCode};
use url::Url;

use crate::config::ProxyConfig;

/// The slice of an upstream response the proxy passes through.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

/// Client for the Airtable REST API.
///
/// Sends exactly two headers upstream: the bearer token from config and
/// `Content-Type: application/json`. Inbound headers are never
/// forwarded.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    config: Arc<ProxyConfig>,
}

impl UpstreamClient {
    pub fn new(config: Arc<ProxyConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send one request upstream and read the full response body as
    /// text.
    ///
    /// Upstream 4xx/5xx are not errors here; only transport failures
    /// (DNS, connect, body read) are.
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let mut req = self
            .client
            .request(method, url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.token),
            )
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        let body = response.text().await?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
