//! Configuration loading from the environment.

use std::env;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default Airtable endpoint. Overridable via `AIRTABLE_API_URL`
/// (mirrors the endpoint override Airtable's own clients expose).
pub const DEFAULT_API_URL: &str = "https://api.airtable.com";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),

    #[error("invalid upstream API URL {0:?}")]
    InvalidApiUrl(String),
}

/// Load and validate configuration from the environment.
pub fn load_from_env() -> Result<ProxyConfig, ConfigError> {
    let token = required("AIRTABLE_TOKEN")?;
    let base_id = required("AIRTABLE_BASE_ID")?;
    let table_name = required("AIRTABLE_TABLE_NAME")?;

    let port = match env::var("PORT") {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
        Err(_) => DEFAULT_PORT,
    };

    let api_url = env::var("AIRTABLE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let upstream_base = build_base_url(&api_url, &base_id, &table_name)?;

    let metrics_address = env::var("METRICS_ADDRESS").ok();

    Ok(ProxyConfig {
        token,
        base_id,
        table_name,
        port,
        upstream_base,
        metrics_address,
    })
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

/// Compose `<api-url>/v0/<base-id>/<table-name>`, path-escaping each
/// segment (table names may contain spaces or unicode).
pub fn build_base_url(
    api_url: &str,
    base_id: &str,
    table_name: &str,
) -> Result<Url, ConfigError> {
    let mut base =
        Url::parse(api_url).map_err(|_| ConfigError::InvalidApiUrl(api_url.to_string()))?;
    base.path_segments_mut()
        .map_err(|_| ConfigError::InvalidApiUrl(api_url.to_string()))?
        .pop_if_empty()
        .extend(["v0", base_id, table_name]);
    Ok(base)
}
