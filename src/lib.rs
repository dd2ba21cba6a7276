//! Airtable records proxy library.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
