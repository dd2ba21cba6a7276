//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables
//!     → loader.rs (read & validate, once at startup)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Missing required values are fatal before the listener binds
//! - The upstream base URL is derived once, not per request

pub mod loader;
pub mod schema;

pub use loader::{load_from_env, ConfigError};
pub use schema::ProxyConfig;
