//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → request.rs (attach request ID)
//!     → server.rs (CORS decision, preflight, routing, body buffering)
//!     → upstream call (credential injected)
//!     → verbatim status/content-type/body passthrough to the client
//! ```

pub mod cors;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::HttpServer;
