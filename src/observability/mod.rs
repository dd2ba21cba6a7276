//! Observability subsystem.
//!
//! Structured logging is initialized in `main` (tracing-subscriber with
//! an env filter); per-request spans come from `TraceLayer`. This
//! module carries the metrics side.

pub mod metrics;
