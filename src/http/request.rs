//! Request correlation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Echo the ID on every response for log correlation
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied ID is preserved, never overwritten

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Ensure every request carries an `x-request-id` and echo it on the
/// response.
pub async fn request_id_middleware(mut req: Request<Body>, next: Next) -> Response {
    let id = match req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
    {
        Some(existing) => existing.to_string(),
        None => {
            let generated = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&generated) {
                req.headers_mut().insert(X_REQUEST_ID, value);
            }
            generated
        }
    };

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}
