//! HTTP server setup and the request forwarder.
//!
//! # Responsibilities
//! - Create the Axum router with catch-all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - CORS negotiation and OPTIONS preflight short-circuit
//! - Path routing and body buffering for create/update
//! - Forward to the upstream and pass the response through verbatim

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::cors::cors_headers;
use crate::http::request::{request_id_middleware, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::{match_path, RecordRoute};
use crate::upstream::{build_upstream_url, UpstreamClient};

/// Maximum buffered request body size (1 MiB).
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Total inbound request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: UpstreamClient,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let config = Arc::new(config);
        let upstream = UpstreamClient::new(config.clone());
        let state = AppState { config, upstream };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(forward_handler))
            .route("/{*path}", any(forward_handler))
            .with_state(state)
            .layer(middleware::from_fn(request_id_middleware))
            // 408s synthesized by this layer bypass the handler: they
            // carry no CORS headers and are not counted in metrics.
            .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Main forward handler.
///
/// Stateless per request: CORS decision, preflight, routing, body
/// buffering, upstream call, verbatim passthrough.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();
    let method_str = method.to_string();

    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let cors = cors_headers(origin.as_deref());

    // Preflight short-circuit: no routing at all.
    if method == Method::OPTIONS {
        return respond(
            StatusCode::NO_CONTENT,
            cors,
            None,
            Body::empty(),
            &method_str,
            start_time,
        );
    }

    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_owned);

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Forwarding request"
    );

    let route = match match_path(&path) {
        Some(route) => route,
        None => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            return error_response(
                StatusCode::NOT_FOUND,
                "Not found. Use /api/records or /api/records/{id}",
                cors,
                &method_str,
                start_time,
            );
        }
    };

    // Buffer and parse the body for create/update methods only. An
    // empty body means no outbound body; malformed JSON fails the
    // request instead of reaching the upstream.
    let body = if method == Method::POST || method == Method::PATCH {
        let bytes = match axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "failed to read request body",
                    cors,
                    &method_str,
                    start_time,
                );
            }
        };
        if bytes.is_empty() {
            None
        } else {
            match serde_json::from_slice::<serde_json::Value>(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(request_id = %request_id, error = %e, "Malformed JSON body");
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        &format!("invalid JSON body: {e}"),
                        cors,
                        &method_str,
                        start_time,
                    );
                }
            }
        }
    } else {
        None
    };

    let url = build_upstream_url(&state.config.upstream_base, &route, query.as_deref(), &method);

    match state.upstream.send(method, url, body.as_ref()).await {
        Ok(upstream) => {
            tracing::debug!(
                request_id = %request_id,
                status = %upstream.status,
                "Upstream responded"
            );
            respond(
                upstream.status,
                cors,
                Some(&upstream.content_type),
                Body::from(upstream.body),
                &method_str,
                start_time,
            )
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream request failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                cors,
                &method_str,
                start_time,
            )
        }
    }
}

/// Write one response: CORS headers, optional content type, body.
fn respond(
    status: StatusCode,
    mut headers: HeaderMap,
    content_type: Option<&str>,
    body: Body,
    method: &str,
    start_time: Instant,
) -> Response {
    if let Some(ct) = content_type {
        let value = HeaderValue::from_str(ct)
            .unwrap_or_else(|_| HeaderValue::from_static("application/json"));
        headers.insert(header::CONTENT_TYPE, value);
    }
    metrics::record_request(method, status.as_u16(), start_time);
    (status, headers, body).into_response()
}

/// JSON `{"error": "..."}` response with CORS headers attached.
fn error_response(
    status: StatusCode,
    message: &str,
    headers: HeaderMap,
    method: &str,
    start_time: Instant,
) -> Response {
    let body = serde_json::to_string(&ErrorBody { error: message })
        .unwrap_or_else(|_| String::from(r#"{"error":"internal"}"#));
    respond(
        status,
        headers,
        Some("application/json"),
        Body::from(body),
        method,
        start_time,
    )
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
