//! API route definitions.

mod command;

use axum::Router;
use axum::extract::Request;
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::any;
use restis_core::parse::RESERVED_QUERY_KEY;
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::auth::require_auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Build the complete gateway router.
///
/// # Route Structure
///
/// - `/` - Single command, body is a JSON array: `["SET", "k", "v"]`
/// - `/pipeline` - Batch of commands, body is a JSON array of arrays
/// - `/{command}/{args..}` - Anything else is a path/query command,
///   e.g. `/SET/k/v?EX=100`
///
/// Every route accepts GET, POST, PUT and HEAD and requires a Bearer token.
/// Other methods are rejected with 405 before authentication.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(command::single))
        .route("/pipeline", any(command::pipeline))
        .fallback(command::path)
        // Auth middleware
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        // Method filter, runs before auth
        .layer(middleware::from_fn(allow_methods))
        .with_state(state)
}

/// Build the router with the request tracing layer, as served by the binary.
///
/// The `http_request` span records the query string with any `_token` value
/// redacted.
pub fn app(state: AppState) -> Router {
    router(state).layer(TraceLayer::new_for_http().make_span_with(
        |request: &Request<_>| {
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                query = %redact_query(request.uri().query().unwrap_or(""))
            )
        },
    ))
}

/// Replace the value of every `_token` pair in `query`.
fn redact_query(query: &str) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((RESERVED_QUERY_KEY, _)) => format!("{RESERVED_QUERY_KEY}=<redacted>"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Methods the gateway serves.
const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::HEAD];

/// Reject methods the gateway does not serve.
async fn allow_methods(request: Request, next: Next) -> Result<Response, ApiError> {
    if !ALLOWED_METHODS.contains(request.method()) {
        tracing::warn!(method = %request.method(), "method not allowed");
        return Err(ApiError::MethodNotAllowed);
    }

    Ok(next.run(request).await)
}
