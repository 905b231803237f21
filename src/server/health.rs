//! Liveness endpoint.
//!
//! Answers as long as the HTTP server accepts connections. It does not look at
//! the store, so a relay whose feeds are all failing still reports healthy.

use axum::http::StatusCode;

/// Returns 200 OK with the body `OK`.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
