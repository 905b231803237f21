//! HTTP server for the alert relay.
//!
//! This module implements the HTTP server that:
//! - Upgrades subscriber connections to WebSockets and runs a session on each
//! - Provides an alert inspection endpoint for observability
//! - Provides health checks for liveness probes
//!
//! # Endpoints
//!
//! - `GET /coords` - WebSocket subscription (send coordinates, receive alerts)
//! - `GET /api/v1/alerts` - Returns held alerts as JSON, optionally filtered by
//!   `latitude` and `longitude`
//! - `GET /health` - Returns 200 if server is running

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::store::AlertStore;

pub mod alerts;
pub mod health;
pub mod ws;

pub use alerts::alerts_handler;
pub use health::health_handler;
pub use ws::coords_handler;

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<AlertStore>,

    /// Parent of every session's cancellation token.
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(store: Arc<AlertStore>, shutdown: CancellationToken) -> Self {
        AppState {
            inner: Arc::new(AppStateInner { store, shutdown }),
        }
    }

    pub fn store(&self) -> &Arc<AlertStore> {
        &self.inner.store
    }

    pub fn shutdown(&self) -> &CancellationToken {
        &self.inner.shutdown
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::get;

    axum::Router::new()
        .route("/coords", get(coords_handler))
        .route("/api/v1/alerts", get(alerts_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
