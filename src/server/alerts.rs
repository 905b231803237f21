//! Alert inspection endpoint.
//!
//! Provides a read-only view of the store: every held alert, or only those
//! whose areas contain a given coordinate.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use thiserror::Error;

use super::AppState;
use crate::geometry::Location;
use crate::types::Alert;

/// Query parameters of `GET /api/v1/alerts`.
#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AlertsQuery {
    /// The point to filter by, if both coordinates were given.
    fn location(&self) -> Result<Option<Location>, AlertsQueryError> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Some(Location::new(latitude, longitude))),
            (None, None) => Ok(None),
            _ => Err(AlertsQueryError::PartialCoordinate),
        }
    }
}

/// Errors that can occur when querying alerts.
#[derive(Debug, Error)]
pub enum AlertsQueryError {
    /// Only one of `latitude` and `longitude` was given.
    #[error("latitude and longitude must be given together")]
    PartialCoordinate,
}

impl IntoResponse for AlertsQueryError {
    fn into_response(self) -> Response {
        let status = match &self {
            AlertsQueryError::PartialCoordinate => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

/// Alert listing handler.
///
/// # Query Parameters
///
/// - `latitude`, `longitude` - optional; when both are present only alerts
///   whose areas contain the point are returned
///
/// # Response
///
/// - 200 OK with a JSON array of alerts
/// - 400 Bad Request if only one coordinate is given
///
/// # Example
///
/// ```ignore
/// GET /api/v1/alerts?latitude=51.05&longitude=13.74 HTTP/1.1
///
/// HTTP/1.1 200 OK
/// Content-Type: application/json
///
/// [{"identifier": "mow.DE-BY-A-W083-20201014-000", ...}]
/// ```
pub async fn alerts_handler(
    State(app_state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Result<Json<Vec<Alert>>, AlertsQueryError> {
    let alerts = match query.location()? {
        Some(point) => app_state.store().matching_alerts(point).await,
        None => app_state.store().all_alerts().await,
    };

    tracing::debug!(
        latitude = query.latitude,
        longitude = query.longitude,
        count = alerts.len(),
        "Alerts query served"
    );

    Ok(Json(alerts))
}
