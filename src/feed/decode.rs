//! Decoding feed payloads into validated alerts.

use tracing::warn;

use crate::types::{Alert, FeedUrl};

use super::error::FeedError;

/// A decoded feed payload.
#[derive(Debug, Default)]
pub struct FeedPayload {
    /// Alerts that passed validation.
    pub alerts: Vec<Alert>,
    /// Number of records that were dropped because they failed validation.
    pub rejected: usize,
}

/// Decodes a feed body.
///
/// The body must be a JSON array. Each element is validated on its own: an
/// element with an unknown status, message type or scope, or with a bad
/// category/response type count, is logged and skipped while the rest of the
/// payload is kept.
pub fn decode_feed(url: &FeedUrl, body: &[u8]) -> Result<FeedPayload, FeedError> {
    let records: Vec<serde_json::Value> =
        serde_json::from_slice(body).map_err(|source| FeedError::Decode {
            url: url.clone(),
            source,
        })?;

    let mut payload = FeedPayload {
        alerts: Vec::with_capacity(records.len()),
        rejected: 0,
    };

    for (index, record) in records.into_iter().enumerate() {
        match Alert::from_feed_value(record) {
            Ok(alert) => payload.alerts.push(alert),
            Err(e) => {
                warn!(url = %url, index, error = %e, "Rejecting alert");
                payload.rejected += 1;
            }
        }
    }

    Ok(payload)
}
