//! Running one client session.
//!
//! A single task multiplexes the three things a session waits on: the next
//! inbound frame, a store-changed notification, and cancellation. Because
//! reading and pushing happen in the same task, the push side has stopped by
//! the time the loop exits, and the transport is only closed after the
//! subscriber has been unregistered.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::geometry::Location;
use crate::store::{AlertStore, Subscription};

use super::state::{SessionEvent, SessionState};
use super::transport::{Frame, SessionTransport};

/// Why a session ended normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client closed the connection or the stream ended.
    ClientClosed,
    /// The cancellation token fired.
    Cancelled,
    /// The subscriber was removed from the registry by someone else.
    Unsubscribed,
}

/// Errors that end a session. They never affect other sessions or the store.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The client sent something that is not a coordinate object.
    #[error("undecodable coordinate message: {0}")]
    Decode(#[source] serde_json::Error),

    /// The matching alerts could not be serialized.
    #[error("encoding alerts failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Reading from or writing to the connection failed.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Runs a session until the client leaves, errs, or `cancel` fires.
///
/// Registers with the store on entry. On exit, whatever the reason, the
/// subscriber is unregistered and then the transport is closed.
#[instrument(skip_all)]
pub async fn run_session<T: SessionTransport>(
    store: Arc<AlertStore>,
    mut transport: T,
    cancel: CancellationToken,
) -> Result<SessionEnd, SessionError> {
    let mut subscription = store.subscribe().await;
    let id = subscription.id();
    info!(subscriber = %id, "Session started");

    let result = drive(&store, &mut transport, &mut subscription, &cancel).await;

    store.unsubscribe(id).await;
    if let Err(e) = transport.close().await {
        debug!(subscriber = %id, error = %e, "Closing transport failed");
    }

    match &result {
        Ok(end) => info!(subscriber = %id, ?end, "Session ended"),
        Err(e) => warn!(subscriber = %id, error = %e, "Session ended with error"),
    }
    result
}

async fn drive<T: SessionTransport>(
    store: &AlertStore,
    transport: &mut T,
    subscription: &mut Subscription,
    cancel: &CancellationToken,
) -> Result<SessionEnd, SessionError> {
    let mut state = SessionState::default();

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => return Ok(SessionEnd::Cancelled),

            frame = transport.recv() => match frame {
                None | Some(Ok(Frame::Close)) => return Ok(SessionEnd::ClientClosed),
                Some(Err(e)) => return Err(SessionError::Transport(Box::new(e))),
                Some(Ok(Frame::Control)) => continue,
                Some(Ok(Frame::Text(text))) => SessionEvent::Coordinate(decode_location(text.as_bytes())?),
                Some(Ok(Frame::Binary(bytes))) => SessionEvent::Coordinate(decode_location(&bytes)?),
            },

            notified = subscription.notified() => match notified {
                Some(()) => SessionEvent::Notified,
                None => return Ok(SessionEnd::Unsubscribed),
            },
        };

        match state.apply(event) {
            Some(point) => push_matching(store, transport, point).await?,
            None => debug!("Store changed, no coordinate yet"),
        }
    }
}

fn decode_location(bytes: &[u8]) -> Result<Location, SessionError> {
    serde_json::from_slice(bytes).map_err(SessionError::Decode)
}

async fn push_matching<T: SessionTransport>(
    store: &AlertStore,
    transport: &mut T,
    point: Location,
) -> Result<(), SessionError> {
    let alerts = store.matching_alerts(point).await;
    let text = serde_json::to_string(&alerts).map_err(SessionError::Encode)?;

    debug!(location = %point, alerts = alerts.len(), "Pushing matching alerts");
    transport
        .send_text(text)
        .await
        .map_err(|e| SessionError::Transport(Box::new(e)))
}
