//! WebSocket endpoint for live subscriptions.
//!
//! `GET /coords` upgrades to a WebSocket and hands it to
//! [`run_session`]. The client sends `{"latitude": .., "longitude": ..}`
//! objects and receives a JSON array of matching alerts after every
//! coordinate and after every store change.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tracing::debug;

use super::AppState;
use crate::session::{Frame, SessionTransport, run_session};

impl SessionTransport for WebSocket {
    type Error = axum::Error;

    async fn recv(&mut self) -> Option<Result<Frame, axum::Error>> {
        let message = WebSocket::recv(self).await?;
        Some(message.map(|message| match message {
            Message::Text(text) => Frame::Text(text.as_str().to_owned()),
            Message::Binary(bytes) => Frame::Binary(bytes.to_vec()),
            Message::Ping(_) | Message::Pong(_) => Frame::Control,
            Message::Close(_) => Frame::Close,
        }))
    }

    async fn send_text(&mut self, text: String) -> Result<(), axum::Error> {
        self.send(Message::Text(text.into())).await
    }

    async fn close(mut self) -> Result<(), axum::Error> {
        self.send(Message::Close(None)).await
    }
}

/// WebSocket upgrade handler.
///
/// Each session gets a child of the server's shutdown token so that shutting
/// down the relay ends every open session.
pub async fn coords_handler(State(app_state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let store = Arc::clone(app_state.store());
    let cancel = app_state.shutdown().child_token();

    ws.on_upgrade(move |socket| async move {
        if let Err(e) = run_session(store, socket, cancel).await {
            debug!(error = %e, "WebSocket session failed");
        }
    })
}
