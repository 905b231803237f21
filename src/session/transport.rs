//! The duplex connection a session runs over.

use std::future::Future;

/// One inbound message from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
    /// Ping/pong and other frames that carry no coordinate.
    Control,
    /// The client asked to close the connection.
    Close,
}

/// A bidirectional message transport, e.g. a WebSocket.
///
/// `recv` must be cancel-safe: the session races it against store
/// notifications and drops it when a notification wins.
pub trait SessionTransport: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Waits for the next inbound frame. `None` means the stream has ended.
    fn recv(&mut self) -> impl Future<Output = Option<Result<Frame, Self::Error>>> + Send;

    /// Sends one text message to the client.
    fn send_text(&mut self, text: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Closes the connection.
    fn close(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
