//! Feed fetch and decode errors.

use thiserror::Error;

use crate::types::FeedUrl;

/// Errors that can occur when fetching a feed.
///
/// All of them are recoverable: the poller logs them, keeps the feed's
/// previous snapshot and tries again on the next tick.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request could not be sent or the body could not be read.
    #[error("fetching {url} failed: {message}")]
    Http { url: FeedUrl, message: String },

    /// The feed answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: FeedUrl, status: u16 },

    /// The body exceeds the size cap.
    #[error("{url} response too large: {size} bytes (max {max} bytes)")]
    TooLarge { url: FeedUrl, size: usize, max: usize },

    /// The body is not a JSON array.
    #[error("{url} returned an invalid payload: {source}")]
    Decode {
        url: FeedUrl,
        #[source]
        source: serde_json::Error,
    },
}

impl FeedError {
    pub fn url(&self) -> &FeedUrl {
        match self {
            FeedError::Http { url, .. }
            | FeedError::Status { url, .. }
            | FeedError::TooLarge { url, .. }
            | FeedError::Decode { url, .. } => url,
        }
    }
}
