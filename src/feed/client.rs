//! Feed client trait and HTTP implementation.
//!
//! The [`FeedClient`] trait is the seam between the poller and the network:
//! the poller only needs "give me the alerts currently published at this URL".
//! [`HttpFeedClient`] implements it with `reqwest`; tests use in-memory clients.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::types::FeedUrl;

use super::decode::{FeedPayload, decode_feed};
use super::error::FeedError;

/// Default HTTP timeout for a single feed request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on a feed body: 32 MiB.
const MAX_FEED_RESPONSE_SIZE: usize = 32 * 1024 * 1024;

/// Fetches and decodes the alerts currently published by a feed.
pub trait FeedClient: Send + Sync {
    fn fetch(&self, url: &FeedUrl) -> impl Future<Output = Result<FeedPayload, FeedError>> + Send;
}

/// Feed client using plain HTTP GET requests.
///
/// Holds a reusable `reqwest::Client` so connections to the same host are pooled
/// across polling passes.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    http: reqwest::Client,
    max_body_size: usize,
}

impl HttpFeedClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("alert-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            max_body_size: MAX_FEED_RESPONSE_SIZE,
        })
    }

    #[cfg(test)]
    fn with_max_body_size(mut self, max: usize) -> Self {
        self.max_body_size = max;
        self
    }

    async fn fetch_body(&self, url: &FeedUrl) -> Result<Vec<u8>, FeedError> {
        let http_error = |e: reqwest::Error| FeedError::Http {
            url: url.clone(),
            message: e.to_string(),
        };

        let mut response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(http_error)?;

        if !response.status().is_success() {
            return Err(FeedError::Status {
                url: url.clone(),
                status: response.status().as_u16(),
            });
        }

        let content_length: usize = response
            .content_length()
            .unwrap_or(0)
            .try_into()
            .unwrap_or(usize::MAX);
        if content_length > self.max_body_size {
            return Err(FeedError::TooLarge {
                url: url.clone(),
                size: content_length,
                max: self.max_body_size,
            });
        }

        // Content-Length may be absent or wrong, so the cap is enforced per chunk too.
        let mut body = Vec::with_capacity(content_length);
        while let Some(chunk) = response.chunk().await.map_err(http_error)? {
            if body.len() + chunk.len() > self.max_body_size {
                return Err(FeedError::TooLarge {
                    url: url.clone(),
                    size: body.len() + chunk.len(),
                    max: self.max_body_size,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

impl FeedClient for HttpFeedClient {
    async fn fetch(&self, url: &FeedUrl) -> Result<FeedPayload, FeedError> {
        let body = self.fetch_body(url).await?;
        let payload = decode_feed(url, &body)?;

        debug!(
            url = %url,
            bytes = body.len(),
            alerts = payload.alerts.len(),
            rejected = payload.rejected,
            "Feed fetched"
        );

        Ok(payload)
    }
}
