//! Upstream alert feeds.
//!
//! Each configured URL answers a GET with a JSON array of alerts. This module
//! fetches such payloads and validates every record before it reaches the store.
//!
//! # Module Structure
//!
//! - [`client`]: the `FeedClient` seam and the reqwest implementation
//! - [`decode`]: payload decoding and per-alert validation
//! - [`error`]: fetch and decode errors

mod client;
mod decode;
mod error;

pub use client::{DEFAULT_HTTP_TIMEOUT, FeedClient, HttpFeedClient};
pub use decode::{FeedPayload, decode_feed};
pub use error::FeedError;
