//! Alert Relay - fans public warning alerts out to location-based subscribers.
//!
//! A poller periodically fetches alert feeds into an in-memory store. Clients
//! connect over a WebSocket, report their location, and receive every alert
//! whose area contains it, again whenever a feed publishes something new.
//!
//! # Module Structure
//!
//! - [`types`]: identifiers and the alert data model
//! - [`geometry`]: polygon parsing and point-in-polygon matching
//! - [`store`]: the alert store and subscriber registry
//! - [`feed`]: fetching and validating upstream feeds
//! - [`poller`]: the periodic refresh loop
//! - [`session`]: per-client sessions
//! - [`server`]: the axum HTTP surface
//! - [`config`]: environment configuration

pub mod config;
pub mod feed;
pub mod geometry;
pub mod poller;
pub mod server;
pub mod session;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_utils;
