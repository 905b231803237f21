//! Periodic feed polling.
//!
//! One long-running task refreshes every configured feed per tick, applies the
//! results to the store under a single lock acquisition, and wakes subscribers
//! when a feed published an alert it did not list before.
//!
//! # Module Structure
//!
//! - [`config`]: interval and feed list
//! - [`task`]: the pass and the loop around it

mod config;
mod task;

pub use config::{DEFAULT_FEED_URLS, PollConfig};
pub use task::{PassReport, Poller};
