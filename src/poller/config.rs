//! Polling configuration.
//!
//! The poller refreshes every configured feed once per interval. There is no
//! retry or backoff beyond waiting for the next tick, and missed ticks are not
//! caught up.
//!
//! - **Poll interval**: 90 seconds by default (`ALERT_RELAY_POLL_INTERVAL_SECS`)
//! - **Feeds**: the public warnung.bund.de feeds by default (`ALERT_RELAY_FEED_URLS`,
//!   comma separated)

use std::time::Duration;

use crate::types::FeedUrl;

/// Default interval between polling passes (90 seconds).
const DEFAULT_POLL_INTERVAL_SECS: u64 = 90;

/// Public feeds of the German federal warning system.
pub const DEFAULT_FEED_URLS: [&str; 4] = [
    // MoWaS: civil protection announcements
    "https://warnung.bund.de/bbk.mowas/gefahrendurchsagen.json",
    // BIWAPP: municipal warnings
    "https://warnung.bund.de/bbk.biwapp/warnmeldungen.json",
    // DWD: severe weather
    "https://warnung.bund.de/bbk.dwd/unwetter.json",
    // LHP: flood reports
    "https://warnung.bund.de/bbk.lhp/hochwassermeldungen.json",
];

/// Configuration for the polling loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Interval between the starts of two polling passes.
    pub poll_interval: Duration,

    /// Feeds refreshed on every pass, in order.
    pub feed_urls: Vec<FeedUrl>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PollConfig {
    /// Creates a new `PollConfig` with default values.
    pub fn new() -> Self {
        PollConfig {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            feed_urls: DEFAULT_FEED_URLS.iter().map(|u| FeedUrl::from(*u)).collect(),
        }
    }

    /// Reads the polling variables through `lookup`.
    ///
    /// Unset or unparseable values fall back to the defaults. A feed list that
    /// is empty after trimming also falls back.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::new();

        let poll_interval = lookup("ALERT_RELAY_POLL_INTERVAL_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.poll_interval);

        let feed_urls = lookup("ALERT_RELAY_FEED_URLS")
            .map(|s| parse_feed_list(&s))
            .filter(|urls| !urls.is_empty())
            .unwrap_or(defaults.feed_urls);

        PollConfig {
            poll_interval,
            feed_urls,
        }
    }
}

fn parse_feed_list(s: &str) -> Vec<FeedUrl> {
    s.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(FeedUrl::from)
        .collect()
}
