//! The periodic polling loop.
//!
//! # Pass Flow
//!
//! 1. Acquire the store lock and clear the area index
//! 2. For each configured feed: fetch, decode, `update_source`
//! 3. If any feed reported new alerts, wake every subscriber
//! 4. Release the lock and wait for the next tick
//!
//! A feed that fails to fetch, decode or parse is logged and skipped; it keeps
//! its previous alerts and the pass continues with the next feed. Its areas
//! were cleared with the rest of the index, so its alerts match no location
//! until a later pass refreshes it.

use std::sync::Arc;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::feed::FeedClient;
use crate::store::{AlertStore, NotifyOutcome};

use super::config::PollConfig;

/// Summary of one polling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Feeds whose snapshot was replaced.
    pub refreshed: usize,
    /// Feeds that kept their previous snapshot because of an error.
    pub failed: usize,
    /// Whether any refreshed feed published a new alert identifier.
    pub changed: bool,
    /// Broadcast result, present only when `changed` is true.
    pub notified: Option<NotifyOutcome>,
}

/// Refreshes the store from the configured feeds.
pub struct Poller<C> {
    client: C,
    store: Arc<AlertStore>,
    config: PollConfig,
}

impl<C: FeedClient> Poller<C> {
    pub fn new(client: C, store: Arc<AlertStore>, config: PollConfig) -> Self {
        Poller {
            client,
            store,
            config,
        }
    }

    /// Runs one polling pass across all feeds under a single lock acquisition.
    pub async fn run_pass(&self) -> PassReport {
        let mut report = PassReport::default();
        let mut state = self.store.lock().await;
        state.clear_areas();

        for url in &self.config.feed_urls {
            let payload = match self.client.fetch(url).await {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(url = %url, error = %e, "Feed update failed, keeping previous snapshot");
                    report.failed += 1;
                    continue;
                }
            };

            let alerts = payload.alerts.len();
            match state.update_source(url, payload.alerts) {
                Ok(changed) => {
                    debug!(url = %url, alerts, changed, "Feed refreshed");
                    report.refreshed += 1;
                    report.changed |= changed;
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Feed update failed, keeping previous snapshot");
                    report.failed += 1;
                }
            }
        }

        if report.changed {
            let outcome = state.notify_all();
            info!(
                delivered = outcome.delivered,
                coalesced = outcome.coalesced,
                pruned = outcome.pruned,
                "Notified subscribers of new alerts"
            );
            report.notified = Some(outcome);
        }

        debug!(
            sources = state.source_count(),
            alerts = state.alert_count(),
            subscribers = state.subscriber_count(),
            "Store state after pass"
        );

        report
    }

    /// Runs polling passes until `shutdown` is cancelled.
    ///
    /// The first pass starts immediately. A pass that overruns the interval
    /// delays the following ticks instead of bursting to catch up.
    ///
    /// Cancellation also interrupts a pass in progress, which would otherwise
    /// hold the store lock for up to one HTTP timeout per feed. The interrupted
    /// pass keeps the feeds it already refreshed and notifies nobody.
    #[instrument(skip(self, shutdown), fields(feeds = self.config.feed_urls.len()))]
    pub async fn run(self, shutdown: CancellationToken) {
        info!(interval = ?self.config.poll_interval, "Poller started");

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown signal received, stopping poller");
                    break;
                }

                _ = ticker.tick() => {
                    tokio::select! {
                        _ = shutdown.cancelled() => {
                            info!("Shutdown signal received during pass, abandoning it");
                            break;
                        }

                        report = self.run_pass() => {
                            info!(
                                refreshed = report.refreshed,
                                failed = report.failed,
                                changed = report.changed,
                                "Polling pass finished"
                            );
                        }
                    }
                }
            }
        }

        info!("Poller stopped");
    }
}
