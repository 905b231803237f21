//! The lock-protected contents of the alert store.
//!
//! `StoreState` is only reachable through the guard returned by
//! [`AlertStore::lock`](super::AlertStore::lock), so holding a `&mut StoreState`
//! means holding the store lock.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::geometry::{Area, GeometryError, Location};
use crate::types::{Alert, AlertId, FeedUrl, SubscriberId};

use super::subscribers::{NotifyOutcome, SubscriberRegistry, Subscription};

/// Errors that abort a source update.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// A polygon of one of the incoming alerts does not parse.
    ///
    /// Nothing from the update is applied; the source keeps its previous snapshot.
    #[error("alert {id}: {source}")]
    Polygon {
        id: AlertId,
        #[source]
        source: GeometryError,
    },
}

/// Alerts, their parsed areas and the subscriber set.
#[derive(Debug, Default)]
pub struct StoreState {
    /// Active alerts per feed, keyed by alert identifier.
    alerts: HashMap<FeedUrl, HashMap<AlertId, Alert>>,

    /// Parsed areas keyed by alert identifier, shared by all feeds.
    ///
    /// Cleared at the start of every polling pass and rebuilt by the feeds
    /// refreshed in it. An identifier published by several feeds keeps the
    /// areas of whichever feed was updated last.
    areas: HashMap<AlertId, Vec<Area>>,

    subscribers: SubscriberRegistry,
}

impl StoreState {
    /// Replaces everything held for `source` with `alerts`.
    ///
    /// Returns true if at least one incoming identifier was not present under
    /// `source` before. Alerts that are no longer listed are dropped, but their
    /// disappearance alone does not count as a change.
    ///
    /// The areas of every incoming alert overwrite the index entry for its
    /// identifier. All polygons are parsed before anything is replaced: on the
    /// first parse failure the error is returned and neither the alerts of
    /// `source` nor the area index are touched.
    pub fn update_source(
        &mut self,
        source: &FeedUrl,
        alerts: Vec<Alert>,
    ) -> Result<bool, UpdateError> {
        let mut areas = HashMap::with_capacity(alerts.len());
        for alert in &alerts {
            let parsed = alert
                .polygons()
                .map(Area::parse)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| UpdateError::Polygon {
                    id: alert.identifier.clone(),
                    source,
                })?;
            areas.insert(alert.identifier.clone(), parsed);
        }

        let previous = self.alerts.get(source);
        let changed = alerts
            .iter()
            .any(|alert| previous.is_none_or(|prev| !prev.contains_key(&alert.identifier)));

        let snapshot = alerts
            .into_iter()
            .map(|alert| (alert.identifier.clone(), alert))
            .collect();

        self.alerts.insert(source.clone(), snapshot);
        self.areas.extend(areas);

        Ok(changed)
    }

    /// Drops every parsed area.
    ///
    /// Alerts of feeds that are not refreshed afterwards stay listed by
    /// [`all_alerts`](Self::all_alerts) but no longer match any point.
    pub fn clear_areas(&mut self) {
        self.areas.clear();
    }

    /// Every alert of every feed, in no particular order.
    pub fn all_alerts(&self) -> Vec<Alert> {
        self.alerts
            .values()
            .flat_map(|by_id| by_id.values())
            .cloned()
            .collect()
    }

    /// Alerts with at least one area containing `point`.
    ///
    /// Matching identifiers are collected first, then looked up in every
    /// feed. An identifier published by several feeds therefore yields one
    /// alert per feed that holds it.
    pub fn matching_alerts(&self, point: Location) -> Vec<Alert> {
        let matching: HashSet<&AlertId> = self
            .areas
            .iter()
            .filter(|(_, areas)| areas.iter().any(|area| area.contains(point)))
            .map(|(id, _)| id)
            .collect();

        let mut alerts = Vec::new();
        for id in matching {
            for by_id in self.alerts.values() {
                if let Some(alert) = by_id.get(id) {
                    alerts.push(alert.clone());
                }
            }
        }
        alerts
    }

    /// Number of feeds that have been successfully updated at least once.
    pub fn source_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.values().map(HashMap::len).sum()
    }

    pub fn register(&mut self) -> Subscription {
        self.subscribers.register()
    }

    pub fn unregister(&mut self, id: SubscriberId) -> bool {
        self.subscribers.unregister(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn notify_all(&mut self) -> NotifyOutcome {
        self.subscribers.notify_all()
    }
}
