//! Newtype wrappers for relay identifiers.
//!
//! Alert identifiers and feed URLs are both plain strings on the wire. Keeping
//! them apart in the type system stops a feed URL from being used as a key into
//! an alert map (and vice versa).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifier of an alert, unique within one feed's current snapshot.
///
/// Not guaranteed unique across feeds: two feeds may publish the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub String);

impl AlertId {
    pub fn new(s: impl Into<String>) -> Self {
        AlertId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AlertId {
    fn from(s: String) -> Self {
        AlertId(s)
    }
}

impl From<&str> for AlertId {
    fn from(s: &str) -> Self {
        AlertId(s.to_string())
    }
}

/// The URL of an upstream alert feed.
///
/// Besides being the fetch target, it scopes the alert identifier namespace:
/// the store keeps one alert map per feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedUrl(pub String);

impl FeedUrl {
    pub fn new(s: impl Into<String>) -> Self {
        FeedUrl(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FeedUrl {
    fn from(s: &str) -> Self {
        FeedUrl(s.to_string())
    }
}

/// A handle identifying one registered subscriber.
///
/// Handed out by the store on registration and used to unregister again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}
