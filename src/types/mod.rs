//! Core domain types for the alert relay.
//!
//! Identifiers and the alert data model shared by the feed decoder, the store
//! and the subscriber sessions.

pub mod alert;
pub mod ids;

// Re-export commonly used types at the module level
pub use alert::{
    Alert, AlertValidationError, AreaDescription, Geocode, InfoItem, MsgType, Scope, Status,
};
pub use ids::{AlertId, FeedUrl, SubscriberId};
