//! Alert records as published by the upstream warning feeds.
//!
//! The field names mirror the feeds' CAP-derived JSON exactly, so an alert
//! decoded from a feed serializes back to the same shape when it is pushed to
//! subscribers.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::AlertId;

/// Whether an alert describes a real event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Actual,
    Exercise,
    System,
    Test,
    Draft,
}

/// The kind of message an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MsgType {
    Alert,
    Update,
    Cancel,
    Ack,
    Error,
}

/// The intended distribution of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Public,
    Restricted,
    Private,
}

/// A name/value code identifying an affected administrative area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geocode {
    #[serde(default)]
    pub value_name: String,
    #[serde(default)]
    pub value: String,
}

/// One affected area of an info item.
///
/// `polygon` holds raw coordinate strings in the feed's `lon,lat lon,lat ...`
/// layout; they are parsed by the store when the alert is ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaDescription {
    #[serde(rename = "areaDesc", default)]
    pub description: String,
    #[serde(default)]
    pub polygon: Vec<String>,
    #[serde(default)]
    pub geocode: Vec<Geocode>,
}

/// The payload of an alert: what happened, how bad it is, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoItem {
    #[serde(default)]
    pub language: String,
    /// Must hold exactly one value, e.g. `["Safety"]` or `["Met"]`.
    #[serde(default)]
    pub category: Vec<String>,
    /// e.g. "Gefahrenmitteilung"; sometimes only a code.
    #[serde(default)]
    pub event: String,
    /// Suggested response. Zero or one value.
    #[serde(default)]
    pub response_type: Vec<String>,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub certainty: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "instruction", default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(rename = "web", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub area: Vec<AreaDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<FixedOffset>>,
}

/// A single public-warning alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub identifier: AlertId,
    #[serde(default)]
    pub sender: String,
    pub sent: DateTime<FixedOffset>,
    pub status: Status,
    pub msg_type: MsgType,
    pub scope: Scope,
    #[serde(default)]
    pub info: Vec<InfoItem>,
}

/// Reasons an alert from a feed is rejected on ingest.
#[derive(Debug, Error)]
pub enum AlertValidationError {
    /// The record does not decode, including unknown status/msgType/scope values.
    #[error("malformed alert record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("alert {id}: info item {index} has {count} categories, expected exactly 1")]
    CategoryCount {
        id: AlertId,
        index: usize,
        count: usize,
    },

    #[error("alert {id}: info item {index} has {count} response types, expected at most 1")]
    ResponseTypeCount {
        id: AlertId,
        index: usize,
        count: usize,
    },
}

impl Alert {
    /// Decodes and validates one alert record from a feed payload.
    pub fn from_feed_value(value: serde_json::Value) -> Result<Self, AlertValidationError> {
        let alert: Alert = serde_json::from_value(value)?;
        alert.validate()?;
        Ok(alert)
    }

    /// Checks the per-info cardinality rules the enums alone cannot express.
    pub fn validate(&self) -> Result<(), AlertValidationError> {
        for (index, info) in self.info.iter().enumerate() {
            if info.category.len() != 1 {
                return Err(AlertValidationError::CategoryCount {
                    id: self.identifier.clone(),
                    index,
                    count: info.category.len(),
                });
            }
            if info.response_type.len() > 1 {
                return Err(AlertValidationError::ResponseTypeCount {
                    id: self.identifier.clone(),
                    index,
                    count: info.response_type.len(),
                });
            }
        }
        Ok(())
    }

    /// Iterates over every raw polygon string of every info item.
    pub fn polygons(&self) -> impl Iterator<Item = &str> {
        self.info
            .iter()
            .flat_map(|info| info.area.iter())
            .flat_map(|area| area.polygon.iter())
            .map(String::as_str)
    }
}
