//! Shared test utilities and arbitrary generators for property-based testing.

use chrono::{DateTime, FixedOffset};
use proptest::prelude::*;

use crate::geometry::Location;
use crate::types::{Alert, AlertId, AreaDescription, InfoItem, MsgType, Scope, Status};

/// Axis-aligned square ring around the origin, in feed `lon,lat` layout.
pub const UNIT_SQUARE: &str = "-1,-1 1,-1 1,1 -1,1 -1,-1";

/// A square ring far away from `UNIT_SQUARE`.
pub const FAR_SQUARE: &str = "40,40 42,40 42,42 40,42 40,40";

pub fn arb_location() -> impl Strategy<Value = Location> {
    (-90.0..90.0f64, -180.0..180.0f64).prop_map(|(lat, lon)| Location::new(lat, lon))
}

fn arb_token() -> impl Strategy<Value = String> {
    arb_location().prop_map(|loc| format!("{},{}", loc.longitude, loc.latitude))
}

/// A polygon string whose first and last tokens differ, with its token count.
pub fn arb_open_ring() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec(arb_token(), 2..20)
        .prop_filter("first and last token must differ", |tokens| {
            tokens.first() != tokens.last()
        })
        .prop_map(|tokens| {
            let n = tokens.len();
            (tokens.join(" "), n)
        })
}

/// A polygon string that repeats its first token at the end, with its token count.
pub fn arb_closed_ring() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec(arb_token(), 2..20).prop_map(|mut tokens| {
        tokens.push(tokens[0].clone());
        let n = tokens.len();
        (tokens.join(" "), n)
    })
}

fn fixed_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2020-10-14T14:54:00+02:00").unwrap()
}

/// Builds a valid alert whose single info item covers the given polygons.
pub fn sample_alert(id: &str, polygons: &[&str]) -> Alert {
    Alert {
        identifier: AlertId::new(id),
        sender: "test@example.org".to_string(),
        sent: fixed_time(),
        status: Status::Actual,
        msg_type: MsgType::Alert,
        scope: Scope::Public,
        info: vec![InfoItem {
            language: "de-DE".to_string(),
            category: vec!["Safety".to_string()],
            event: "Gefahreninformation".to_string(),
            response_type: vec![],
            urgency: "Immediate".to_string(),
            severity: "Minor".to_string(),
            certainty: "Observed".to_string(),
            headline: format!("headline for {id}"),
            description: format!("description for {id}"),
            instructions: None,
            contact: None,
            url: None,
            area: vec![AreaDescription {
                description: "test area".to_string(),
                polygon: polygons.iter().map(|p| p.to_string()).collect(),
                geocode: vec![],
            }],
            expires: None,
        }],
    }
}
