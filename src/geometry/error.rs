//! Polygon and coordinate parse errors.

use std::num::ParseFloatError;

use thiserror::Error;

/// Errors raised while parsing a feed polygon string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The polygon string holds a single coordinate token and cannot form a segment.
    #[error("malformed polygon: {token_count} coordinate token(s) in '{raw}'")]
    MalformedPolygon { raw: String, token_count: usize },

    /// A coordinate token does not split into exactly two comma-separated fields.
    #[error("invalid coordinate '{token}': expected 'longitude,latitude', got {fields} field(s)")]
    CoordinateFields { token: String, fields: usize },

    /// One of the two fields of a coordinate token is not a number.
    #[error("invalid {axis} in coordinate '{token}': {source}")]
    CoordinateValue {
        token: String,
        axis: Axis,
        #[source]
        source: ParseFloatError,
    },
}

impl GeometryError {
    /// Returns the offending coordinate token, if the error concerns one.
    pub fn token(&self) -> Option<&str> {
        match self {
            GeometryError::MalformedPolygon { .. } => None,
            GeometryError::CoordinateFields { token, .. }
            | GeometryError::CoordinateValue { token, .. } => Some(token),
        }
    }
}

/// Which half of a coordinate token failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Longitude => write!(f, "longitude"),
            Axis::Latitude => write!(f, "latitude"),
        }
    }
}
