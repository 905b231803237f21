//! Latitude/longitude points.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{Axis, GeometryError};

/// A point on the globe. No range validation is performed.
///
/// Deserializes from `{"latitude": .., "longitude": ..}`; the capitalized keys
/// sent by the bundled browser client are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(alias = "Latitude")]
    pub latitude: f64,
    #[serde(alias = "Longitude")]
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }

    /// Parses one coordinate token of a feed polygon.
    ///
    /// Feed tokens are laid out as `longitude,latitude`, the reverse of the
    /// usual order:
    ///
    /// ```
    /// use alert_relay::geometry::Location;
    ///
    /// let loc = Location::from_feed_token("7.8,50.1").unwrap();
    /// assert_eq!(loc, Location::new(50.1, 7.8));
    /// ```
    pub fn from_feed_token(token: &str) -> Result<Self, GeometryError> {
        let fields: Vec<&str> = token.trim().split(',').collect();
        let [lon, lat] = fields.as_slice() else {
            return Err(GeometryError::CoordinateFields {
                token: token.to_string(),
                fields: fields.len(),
            });
        };

        let longitude = lon
            .parse::<f64>()
            .map_err(|source| GeometryError::CoordinateValue {
                token: token.to_string(),
                axis: Axis::Longitude,
                source,
            })?;
        let latitude = lat
            .parse::<f64>()
            .map_err(|source| GeometryError::CoordinateValue {
                token: token.to_string(),
                axis: Axis::Latitude,
                source,
            })?;

        Ok(Location {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Lat:{:7.3}, Lon:{:7.3}]",
            self.latitude, self.longitude
        )
    }
}
