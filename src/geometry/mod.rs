//! Geometry engine for alert areas.
//!
//! Feeds describe affected areas as polygon strings of `longitude,latitude`
//! tokens. This module turns those strings into closed rings of segments and
//! answers whether a subscriber's location falls inside one.
//!
//! # Module Structure
//!
//! - [`location`]: latitude/longitude points and feed token parsing
//! - [`polygon`]: segment rings and the ray-casting containment test
//! - [`error`]: parse errors

mod error;
mod location;
mod polygon;

pub use error::{Axis, GeometryError};
pub use location::Location;
pub use polygon::{Area, Segment};
