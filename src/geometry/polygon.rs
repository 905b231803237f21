//! Polygon rings and the point-in-polygon test.

use std::str::FromStr;

use super::error::GeometryError;
use super::location::Location;

/// One edge of a polygon ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p1: Location,
    pub p2: Location,
}

/// A closed ring of segments describing an affected area.
///
/// The ring need not be convex. An area parsed from an empty string has no
/// segments and contains nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Area {
    segments: Vec<Segment>,
}

impl Area {
    /// Parses a feed polygon string such as `"13.09,50.783 13.109,50.79 ..."`.
    ///
    /// Tokens are separated by single spaces and read as `longitude,latitude`.
    /// When the first and last tokens differ, the ring is closed by repeating
    /// the first token, so `N` open tokens yield `N` segments and `N` closed
    /// tokens yield `N - 1`.
    pub fn parse(raw: &str) -> Result<Self, GeometryError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Area::default());
        }

        let mut tokens: Vec<&str> = raw.split(' ').collect();
        if tokens.len() < 2 {
            return Err(GeometryError::MalformedPolygon {
                raw: raw.to_string(),
                token_count: tokens.len(),
            });
        }
        if tokens.first() != tokens.last() {
            tokens.push(tokens[0]);
        }

        let points = tokens
            .iter()
            .map(|token| Location::from_feed_token(token))
            .collect::<Result<Vec<_>, _>>()?;

        let segments = points
            .windows(2)
            .map(|pair| Segment {
                p1: pair[0],
                p2: pair[1],
            })
            .collect();

        Ok(Area { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if `point` lies inside the ring.
    ///
    /// Casts a ray along the point's latitude and counts segment crossings; an
    /// odd count means inside. The crossing rule is a simplified one and can
    /// miscount points lying exactly on a sloped edge near a vertex:
    ///
    /// - segments whose latitude span excludes the point never cross;
    /// - vertical segments cross when `point.longitude <= segment longitude`;
    /// - horizontal segments cross only when the point shares their latitude
    ///   and `point.longitude <=` the segment's leftmost longitude;
    /// - other segments cross when `point.latitude / slope <= point.longitude`.
    pub fn contains(&self, point: Location) -> bool {
        let crossings = self
            .segments
            .iter()
            .filter(|seg| crosses(seg, point))
            .count();

        crossings % 2 != 0
    }
}

fn crosses(seg: &Segment, point: Location) -> bool {
    let min_lat = seg.p1.latitude.min(seg.p2.latitude);
    let max_lat = seg.p1.latitude.max(seg.p2.latitude);
    if point.latitude < min_lat || point.latitude > max_lat {
        return false;
    }

    if seg.p1.longitude == seg.p2.longitude {
        return point.longitude <= seg.p1.longitude;
    }

    let (left, right) = if seg.p1.longitude > seg.p2.longitude {
        (seg.p2, seg.p1)
    } else {
        (seg.p1, seg.p2)
    };
    let slope = (right.latitude - left.latitude) / (right.longitude - left.longitude);

    if slope == 0.0 {
        return point.latitude == left.latitude && point.longitude <= left.longitude;
    }

    point.latitude / slope <= point.longitude
}

impl FromStr for Area {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Area::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{arb_closed_ring, arb_location, arb_open_ring};
    use proptest::prelude::*;

    /// A county-sized ring around Annaberg-Buchholz, Saxony.
    const SAXONY_AREA: &str = "13.09,50.783 13.109,50.79 13.139,50.77 13.17,50.784 13.196,50.784 13.242,50.772 13.277,50.763 13.284,50.74 13.333,50.746 13.358,50.753 13.364,50.753 13.378,50.735 13.37,50.716 13.406,50.685 13.433,50.676 13.431,50.665 13.485,50.65 13.485,50.641 13.501,50.633 13.464,50.603 13.428,50.611 13.425,50.616 13.42,50.615 13.391,50.645 13.373,50.644 13.369,50.618 13.321,50.601 13.325,50.583 13.291,50.575 13.279,50.593 13.256,50.595 13.235,50.578 13.229,50.554 13.195,50.503 13.175,50.504 13.137,50.506 13.127,50.517 13.103,50.503 13.061,50.501 13.044,50.511 13.033,50.509 13.022,50.477 13.024,50.451 12.966,50.415 12.936,50.411 12.894,50.43 12.836,50.454 12.807,50.442 12.795,50.449 12.754,50.438 12.696,50.401 12.666,50.414 12.628,50.415 12.583,50.407 12.584,50.424 12.533,50.445 12.494,50.469 12.46,50.497 12.467,50.514 12.471,50.518 12.477,50.523 12.512,50.53 12.529,50.546 12.548,50.561 12.582,50.552 12.613,50.565 12.584,50.575 12.589,50.609 12.631,50.62 12.64,50.636 12.648,50.64 12.687,50.629 12.698,50.636 12.711,50.643 12.708,50.666 12.718,50.687 12.705,50.7 12.683,50.7 12.653,50.71 12.642,50.722 12.666,50.732 12.65,50.754 12.686,50.755 12.695,50.739 12.714,50.738 12.727,50.752 12.713,50.77 12.74,50.78 12.755,50.771 12.778,50.789 12.796,50.785 12.817,50.789 12.84,50.801 12.852,50.797 12.889,50.784 12.895,50.754 12.906,50.748 12.938,50.744 12.953,50.759 12.967,50.755 13.005,50.771 13.019,50.771 13.047,50.807 13.072,50.785 13.09,50.783";

    const SQUARE: &str = "-1,-1 1,-1 1,1 -1,1 -1,-1";

    #[test]
    fn empty_string_yields_empty_area() {
        let area = Area::parse("").unwrap();
        assert!(area.segments().is_empty());
        assert!(!area.contains(Location::new(0.0, 0.0)));

        let area = Area::parse("   \t ").unwrap();
        assert!(area.segments().is_empty());
    }

    #[test]
    fn single_token_is_malformed() {
        let err = Area::parse("onlyonetoken").unwrap_err();
        assert!(matches!(
            err,
            GeometryError::MalformedPolygon { token_count: 1, .. }
        ));

        // Still a single token, even though it is a valid coordinate.
        assert!(Area::parse("7.8,50.1").is_err());
    }

    #[test]
    fn closed_ring_is_not_closed_twice() {
        let area = Area::parse("1,2 3,4 1.5,3 1,2").unwrap();
        assert_eq!(area.segments().len(), 3);
    }

    #[test]
    fn open_ring_gets_closing_segment() {
        let area = Area::parse("1,2 3,4 1.5,3").unwrap();
        assert_eq!(area.segments().len(), 3);

        let closing = area.segments()[2];
        assert_eq!(closing.p1, Location::new(3.0, 1.5));
        assert_eq!(closing.p2, Location::new(2.0, 1.0));
    }

    #[test]
    fn bad_token_reports_offending_token() {
        let err = Area::parse("1,2 3;4 5,6").unwrap_err();
        assert_eq!(err.token(), Some("3;4"));
    }

    #[test]
    fn double_space_produces_empty_token_error() {
        let err = Area::parse("1,2  3,4").unwrap_err();
        assert!(matches!(err, GeometryError::CoordinateFields { fields: 1, .. }));
    }

    #[test]
    fn large_real_world_ring_parses() {
        let area: Area = SAXONY_AREA.parse().unwrap();
        let tokens = SAXONY_AREA.split(' ').count();
        assert_eq!(area.segments().len(), tokens - 1);
        assert!(!area.contains(Location::new(0.0, 0.0)));
    }

    #[test]
    fn square_fixture_containment() {
        let area = Area::parse(SQUARE).unwrap();

        let cases = [
            (Location::new(0.0, 0.0), true),
            (Location::new(0.0, -3.0), false),
            (Location::new(-1.0, -1.0), true),
            (Location::new(0.3, 0.3), true),
        ];

        for (point, expected) in cases {
            assert_eq!(area.contains(point), expected, "point {}", point);
        }
    }

    #[test]
    fn square_excludes_points_above_and_below() {
        let area = Area::parse(SQUARE).unwrap();
        assert!(!area.contains(Location::new(2.0, 0.0)));
        assert!(!area.contains(Location::new(-2.0, 0.0)));
    }

    #[test]
    fn sloped_segment_uses_simplified_crossing_rule() {
        // Single sloped edge from (lat 0, lon 0) to (lat 2, lon 2): slope 1.
        let seg = Segment {
            p1: Location::new(0.0, 0.0),
            p2: Location::new(2.0, 2.0),
        };
        // lat / slope = 1.0 <= lon
        assert!(crosses(&seg, Location::new(1.0, 1.5)));
        assert!(!crosses(&seg, Location::new(1.0, 0.5)));
        // Outside the latitude span.
        assert!(!crosses(&seg, Location::new(3.0, 5.0)));
    }

    proptest! {
        #[test]
        fn open_ring_yields_one_segment_per_token((raw, n) in arb_open_ring()) {
            let area = Area::parse(&raw).unwrap();
            prop_assert_eq!(area.segments().len(), n);
        }

        #[test]
        fn closed_ring_yields_one_less_segment((raw, n) in arb_closed_ring()) {
            let area = Area::parse(&raw).unwrap();
            prop_assert_eq!(area.segments().len(), n - 1);
        }

        #[test]
        fn ring_is_always_closed((raw, _n) in arb_open_ring()) {
            let area = Area::parse(&raw).unwrap();
            let segments = area.segments();
            prop_assert_eq!(segments[segments.len() - 1].p2, segments[0].p1);
        }

        #[test]
        fn empty_area_contains_nothing(point in arb_location()) {
            prop_assert!(!Area::default().contains(point));
        }
    }
}
