//! Point fingerprinting for coordinate equivalence.
//!
//! Floating-point Voronoi output tends to produce coincident-but-not-equal
//! endpoints, and junction detection requires an equivalence class. Every
//! map or set keyed by a point in this crate uses [`PointKey`]: the
//! coordinates quantized to six decimal places of degrees (about 0.11 m of
//! longitude at the equator). Raw `f64` equality is never used as a key.

use geo::{Coord, Point};

/// Quantization factor: six decimal places of degrees.
const SCALE: f64 = 1e6;

/// Canonical rounded representation of a point.
///
/// Two points within half a micro-degree of each other map to the same
/// key. The integer representation is `Eq + Ord + Hash`, so keys can back
/// ordered containers; the crate uses `BTreeMap`/`BTreeSet` throughout so
/// iteration order, and with it the whole pipeline, is deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointKey {
    /// Longitude in micro-degrees.
    pub lon: i64,
    /// Latitude in micro-degrees.
    pub lat: i64,
}

impl PointKey {
    /// Fingerprint a point.
    #[inline]
    pub fn of(point: Point<f64>) -> Self {
        Self::of_coord(point.0)
    }

    /// Fingerprint a raw coordinate.
    #[inline]
    pub fn of_coord(coord: Coord<f64>) -> Self {
        Self {
            lon: (coord.x * SCALE).round() as i64,
            lat: (coord.y * SCALE).round() as i64,
        }
    }

    /// Reconstruct the quantized point this key represents.
    #[inline]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon as f64 / SCALE, self.lat as f64 / SCALE)
    }
}

/// Check whether two points share a fingerprint.
#[inline]
pub fn same_point(a: Point<f64>, b: Point<f64>) -> bool {
    PointKey::of(a) == PointKey::of(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_points_share_key() {
        let a = Point::new(10.1234561, 50.7654321);
        let b = Point::new(10.1234564, 50.7654318);
        assert_eq!(PointKey::of(a), PointKey::of(b));
    }

    #[test]
    fn test_distinct_points_differ() {
        let a = Point::new(10.123456, 50.765432);
        let b = Point::new(10.123458, 50.765432);
        assert_ne!(PointKey::of(a), PointKey::of(b));
    }

    #[test]
    fn test_round_trip() {
        let p = Point::new(-122.345678, 47.654321);
        let back = PointKey::of(p).to_point();
        assert!((back.x() - p.x()).abs() < 1e-6);
        assert!((back.y() - p.y()).abs() < 1e-6);
    }

    #[test]
    fn test_key_ordering_is_total() {
        let a = PointKey::of(Point::new(0.0, 0.0));
        let b = PointKey::of(Point::new(0.000001, 0.0));
        assert!(a < b);
    }

    #[test]
    fn test_same_point() {
        assert!(same_point(
            Point::new(1.0000001, 2.0),
            Point::new(1.0000004, 2.0)
        ));
        assert!(!same_point(Point::new(1.0, 2.0), Point::new(1.00001, 2.0)));
    }
}
