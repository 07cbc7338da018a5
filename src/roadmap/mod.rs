//! Generalized Voronoi roadmap of free space.
//!
//! The Voronoi diagram of the boundary and obstacle vertices approximates
//! the medial axis of free space: its edges stay as far from the polygon
//! walls as possible. Edges that stray into obstacles are pruned, and the
//! dense edge set is condensed into junction-to-junction polylines keyed
//! by point fingerprints. The router runs shortest-path queries over the
//! result when a straight mow line is blocked.

mod extract;
mod voronoi;

use geo::{LineString, Point};

use crate::boundary::WorkingField;
use crate::core::geometry::polyline_length_m;

/// One roadmap polyline. Its endpoints are junctions of the Voronoi
/// skeleton (or the outline itself in the degenerate fallback).
#[derive(Clone, Debug, PartialEq)]
pub struct RoadmapSegment {
    /// The polyline, in geographic coordinates.
    pub path: LineString<f64>,
}

impl RoadmapSegment {
    /// Wrap a polyline as a roadmap segment.
    pub fn new(path: LineString<f64>) -> Self {
        Self { path }
    }

    /// First vertex of the polyline.
    pub fn start(&self) -> Point<f64> {
        Point::from(self.path.0[0])
    }

    /// Last vertex of the polyline.
    pub fn end(&self) -> Point<f64> {
        Point::from(*self.path.0.last().expect("segment has vertices"))
    }

    /// Polyline length in meters.
    pub fn length_m(&self) -> f64 {
        polyline_length_m(&self.path)
    }
}

/// The free-space roadmap: a set of junction-to-junction polylines.
#[derive(Clone, Debug, Default)]
pub struct Roadmap {
    /// Segments in deterministic (fingerprint-ordered) emission order.
    pub segments: Vec<RoadmapSegment>,
}

impl Roadmap {
    /// Build the roadmap for a conditioned field.
    pub fn build(field: &WorkingField) -> Self {
        extract::build_roadmap(field)
    }

    /// True when no segments were extracted.
    ///
    /// Not an error: the router can still connect points by direct line.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Total length of all segments in meters.
    pub fn total_length_m(&self) -> f64 {
        self.segments.iter().map(|s| s.length_m()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_endpoints() {
        let segment = RoadmapSegment::new(LineString::from(vec![
            (0.0, 0.0),
            (0.001, 0.0),
            (0.001, 0.001),
        ]));
        assert_eq!(segment.start(), Point::new(0.0, 0.0));
        assert_eq!(segment.end(), Point::new(0.001, 0.001));
        assert!(segment.length_m() > 200.0);
    }

    #[test]
    fn test_empty_roadmap() {
        let roadmap = Roadmap::default();
        assert!(roadmap.is_empty());
        assert_eq!(roadmap.len(), 0);
        assert_eq!(roadmap.total_length_m(), 0.0);
    }
}
