//! Path markers: start/end circles and direction arrows.
//!
//! Consumers render these alongside the mow path; the planner itself does
//! not read them back.

use geo::{LineString, Point, Polygon};

use crate::core::{bearing_deg, destination, distance_m};

/// Circle polygonalization steps.
const CIRCLE_STEPS: usize = 32;
/// Start/end circle radius as a fraction of the lane width.
const CIRCLE_RADIUS_FACTOR: f64 = 0.3;
/// Vertex separation (in lane widths) beyond which a hop gets an arrow.
const ARROW_SPACING_FACTOR: f64 = 4.0;
/// Arrow leg length as a fraction of the lane width.
const ARROW_LEG_FACTOR: f64 = 0.5;
/// Arrow leg angle away from the segment bearing.
const ARROW_LEG_ANGLE_DEG: f64 = 150.0;

/// Marker set derived from a final mow path.
#[derive(Clone, Debug, Default)]
pub struct PathMarkers {
    /// Circle at the path's first vertex.
    pub start: Option<Polygon<f64>>,
    /// Circle at the path's last vertex.
    pub end: Option<Polygon<f64>>,
    /// Arrowheads at the midpoints of long hops (bypass moves).
    pub arrows: Vec<LineString<f64>>,
}

impl PathMarkers {
    /// True when the path produced no markers at all.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.arrows.is_empty()
    }
}

/// Build the marker set for a path.
pub fn path_markers(path: &[Point<f64>], lane_width_m: f64) -> PathMarkers {
    let radius_m = CIRCLE_RADIUS_FACTOR * lane_width_m;
    let start = path.first().map(|&p| circle(p, radius_m));
    let end = path.last().map(|&p| circle(p, radius_m));

    let arrows = path
        .windows(2)
        .filter(|pair| distance_m(pair[0], pair[1]) > ARROW_SPACING_FACTOR * lane_width_m)
        .map(|pair| arrowhead(pair[0], pair[1], lane_width_m))
        .collect();

    PathMarkers { start, end, arrows }
}

/// Polygonalized circle around a center point.
fn circle(center: Point<f64>, radius_m: f64) -> Polygon<f64> {
    let mut ring: Vec<Point<f64>> = (0..CIRCLE_STEPS)
        .map(|i| {
            let heading = i as f64 * 360.0 / CIRCLE_STEPS as f64;
            destination(center, heading, radius_m)
        })
        .collect();
    ring.push(ring[0]);
    Polygon::new(LineString::from(ring), vec![])
}

/// Arrowhead at the midpoint of a hop: two legs swept back from the
/// segment bearing.
fn arrowhead(from: Point<f64>, to: Point<f64>, lane_width_m: f64) -> LineString<f64> {
    let heading = bearing_deg(from, to);
    let tip = destination(from, heading, distance_m(from, to) / 2.0);
    let leg_m = ARROW_LEG_FACTOR * lane_width_m;
    let left = destination(tip, heading + ARROW_LEG_ANGLE_DEG, leg_m);
    let right = destination(tip, heading - ARROW_LEG_ANGLE_DEG, leg_m);
    LineString::from(vec![left, tip, right])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_has_no_markers() {
        let markers = path_markers(&[], 0.3);
        assert!(markers.is_empty());
    }

    #[test]
    fn test_start_and_end_circles() {
        let path = vec![Point::new(0.0, 0.0), Point::new(0.00001, 0.0)];
        let markers = path_markers(&path, 0.3);
        let start = markers.start.unwrap();
        let end = markers.end.unwrap();
        assert_eq!(start.exterior().0.len(), CIRCLE_STEPS + 1);

        // Circle vertices sit one radius from the path endpoint
        for &c in &start.exterior().0 {
            let d = distance_m(Point::new(0.0, 0.0), Point::from(c));
            assert!((d - 0.09).abs() < 0.001, "radius {}", d);
        }
        for &c in &end.exterior().0 {
            let d = distance_m(Point::new(0.00001, 0.0), Point::from(c));
            assert!((d - 0.09).abs() < 0.001);
        }
    }

    #[test]
    fn test_short_hops_get_no_arrow() {
        // ~1.1 m hop with 0.3 m lanes stays under the 4-lane threshold
        let path = vec![Point::new(0.0, 0.0), Point::new(0.00001, 0.0)];
        let markers = path_markers(&path, 0.3);
        assert!(markers.arrows.is_empty());
    }

    #[test]
    fn test_long_hop_gets_arrow_at_midpoint() {
        // ~2.2 m hop with 0.3 m lanes crosses the threshold
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.00002, 0.0);
        let markers = path_markers(&[a, b], 0.3);
        assert_eq!(markers.arrows.len(), 1);

        let arrow = &markers.arrows[0];
        assert_eq!(arrow.0.len(), 3);
        let tip = Point::from(arrow.0[1]);
        assert!((distance_m(a, tip) - distance_m(tip, b)).abs() < 0.01);
        // Legs sweep back toward the segment start
        let left = Point::from(arrow.0[0]);
        assert!((distance_m(tip, left) - 0.15).abs() < 0.001);
        assert!(distance_m(a, left) < distance_m(b, left));
    }
}
