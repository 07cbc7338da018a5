//! Polyline and segment helpers shared by the pipeline stages.

use geo::{Closest, ClosestPoint, Contains, Intersects, Line, LineString, Point, Polygon};

use super::fingerprint::same_point;
use super::geodesy;

/// Iterate the edges of a ring (or any polyline) as `Line`s.
pub fn ring_edges(ring: &LineString<f64>) -> impl Iterator<Item = Line<f64>> + '_ {
    ring.0.windows(2).map(|w| Line::new(w[0], w[1]))
}

/// Total length of a polyline in meters.
pub fn polyline_length_m(line: &LineString<f64>) -> f64 {
    line.0
        .windows(2)
        .map(|w| geodesy::distance_m(Point::from(w[0]), Point::from(w[1])))
        .sum()
}

/// Nearest point on a polyline to `p`.
///
/// Returns `None` only for degenerate (empty) polylines.
pub fn nearest_point_on(line: &LineString<f64>, p: Point<f64>) -> Option<Point<f64>> {
    match line.closest_point(&p) {
        Closest::Intersection(q) | Closest::SinglePoint(q) => Some(q),
        Closest::Indeterminate => line.0.first().map(|&c| Point::from(c)),
    }
}

/// Squared planar distance (degrees²) from a point to a segment.
///
/// Used only to locate which sub-segment of a polyline a stitch point
/// belongs to; metric distances elsewhere are haversine.
pub fn point_segment_distance_sq(p: Point<f64>, seg: Line<f64>) -> f64 {
    let (px, py) = (p.x(), p.y());
    let (ax, ay) = (seg.start.x, seg.start.y);
    let (bx, by) = (seg.end.x, seg.end.y);
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    (px - cx) * (px - cx) + (py - cy) * (py - cy)
}

/// Split a polyline at a point lying on (or near) it.
///
/// The point is inserted into the sub-segment it is closest to; the two
/// halves share it as their joint endpoint. Degenerate halves (when the
/// split point coincides with a polyline endpoint) are returned as-is and
/// filtered out by the adjacency-graph builder.
pub fn split_at(line: &LineString<f64>, p: Point<f64>) -> (LineString<f64>, LineString<f64>) {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, seg) in ring_edges(line).enumerate() {
        let d = point_segment_distance_sq(p, seg);
        if d < best_dist {
            best_dist = d;
            best_idx = idx;
        }
    }

    let mut first: Vec<_> = line.0[..=best_idx].to_vec();
    if !same_point(Point::from(*first.last().unwrap()), p) {
        first.push(p.0);
    }
    let mut second = vec![p.0];
    for &c in &line.0[best_idx + 1..] {
        if !same_point(Point::from(c), Point::from(*second.last().unwrap())) {
            second.push(c);
        }
    }
    (LineString::from(first), LineString::from(second))
}

/// Check whether the straight segment `a → b` stays in free space.
///
/// Free space is the interior of `boundary` minus every obstacle. Touching
/// an obstacle counts as blocked; endpoints may lie on the boundary ring
/// itself (roadmap stitch points do).
pub fn segment_is_clear(
    boundary: &Polygon<f64>,
    obstacles: &[Polygon<f64>],
    a: Point<f64>,
    b: Point<f64>,
) -> bool {
    if same_point(a, b) {
        return true;
    }
    let line = Line::new(a.0, b.0);
    if !boundary.contains(&line) {
        return false;
    }
    !obstacles.iter().any(|o| line.intersects(o))
}
