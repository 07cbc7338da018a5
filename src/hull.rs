//! Convex hull and minimum-area bounding box.
//!
//! The bounding box search uses the rotating-calipers principle: the
//! minimum-area enclosing rectangle of a convex polygon has one side
//! parallel to a hull edge, so it suffices to try one axis-aligned
//! bounding box per edge orientation.

use std::collections::BTreeSet;

use geo::{BoundingRect, Centroid, ConvexHull, Point, Polygon};

use crate::core::fingerprint::{same_point, PointKey};
use crate::core::geometry::ring_edges;
use crate::core::{bearing_deg, rotate_around, LocalFrame};
use crate::error::{PlanError, Result};

/// Convex hull of the working boundary.
///
/// Fails with [`PlanError::DegenerateHull`] when fewer than three distinct
/// vertices remain.
pub fn convex_hull(boundary: &Polygon<f64>) -> Result<Polygon<f64>> {
    let input_distinct = distinct_vertices(boundary);
    if input_distinct < 3 {
        return Err(PlanError::DegenerateHull {
            vertices: input_distinct,
        });
    }
    let hull = boundary.convex_hull();
    let distinct = distinct_vertices(&hull);
    if distinct < 3 {
        return Err(PlanError::DegenerateHull { vertices: distinct });
    }
    Ok(hull)
}

/// Minimum-area bounding rectangle of a convex hull.
///
/// For each hull edge the hull is rotated by minus the edge bearing about
/// its centroid, the axis-aligned bounding box is measured in meters, and
/// the smallest box is rotated back into the world frame.
///
/// When `orientation_offset_deg` is positive the rectangle is instead
/// recomputed from the bearing of the last hull edge considered plus the
/// offset. That is the upstream planner's observable behavior, quirk
/// included, and callers depend on it.
pub fn minimum_bounding_box(
    hull: &Polygon<f64>,
    orientation_offset_deg: f64,
) -> Result<Polygon<f64>> {
    let centroid = hull
        .centroid()
        .ok_or_else(|| PlanError::GeometryPrecision("convex hull has no centroid".into()))?;
    let frame = LocalFrame::new(centroid);

    let mut best: Option<(f64, f64)> = None; // (area m², bearing)
    let mut last_bearing = 0.0;
    for edge in ring_edges(hull.exterior()) {
        let a = Point::from(edge.start);
        let b = Point::from(edge.end);
        if same_point(a, b) {
            continue;
        }
        let theta = bearing_deg(a, b);
        last_bearing = theta;

        let rect = rotate_around(hull, centroid, -theta)
            .bounding_rect()
            .ok_or_else(|| PlanError::GeometryPrecision("hull has no bounding rect".into()))?;
        let area_m2 = rect.width() * frame.meters_per_deg_lon() * rect.height()
            * frame.meters_per_deg_lat();

        if best.map_or(true, |(best_area, _)| area_m2 < best_area) {
            best = Some((area_m2, theta));
        }
    }

    let (_, winning_bearing) = best.ok_or(PlanError::DegenerateHull {
        vertices: distinct_vertices(hull),
    })?;

    let theta = if orientation_offset_deg > 0.0 {
        last_bearing + orientation_offset_deg
    } else {
        winning_bearing
    };

    let rect = rotate_around(hull, centroid, -theta)
        .bounding_rect()
        .ok_or_else(|| PlanError::GeometryPrecision("hull has no bounding rect".into()))?;
    Ok(rotate_around(&rect.to_polygon(), centroid, theta))
}

fn distinct_vertices(polygon: &Polygon<f64>) -> usize {
    polygon
        .exterior()
        .0
        .iter()
        .map(|&c| PointKey::of_coord(c))
        .collect::<BTreeSet<_>>()
        .len()
}
