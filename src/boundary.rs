//! Boundary conditioning: fold straddling obstacles into the boundary.
//!
//! Obstacles that straddle the field boundary effectively redraw it, so
//! they are subtracted from the boundary outright; obstacles wholly inside
//! stay first-class and are routed around. Obstacles wholly outside
//! subtract nothing and are dropped. Every later stage operates on the
//! conditioned [`WorkingField`] only.

use geo::{BooleanOps, Contains, GeodesicArea, MultiPolygon, Point, Polygon};

use crate::core::geometry;
use crate::error::{PlanError, Result};

/// The conditioned inputs all pipeline stages operate on.
#[derive(Clone, Debug)]
pub struct WorkingField {
    /// Working boundary: the raw boundary minus straddling obstacles.
    pub boundary: Polygon<f64>,
    /// Working obstacles: the obstacles lying wholly inside the boundary.
    pub obstacles: Vec<Polygon<f64>>,
}

impl WorkingField {
    /// Check whether a straight segment stays in free space.
    ///
    /// Free space is the boundary interior minus every obstacle.
    #[inline]
    pub fn segment_is_clear(&self, a: Point<f64>, b: Point<f64>) -> bool {
        geometry::segment_is_clear(&self.boundary, &self.obstacles, a, b)
    }
}

/// Condition the raw inputs into a [`WorkingField`].
///
/// Straddling (not fully contained) obstacles are unioned and subtracted
/// from the boundary. A multi-piece difference keeps the largest piece by
/// geodesic area; an empty difference is [`PlanError::EmptyBoundary`].
pub fn condition(boundary: &Polygon<f64>, obstacles: &[Polygon<f64>]) -> Result<WorkingField> {
    let mut contained = Vec::new();
    let mut straddling: Option<MultiPolygon<f64>> = None;

    for obstacle in obstacles {
        if boundary.contains(obstacle) {
            contained.push(obstacle.clone());
        } else {
            let piece = MultiPolygon::new(vec![obstacle.clone()]);
            straddling = Some(match straddling {
                Some(acc) => acc.union(&piece),
                None => piece,
            });
        }
    }

    let working_boundary = match straddling {
        None => boundary.clone(),
        Some(cut) => {
            let difference = MultiPolygon::new(vec![boundary.clone()]).difference(&cut);
            largest_piece(difference).ok_or(PlanError::EmptyBoundary)?
        }
    };

    log::debug!(
        "conditioned field: {} contained obstacles, boundary has {} vertices",
        contained.len(),
        working_boundary.exterior().0.len().saturating_sub(1)
    );

    Ok(WorkingField {
        boundary: working_boundary,
        obstacles: contained,
    })
}

/// Largest polygon of a multipolygon by geodesic area, if any.
fn largest_piece(pieces: MultiPolygon<f64>) -> Option<Polygon<f64>> {
    pieces
        .into_iter()
        .map(|p| (p.geodesic_area_unsigned(), p))
        .filter(|(area, _)| *area > 0.0)
        .max_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, p)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;

    fn square(lon0: f64, lat0: f64, side_deg: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (lon0, lat0),
                (lon0 + side_deg, lat0),
                (lon0 + side_deg, lat0 + side_deg),
                (lon0, lat0 + side_deg),
                (lon0, lat0),
            ]),
            vec![],
        )
    }

    #[test]
    fn test_no_obstacles_passes_through() {
        let boundary = square(0.0, 0.0, 0.001);
        let field = condition(&boundary, &[]).unwrap();
        assert!(field.obstacles.is_empty());
        assert_eq!(field.boundary, boundary);
    }

    #[test]
    fn test_contained_obstacle_kept() {
        let boundary = square(0.0, 0.0, 0.001);
        let obstacle = square(0.0004, 0.0004, 0.0002);
        let field = condition(&boundary, &[obstacle.clone()]).unwrap();
        assert_eq!(field.obstacles.len(), 1);
        assert_eq!(field.boundary, boundary);
    }

    #[test]
    fn test_straddling_obstacle_notches_boundary() {
        let boundary = square(0.0, 0.0, 0.001);
        // Half inside, half outside across the east edge
        let obstacle = square(0.0008, 0.0004, 0.0004);
        let field = condition(&boundary, &[obstacle]).unwrap();
        assert!(field.obstacles.is_empty());
        // The notch removes area from the boundary
        let before = square(0.0, 0.0, 0.001).geodesic_area_unsigned();
        let after = field.boundary.geodesic_area_unsigned();
        assert!(after < before * 0.99, "expected a notch, {} vs {}", after, before);
        // The notch corner is no longer inside
        assert!(!field
            .boundary
            .contains(&Point::new(0.00095, 0.0005)));
    }

    #[test]
    fn test_outside_obstacle_dropped() {
        let boundary = square(0.0, 0.0, 0.001);
        let obstacle = square(0.005, 0.005, 0.001);
        let field = condition(&boundary, &[obstacle]).unwrap();
        assert!(field.obstacles.is_empty());
        assert_eq!(field.boundary, boundary);
    }

    #[test]
    fn test_boundary_swallowed_by_obstacle() {
        let boundary = square(0.0, 0.0, 0.001);
        let obstacle = square(-0.001, -0.001, 0.004);
        assert!(matches!(
            condition(&boundary, &[obstacle]),
            Err(PlanError::EmptyBoundary)
        ));
    }
}
