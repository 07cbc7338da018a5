//! Voronoi cells by successive half-plane clipping.
//!
//! Each seed's cell starts as the clip rectangle and is cut down by the
//! perpendicular bisector against every other seed, keeping the side
//! closer to the seed. Quadratic in the seed count, which is fine for
//! field-sized inputs (a few hundred polygon vertices).

use geo::{Coord, LineString, Point, Polygon, Rect};

/// Compute the Voronoi cell of every seed, clipped to `bbox`.
///
/// Degenerate (empty) cells are dropped; with fewer than three seeds the
/// caller is expected to fall back to an outline roadmap instead.
pub(crate) fn voronoi_cells(seeds: &[Point<f64>], bbox: &Rect<f64>) -> Vec<Polygon<f64>> {
    let corners = bbox.to_polygon();
    let start_ring: Vec<Coord<f64>> = corners.exterior().0[..4].to_vec();

    seeds
        .iter()
        .enumerate()
        .filter_map(|(i, &site)| {
            let mut ring = start_ring.clone();
            for (j, &other) in seeds.iter().enumerate() {
                if i == j {
                    continue;
                }
                ring = clip_halfplane(&ring, site, other);
                if ring.len() < 3 {
                    return None;
                }
            }
            let mut closed = ring;
            closed.push(closed[0]);
            Some(Polygon::new(LineString::from(closed), vec![]))
        })
        .collect()
}

/// Signed distance proxy to the bisector of (site, other).
///
/// Negative on the site's side, positive on the other seed's side.
#[inline]
fn bisector_distance(p: Coord<f64>, site: Point<f64>, other: Point<f64>) -> f64 {
    let mid_x = (site.x() + other.x()) * 0.5;
    let mid_y = (site.y() + other.y()) * 0.5;
    let dir_x = other.x() - site.x();
    let dir_y = other.y() - site.y();
    (p.x - mid_x) * dir_x + (p.y - mid_y) * dir_y
}

/// Sutherland–Hodgman clip of an open ring against one bisector,
/// keeping the half-plane closer to `site`.
fn clip_halfplane(ring: &[Coord<f64>], site: Point<f64>, other: Point<f64>) -> Vec<Coord<f64>> {
    let mut out = Vec::with_capacity(ring.len() + 1);
    let mut prev = match ring.last() {
        Some(&c) => c,
        None => return out,
    };
    let mut prev_d = bisector_distance(prev, site, other);

    for &cur in ring {
        let cur_d = bisector_distance(cur, site, other);
        let cur_inside = cur_d <= 0.0;
        let prev_inside = prev_d <= 0.0;

        if cur_inside {
            if !prev_inside {
                out.push(crossing(prev, cur, prev_d, cur_d));
            }
            out.push(cur);
        } else if prev_inside {
            out.push(crossing(prev, cur, prev_d, cur_d));
        }

        prev = cur;
        prev_d = cur_d;
    }
    out
}

/// Intersection of segment (a, b) with the bisector, given the signed
/// distances of its endpoints.
#[inline]
fn crossing(a: Coord<f64>, b: Coord<f64>, da: f64, db: f64) -> Coord<f64> {
    let t = da / (da - db);
    Coord {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, Contains};

    fn unit_bbox() -> Rect<f64> {
        Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 })
    }

    #[test]
    fn test_two_seeds_split_the_box() {
        let seeds = vec![Point::new(0.25, 0.5), Point::new(0.75, 0.5)];
        let cells = voronoi_cells(&seeds, &unit_bbox());
        assert_eq!(cells.len(), 2);
        // Halves of equal area
        for cell in &cells {
            assert!((cell.unsigned_area() - 0.5).abs() < 1e-9);
        }
        assert!(cells[0].contains(&seeds[0]));
        assert!(cells[1].contains(&seeds[1]));
    }

    #[test]
    fn test_corner_seeds_make_quadrants() {
        let seeds = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let cells = voronoi_cells(&seeds, &unit_bbox());
        assert_eq!(cells.len(), 4);
        for cell in &cells {
            assert!((cell.unsigned_area() - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cells_cover_the_box() {
        let seeds = vec![
            Point::new(0.2, 0.3),
            Point::new(0.8, 0.1),
            Point::new(0.5, 0.9),
            Point::new(0.1, 0.7),
        ];
        let cells = voronoi_cells(&seeds, &unit_bbox());
        let total: f64 = cells.iter().map(|c| c.unsigned_area()).sum();
        assert!((total - 1.0).abs() < 1e-9, "total area {}", total);
    }

    #[test]
    fn test_each_cell_contains_its_seed() {
        let seeds = vec![
            Point::new(0.31, 0.42),
            Point::new(0.77, 0.23),
            Point::new(0.52, 0.81),
        ];
        let cells = voronoi_cells(&seeds, &unit_bbox());
        assert_eq!(cells.len(), 3);
        for (cell, seed) in cells.iter().zip(&seeds) {
            assert!(cell.contains(seed));
        }
    }
}
