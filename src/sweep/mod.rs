//! Boustrophedon sweep driver.
//!
//! A pass walks the grid rows in order, mowing each row's unvisited cells
//! back and forth (odd rows reversed). A row is entered at the first cell
//! reachable by a straight clear segment; an obstacle gap inside a row
//! closes the row early, and unmowed territory left in the previous row
//! ends the whole pass so the next pass can route back to it through the
//! roadmap. The outer loop keeps scheduling passes until coverage reaches
//! its target or a pass stops making progress.

use geo::Point;

use crate::boundary::WorkingField;
use crate::core::{distance_m, same_point};
use crate::error::PlanError;
use crate::grid::CoverageGrid;
use crate::roadmap::Roadmap;
use crate::router::ClearPathRouter;

/// Coverage ratio at which the outer loop stops scheduling passes.
const COVERAGE_TARGET: f64 = 0.99;

/// Sweep driver owning the grid for the duration of a plan.
pub struct SweepDriver<'a> {
    field: &'a WorkingField,
    router: ClearPathRouter<'a>,
}

impl<'a> SweepDriver<'a> {
    /// Create a driver over a conditioned field and its roadmap.
    pub fn new(field: &'a WorkingField, roadmap: &'a Roadmap) -> Self {
        Self {
            field,
            router: ClearPathRouter::new(field, roadmap),
        }
    }

    /// Run passes until coverage reaches the target or the path stops
    /// growing. Returns the raw (unpruned) mow path.
    pub fn run(&self, grid: &mut CoverageGrid) -> Vec<Point<f64>> {
        let mut path: Vec<Point<f64>> = Vec::new();
        let mut pass = 0usize;
        loop {
            pass += 1;
            let before = path.len();
            self.run_pass(grid, &mut path);
            let coverage = grid.coverage_fraction();
            log::debug!(
                "sweep pass {}: {} vertices, coverage {:.3}",
                pass,
                path.len(),
                coverage
            );
            if coverage >= COVERAGE_TARGET || path.len() == before {
                break;
            }
        }
        path
    }

    /// One pass over the rows. Appends to `path`; a failed resume leaves
    /// it unchanged (partial coverage is a legitimate outcome).
    fn run_pass(&self, grid: &mut CoverageGrid, path: &mut Vec<Point<f64>>) {
        let mut waypoints: Vec<Point<f64>> = Vec::new();

        // Resume: route from the last planned vertex back to the first
        // cell still unvisited.
        if let Some(&resume_from) = path.last() {
            let Some(target_idx) = grid.first_unvisited() else {
                return;
            };
            let target = grid.cells()[target_idx].centroid;
            match self.router.route(resume_from, target) {
                Ok(route) => {
                    for &c in &route.0 {
                        push_waypoint(&mut waypoints, Point::from(c));
                    }
                }
                Err(PlanError::NoPath { .. }) => {
                    log::debug!("resume routing found no path; keeping current path");
                    return;
                }
                Err(err) => {
                    log::warn!("resume routing failed: {}", err);
                    return;
                }
            }
        }

        for row in 0..grid.n_rows() {
            // Unvisited cells of this row, columns ascending; odd rows
            // reversed for the boustrophedon turn.
            let mut row_cells: Vec<usize> = grid
                .row_indices(row)
                .filter(|&i| grid.cells()[i].state.is_unvisited())
                .collect();
            if row % 2 == 1 {
                row_cells.reverse();
            }
            if row_cells.is_empty() {
                continue;
            }

            // Entry: the first cell reachable by a straight clear segment
            // from the previous waypoint. A fresh path enters at the row's
            // first cell unconditionally.
            let entry_pos = match last_waypoint(&waypoints, path) {
                None => Some(0),
                Some(from) => row_cells
                    .iter()
                    .position(|&i| self.field.segment_is_clear(from, grid.cells()[i].centroid)),
            };
            let Some(entry_pos) = entry_pos else {
                continue;
            };

            let entry_idx = row_cells[entry_pos];
            grid.mark_visited(entry_idx);
            push_waypoint(&mut waypoints, grid.cells()[entry_idx].centroid);

            let mut prev_idx = entry_idx;
            for pos in entry_pos + 1..row_cells.len() {
                let idx = row_cells[pos];
                let col = grid.cells()[idx].grid_col;
                let prev_col = grid.cells()[prev_idx].grid_col;

                if col.abs_diff(prev_col) > 1 {
                    // Obstacle gap inside the row: close it at the
                    // previous cell and move on to the next row.
                    push_waypoint(&mut waypoints, grid.cells()[prev_idx].centroid);
                    break;
                }

                if row > 0 && grid.unvisited_near(row - 1, col) >= 2 {
                    // Unmowed territory behind us: bank this pass and let
                    // the next one route back through the roadmap.
                    grid.mark_visited(idx);
                    push_waypoint(&mut waypoints, grid.cells()[idx].centroid);
                    append_waypoints(path, &waypoints);
                    return;
                }

                grid.mark_visited(idx);
                if pos == row_cells.len() - 1 {
                    push_waypoint(&mut waypoints, grid.cells()[idx].centroid);
                }
                prev_idx = idx;
            }
        }

        append_waypoints(path, &waypoints);
    }
}

/// Drop consecutive near-duplicate vertices.
///
/// Keeps a vertex only if it is farther than `min_spacing_m` from the last
/// kept vertex; the first vertex is always kept. Idempotent.
pub fn prune_path(points: &[Point<f64>], min_spacing_m: f64) -> Vec<Point<f64>> {
    let mut kept: Vec<Point<f64>> = Vec::new();
    for &p in points {
        match kept.last() {
            None => kept.push(p),
            Some(&last) => {
                if distance_m(last, p) > min_spacing_m {
                    kept.push(p);
                }
            }
        }
    }
    kept
}

fn last_waypoint(waypoints: &[Point<f64>], path: &[Point<f64>]) -> Option<Point<f64>> {
    waypoints.last().or_else(|| path.last()).copied()
}

fn push_waypoint(waypoints: &mut Vec<Point<f64>>, p: Point<f64>) {
    if waypoints.last().map_or(true, |&last| !same_point(last, p)) {
        waypoints.push(p);
    }
}

fn append_waypoints(path: &mut Vec<Point<f64>>, waypoints: &[Point<f64>]) {
    for &p in waypoints {
        if path.last().map_or(true, |&last| !same_point(last, p)) {
            path.push(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::condition;
    use crate::config::PlanConfig;
    use crate::hull::{convex_hull, minimum_bounding_box};
    use geo::{LineString, Polygon};

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

    fn setup(
        boundary: Polygon<f64>,
        obstacles: &[Polygon<f64>],
        lane_width_m: f64,
    ) -> (WorkingField, Roadmap, CoverageGrid) {
        let field = condition(&boundary, obstacles).unwrap();
        let hull = convex_hull(&field.boundary).unwrap();
        let mbb = minimum_bounding_box(&hull, 0.0).unwrap();
        let config = PlanConfig::default().with_lane_width_m(lane_width_m);
        let grid = CoverageGrid::build(&field, &mbb, &config).unwrap();
        let roadmap = Roadmap::build(&field);
        (field, roadmap, grid)
    }

    /// Rows that still hold at least one unvisited cell.
    fn active_rows(grid: &CoverageGrid) -> usize {
        (0..grid.n_rows())
            .filter(|&r| {
                grid.row_indices(r)
                    .any(|i| grid.cells()[i].state.is_unvisited())
            })
            .count()
    }

    #[test]
    fn test_convex_field_full_coverage() {
        let (field, roadmap, mut grid) = setup(square(0.0, 0.0, 0.00001), &[], 0.25);
        let rows = active_rows(&grid);
        let driver = SweepDriver::new(&field, &roadmap);
        let path = driver.run(&mut grid);

        assert!(!path.is_empty());
        assert!((grid.coverage_fraction() - 1.0).abs() < 1e-9);
        // One entry and one exit waypoint per swept row
        assert_eq!(path.len(), 2 * rows);
    }

    #[test]
    fn test_boustrophedon_alternates() {
        use crate::core::bearing_deg;

        let (field, roadmap, mut grid) = setup(square(0.0, 0.0, 0.00001), &[], 0.25);
        let driver = SweepDriver::new(&field, &roadmap);
        let path = driver.run(&mut grid);

        // Consecutive row legs run in opposite directions
        let bearings: Vec<f64> = path
            .chunks(2)
            .filter(|pair| pair.len() == 2)
            .map(|pair| bearing_deg(pair[0], pair[1]))
            .collect();
        assert!(bearings.len() >= 2);
        for pair in bearings.windows(2) {
            let diff = (pair[0] - pair[1]).rem_euclid(360.0);
            assert!(
                (diff - 180.0).abs() < 5.0,
                "rows should alternate direction, bearings {:?}",
                pair
            );
        }
    }

    #[test]
    fn test_gap_row_closed_early_then_resumed() {
        let boundary = square(0.0, 0.0, 0.00001);
        // Obstacle spanning the middle of the field, wide enough to cut
        // several rows in half
        let obstacle = square(0.0000045, 0.000003, 0.000002);
        let (field, roadmap, mut grid) = setup(boundary, &[obstacle], 0.1);
        let driver = SweepDriver::new(&field, &roadmap);
        let path = driver.run(&mut grid);

        assert!(!path.is_empty());
        // Both sides of the obstacle end up mowed
        assert!(
            grid.coverage_fraction() > 0.9,
            "coverage {}",
            grid.coverage_fraction()
        );
    }

    #[test]
    fn test_prune_path_spacing() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0000001, 0.0), // ~1 cm away
            Point::new(0.00001, 0.0),   // ~1.1 m away
        ];
        let pruned = prune_path(&points, 0.125);
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned[0], points[0]);
        assert_eq!(pruned[1], points[2]);
    }

    #[test]
    fn test_prune_path_idempotent() {
        let points: Vec<Point<f64>> = (0..20)
            .map(|i| Point::new(i as f64 * 0.0000007, 0.0))
            .collect();
        let once = prune_path(&points, 0.125);
        let twice = prune_path(&once, 0.125);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fully_visited_grid_leaves_path_empty() {
        let (field, roadmap, mut grid) = setup(square(0.0, 0.0, 0.00001), &[], 0.25);
        for i in 0..grid.cells().len() {
            grid.mark_visited(i);
        }
        let driver = SweepDriver::new(&field, &roadmap);
        let path = driver.run(&mut grid);
        assert!(path.is_empty());
    }
}
