//! Coverage grid: square cells of one lane width, aligned to the MBB.
//!
//! The grid is generated axis-aligned in a frame where the MBB has been
//! rotated flat (with the configured start corner selecting which MBB
//! corner anchors row 0), then rotated back into the world frame. Cells
//! are labelled by centroid containment; the sweep driver later flips
//! `Unvisited` cells to `Visited` as it plans. `Unvisitable` is terminal.

use geo::{BoundingRect, Centroid, Contains, Point, Polygon, Rect};
use serde::{Deserialize, Serialize};

use crate::boundary::WorkingField;
use crate::config::PlanConfig;
use crate::core::geometry::nearest_point_on;
use crate::core::{bearing_deg, distance_m, rotate_around, LocalFrame};
use crate::error::{PlanError, Result};

/// Cells whose centroid is closer to the boundary ring than this are
/// treated as outside; counters boundary-precision false positives.
const BOUNDARY_EROSION_M: f64 = 0.01;

/// Visit state of one coverage cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum VisitState {
    /// Mowable, not yet covered by the planned path.
    #[default]
    Unvisited = 0,
    /// Covered by the planned path.
    Visited = 1,
    /// Outside the working boundary or inside an obstacle. Terminal.
    Unvisitable = 2,
}

impl VisitState {
    /// Is this cell still waiting to be mowed?
    #[inline]
    pub fn is_unvisited(self) -> bool {
        self == VisitState::Unvisited
    }

    /// Has the sweep covered this cell?
    #[inline]
    pub fn is_visited(self) -> bool {
        self == VisitState::Visited
    }

    /// Can this cell ever be mowed?
    #[inline]
    pub fn is_mowable(self) -> bool {
        self != VisitState::Unvisitable
    }

    /// Single character representation for debugging grid dumps.
    pub fn as_char(self) -> char {
        match self {
            VisitState::Unvisited => '.',
            VisitState::Visited => '#',
            VisitState::Unvisitable => 'x',
        }
    }
}

/// One square cell of the coverage grid.
#[derive(Clone, Debug)]
pub struct CoverageCell {
    /// Cell outline in world (geographic) coordinates.
    pub polygon: Polygon<f64>,
    /// Row index in the MBB-aligned frame. Rows advance across lanes.
    pub grid_row: usize,
    /// Column index within the row. Columns advance along a lane.
    pub grid_col: usize,
    /// Visit state, mutated only by the sweep driver.
    pub state: VisitState,
    /// Cell centroid in world coordinates, cached at build time.
    pub centroid: Point<f64>,
}

/// Dense grid of congruent square cells covering the MBB.
#[derive(Clone, Debug)]
pub struct CoverageGrid {
    cells: Vec<CoverageCell>,
    n_rows: usize,
    n_cols: usize,
    lane_width_m: f64,
    travel_heading_deg: f64,
}

impl CoverageGrid {
    /// Build the grid for a conditioned field.
    ///
    /// Generator contract (relied on by the row/col labelling): cells are
    /// emitted column-by-column in the aligned frame, outer loop over x,
    /// inner loop over y; a change in centroid x starts a new row.
    pub fn build(
        field: &WorkingField,
        mbb: &Polygon<f64>,
        config: &PlanConfig,
    ) -> Result<CoverageGrid> {
        let ring = &mbb.exterior().0;
        if ring.len() < 3 {
            return Err(PlanError::GeometryPrecision("bounding box ring too short".into()));
        }
        let theta = bearing_deg(Point::from(ring[0]), Point::from(ring[1]));
        let center = mbb
            .centroid()
            .ok_or_else(|| PlanError::GeometryPrecision("bounding box has no centroid".into()))?;

        // Rotate the MBB flat, anchored at the chosen start corner.
        let spin = -theta + 90.0 * config.start_corner as f64;
        let aligned = rotate_around(mbb, center, spin);
        let rect = aligned
            .bounding_rect()
            .ok_or_else(|| PlanError::GeometryPrecision("aligned box has no extent".into()))?;

        let frame = LocalFrame::new(center);
        let step_lon = config.lane_width_m / frame.meters_per_deg_lon();
        let step_lat = config.lane_width_m / frame.meters_per_deg_lat();
        let n_rows = ((rect.width() / step_lon).ceil() as usize).max(1);
        let n_cols = ((rect.height() / step_lat).ceil() as usize).max(1);
        let min = rect.min();

        // Emit aligned cells in generator order.
        let mut emitted: Vec<(Polygon<f64>, Point<f64>)> =
            Vec::with_capacity(n_rows * n_cols);
        for ix in 0..n_rows {
            let x0 = min.x + ix as f64 * step_lon;
            for iy in 0..n_cols {
                let y0 = min.y + iy as f64 * step_lat;
                let cell = Rect::new(
                    geo::Coord { x: x0, y: y0 },
                    geo::Coord { x: x0 + step_lon, y: y0 + step_lat },
                );
                emitted.push((cell.to_polygon(), Point::from(cell.center())));
            }
        }

        // Assign row/col by scanning the emission order: an x change means
        // a new row. Then rotate each cell back into the world frame and
        // label it.
        let mut cells = Vec::with_capacity(emitted.len());
        let mut grid_row = 0usize;
        let mut grid_col = 0usize;
        let mut prev_x: Option<f64> = None;
        for (aligned_poly, aligned_center) in emitted {
            match prev_x {
                Some(px) if aligned_center.x() != px => {
                    grid_row += 1;
                    grid_col = 0;
                }
                Some(_) => grid_col += 1,
                None => {}
            }
            prev_x = Some(aligned_center.x());

            let polygon = rotate_around(&aligned_poly, center, -spin);
            let centroid = rotate_around(&aligned_center, center, -spin);
            let state = cell_state(field, centroid);
            cells.push(CoverageCell {
                polygon,
                grid_row,
                grid_col,
                state,
                centroid,
            });
        }

        let travel_heading_deg = row_heading(&cells, n_cols);
        log::debug!(
            "coverage grid: {} rows x {} cols, {} mowable cells, heading {:.1} deg",
            n_rows,
            n_cols,
            cells.iter().filter(|c| c.state.is_mowable()).count(),
            travel_heading_deg
        );

        Ok(CoverageGrid {
            cells,
            n_rows,
            n_cols,
            lane_width_m: config.lane_width_m,
            travel_heading_deg,
        })
    }

    /// All cells in generation order (rows ascending, columns ascending).
    #[inline]
    pub fn cells(&self) -> &[CoverageCell] {
        &self.cells
    }

    /// Number of rows (lanes).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns per row.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Lane width the grid was built with.
    #[inline]
    pub fn lane_width_m(&self) -> f64 {
        self.lane_width_m
    }

    /// Bearing of row 0, first cell to last cell, in [0, 360).
    ///
    /// Reported to consumers; the sweep itself does not read it.
    #[inline]
    pub fn travel_heading_deg(&self) -> f64 {
        self.travel_heading_deg
    }

    /// Indices of this row's cells, columns ascending.
    pub fn row_indices(&self, row: usize) -> std::ops::Range<usize> {
        let start = row * self.n_cols;
        start..(start + self.n_cols).min(self.cells.len())
    }

    /// Mark a cell visited. `Unvisitable` is terminal and stays put.
    pub fn mark_visited(&mut self, idx: usize) {
        let cell = &mut self.cells[idx];
        if cell.state == VisitState::Unvisited {
            cell.state = VisitState::Visited;
        }
    }

    /// Index of the first `Unvisited` cell in scan order.
    pub fn first_unvisited(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.state.is_unvisited())
    }

    /// Count `Unvisited` cells in `row` whose column is within ±1 of `col`.
    pub fn unvisited_near(&self, row: usize, col: usize) -> usize {
        self.row_indices(row)
            .filter(|&i| {
                let c = &self.cells[i];
                c.state.is_unvisited() && c.grid_col.abs_diff(col) <= 1
            })
            .count()
    }

    /// Fraction of mowable cells that have been visited.
    ///
    /// `Unvisitable` cells are excluded from the denominator; an empty
    /// denominator counts as full coverage.
    pub fn coverage_fraction(&self) -> f64 {
        let visited = self
            .cells
            .iter()
            .filter(|c| c.state.is_visited())
            .count();
        let mowable = self.cells.iter().filter(|c| c.state.is_mowable()).count();
        if mowable == 0 {
            1.0
        } else {
            visited as f64 / mowable as f64
        }
    }
}

/// Label a cell by its centroid.
fn cell_state(field: &WorkingField, centroid: Point<f64>) -> VisitState {
    if !field.boundary.contains(&centroid) {
        return VisitState::Unvisitable;
    }
    if let Some(on_ring) = nearest_point_on(field.boundary.exterior(), centroid) {
        if distance_m(centroid, on_ring) < BOUNDARY_EROSION_M {
            return VisitState::Unvisitable;
        }
    }
    if field.obstacles.iter().any(|o| o.contains(&centroid)) {
        return VisitState::Unvisitable;
    }
    VisitState::Unvisited
}

/// Bearing across row 0, or 0.0 for a single-cell row.
fn row_heading(cells: &[CoverageCell], n_cols: usize) -> f64 {
    if cells.is_empty() || n_cols < 2 {
        return 0.0;
    }
    let first = &cells[0];
    let last = &cells[n_cols - 1];
    bearing_deg(first.centroid, last.centroid)
}
