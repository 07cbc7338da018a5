//! Pipeline orchestration: one synchronous pass over a frozen snapshot.
//!
//! `plan()` is a pure function of its inputs. Stages run in a fixed
//! order with strict happens-before: conditioning → hull → MBB → grid →
//! roadmap → sweep (which routes through the roadmap). Any input change
//! invalidates the whole derived state; callers simply plan again.

use geo::{LineString, Polygon};

use crate::boundary::{self, WorkingField};
use crate::config::PlanConfig;
use crate::error::Result;
use crate::grid::CoverageGrid;
use crate::hull;
use crate::markers::{path_markers, PathMarkers};
use crate::roadmap::Roadmap;
use crate::sweep::{prune_path, SweepDriver};

/// Everything derived from one planning run.
#[derive(Clone, Debug)]
pub struct PlanResult {
    /// Boundary after straddling obstacles were subtracted.
    pub working_boundary: Polygon<f64>,
    /// Obstacles lying wholly inside the working boundary.
    pub working_obstacles: Vec<Polygon<f64>>,
    /// Convex hull of the working boundary.
    pub hull: Polygon<f64>,
    /// Minimum-area bounding rectangle (plus any orientation offset).
    pub mbb: Polygon<f64>,
    /// Lane grid with final visit states.
    pub coverage_grid: CoverageGrid,
    /// Free-space roadmap used for bypass routing.
    pub roadmap: Roadmap,
    /// The planned mow path.
    pub mow_path: LineString<f64>,
    /// Bearing of the first sweep row, degrees in [0, 360).
    pub travel_heading_deg: f64,
    /// Fraction of mowable cells covered by the path.
    pub coverage_fraction: f64,
    /// Start/end/direction markers derived from the path.
    pub markers: PathMarkers,
}

/// Plan a coverage path for a field.
///
/// # Arguments
/// * `boundary` - Field boundary polygon (geographic coordinates)
/// * `obstacles` - Obstacle polygons, in any position relative to the
///   boundary
/// * `config` - Lane width and sweep orientation settings
///
/// # Errors
/// [`EmptyBoundary`](crate::PlanError::EmptyBoundary) when obstacles
/// swallow the whole field,
/// [`DegenerateHull`](crate::PlanError::DegenerateHull) for boundaries
/// with fewer than three distinct vertices, and
/// [`InvalidConfig`](crate::PlanError::InvalidConfig) for out-of-range
/// settings. A field where parts are unreachable is not an error; the
/// result simply reports lower coverage.
pub fn plan(
    boundary: &Polygon<f64>,
    obstacles: &[Polygon<f64>],
    config: &PlanConfig,
) -> Result<PlanResult> {
    config.validate()?;

    let field = boundary::condition(boundary, obstacles)?;
    let hull = hull::convex_hull(&field.boundary)?;
    let mbb = hull::minimum_bounding_box(&hull, config.mbb_orientation_offset_deg)?;
    let mut grid = CoverageGrid::build(&field, &mbb, config)?;
    let roadmap = Roadmap::build(&field);
    if roadmap.is_empty() {
        log::warn!("roadmap is empty; bypass routing limited to direct lines");
    }

    let driver = SweepDriver::new(&field, &roadmap);
    let raw_path = driver.run(&mut grid);
    let pruned = prune_path(&raw_path, config.lane_width_m / 2.0);
    let markers = path_markers(&pruned, config.lane_width_m);

    let coverage_fraction = grid.coverage_fraction();
    log::info!(
        "plan: {} path vertices, coverage {:.1}%, roadmap {} segments",
        pruned.len(),
        coverage_fraction * 100.0,
        roadmap.len()
    );

    let WorkingField {
        boundary: working_boundary,
        obstacles: working_obstacles,
    } = field;

    Ok(PlanResult {
        working_boundary,
        working_obstacles,
        hull,
        mbb,
        travel_heading_deg: grid.travel_heading_deg(),
        coverage_grid: grid,
        roadmap,
        mow_path: LineString::from(pruned),
        coverage_fraction,
        markers,
    })
}
