//! # Kshetra-Plan: Coverage Path Planning for Autonomous Mowers
//!
//! Plans a single mow polyline over a geographic field: a bounding
//! polygon with zero or more obstacle polygons. The path covers the
//! field's interior on parallel lanes (a Boustrophedon sweep) spaced by
//! the configured lane width; when a lane is cut off by an obstacle or by
//! territory already mowed, the planner re-routes through a Voronoi
//! roadmap of free space and resumes sweeping.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geo::{LineString, Polygon};
//! use kshetra_plan::{plan, PlanConfig};
//!
//! // ~1.1 m square at the equator (coordinates are lon/lat degrees)
//! let boundary = Polygon::new(
//!     LineString::from(vec![
//!         (0.0, 0.0),
//!         (0.00001, 0.0),
//!         (0.00001, 0.00001),
//!         (0.0, 0.00001),
//!         (0.0, 0.0),
//!     ]),
//!     vec![],
//! );
//!
//! let config = PlanConfig::default().with_lane_width_m(0.25);
//! let result = plan(&boundary, &[], &config).unwrap();
//! println!(
//!     "{} waypoints, {:.0}% coverage",
//!     result.mow_path.0.len(),
//!     result.coverage_fraction * 100.0
//! );
//! ```
//!
//! ## Coordinates
//!
//! All geometry is carried in a single geographic reference (longitude/
//! latitude, degrees). Distances, lengths, and areas are computed in
//! meters by the [`core`] helpers; shape-preserving rotations go through
//! a local tangent frame. Points are never compared by raw float
//! equality: every point-keyed container uses the 6-decimal-place
//! fingerprint in [`core::fingerprint`].
//!
//! ## Architecture
//!
//! The pipeline is a one-shot, synchronous dataflow:
//!
//! ```text
//!   boundary + obstacles
//!           │ condition (subtract straddlers)
//!           ▼
//!     WorkingField ──────────────┐
//!           │ hull + calipers    │ Voronoi of polygon vertices
//!           ▼                    ▼
//!          MBB               Roadmap ◄─── junction-to-junction joining
//!           │ rotate + tile      │
//!           ▼                    │
//!     CoverageGrid               │
//!           │                    │
//!           └──► SweepDriver ◄───┘   (router: direct line or Dijkstra)
//!                    │
//!                    ▼
//!              MowPath + markers
//! ```
//!
//! Modules:
//!
//! - [`core`]: fingerprinting, geodesic measures, polyline helpers
//! - [`config`]: [`PlanConfig`], loadable from YAML
//! - [`boundary`]: boundary conditioning into a [`WorkingField`]
//! - [`hull`]: convex hull and rotating-calipers bounding box
//! - [`grid`]: the lane-width coverage grid
//! - [`roadmap`]: the Voronoi free-space roadmap
//! - [`router`]: clear-path routing over the roadmap
//! - [`sweep`]: the Boustrophedon sweep driver
//! - [`markers`]: start/end/direction markers
//!
//! ## Determinism
//!
//! `plan()` is a pure function: the same inputs produce byte-identical
//! outputs. All point-keyed containers are ordered, and no stage consults
//! wall-clock time or randomness.

pub mod boundary;
pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod hull;
pub mod markers;
pub mod planner;
pub mod roadmap;
pub mod router;
pub mod sweep;

// Re-export main types at crate root
pub use boundary::WorkingField;
pub use config::PlanConfig;
pub use error::{PlanError, Result};
pub use grid::{CoverageCell, CoverageGrid, VisitState};
pub use markers::PathMarkers;
pub use planner::{plan, PlanResult};
pub use roadmap::{Roadmap, RoadmapSegment};
pub use router::{AdjacencyGraph, ClearPathRouter};
pub use sweep::SweepDriver;
