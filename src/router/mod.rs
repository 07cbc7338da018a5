//! Clear-path router: direct line if free, else a roadmap detour.
//!
//! A query first tries the straight segment. When that crosses the
//! forbidden region (outside the boundary, or through an obstacle) both
//! endpoints are stitched onto their nearest roadmap segments, the landing
//! segments are split so the roadmap gains a node exactly at each stitch
//! point, and Dijkstra runs over the resulting temporary graph.

mod dijkstra;
mod graph;

pub use graph::{AdjacencyGraph, GraphEdge};

use geo::{LineString, Point};

use crate::boundary::WorkingField;
use crate::core::geometry::{nearest_point_on, point_segment_distance_sq, ring_edges, split_at};
use crate::core::{distance_m, same_point, PointKey};
use crate::error::{PlanError, Result};
use crate::roadmap::Roadmap;

/// Router over a conditioned field and its roadmap.
pub struct ClearPathRouter<'a> {
    field: &'a WorkingField,
    roadmap: &'a Roadmap,
}

/// Where an endpoint landed on the roadmap.
struct Stitch {
    segment_idx: usize,
    landing: Point<f64>,
}

impl<'a> ClearPathRouter<'a> {
    /// Create a router borrowing the field and roadmap.
    pub fn new(field: &'a WorkingField, roadmap: &'a Roadmap) -> Self {
        Self { field, roadmap }
    }

    /// Find a clear polyline from `start` to `end`.
    ///
    /// Fails with [`PlanError::NoPath`] when an endpoint cannot be
    /// stitched onto the roadmap or no route exists through it.
    pub fn route(&self, start: Point<f64>, end: Point<f64>) -> Result<LineString<f64>> {
        if self.field.segment_is_clear(start, end) {
            return Ok(LineString::from(vec![start, end]));
        }

        let from = self.stitch(start).ok_or_else(|| no_path(start, end))?;
        let to = self.stitch(end).ok_or_else(|| no_path(start, end))?;

        // Temporary roadmap: originals minus the landing segments, plus
        // their split pieces, plus the stitch segments.
        let mut polylines: Vec<LineString<f64>> = Vec::new();
        for (idx, segment) in self.roadmap.segments.iter().enumerate() {
            if idx != from.segment_idx && idx != to.segment_idx {
                polylines.push(segment.path.clone());
            }
        }
        if from.segment_idx == to.segment_idx {
            let landing_path = &self.roadmap.segments[from.segment_idx].path;
            let (first, second) = split_at(landing_path, from.landing);
            // Split whichever piece carries the second landing
            if planar_distance_sq(&first, to.landing) <= planar_distance_sq(&second, to.landing) {
                let (a, b) = split_at(&first, to.landing);
                polylines.extend([a, b, second]);
            } else {
                let (a, b) = split_at(&second, to.landing);
                polylines.extend([first, a, b]);
            }
        } else {
            let (a, b) = split_at(&self.roadmap.segments[from.segment_idx].path, from.landing);
            polylines.extend([a, b]);
            let (c, d) = split_at(&self.roadmap.segments[to.segment_idx].path, to.landing);
            polylines.extend([c, d]);
        }
        if !same_point(start, from.landing) {
            polylines.push(LineString::from(vec![start, from.landing]));
        }
        if !same_point(end, to.landing) {
            polylines.push(LineString::from(vec![to.landing, end]));
        }

        let graph = AdjacencyGraph::from_polylines(polylines.iter());
        dijkstra::shortest_path(&graph, PointKey::of(start), PointKey::of(end))
            .ok_or_else(|| no_path(start, end))
    }

    /// Shortest clear stitch from `p` onto any roadmap segment.
    fn stitch(&self, p: Point<f64>) -> Option<Stitch> {
        let mut best: Option<(f64, Stitch)> = None;
        for (segment_idx, segment) in self.roadmap.segments.iter().enumerate() {
            let Some(landing) = nearest_point_on(&segment.path, p) else {
                continue;
            };
            if !self.field.segment_is_clear(p, landing) {
                continue;
            }
            let d = distance_m(p, landing);
            if best.as_ref().map_or(true, |(best_d, _)| d < *best_d) {
                best = Some((d, Stitch { segment_idx, landing }));
            }
        }
        best.map(|(_, stitch)| stitch)
    }
}

/// Smallest planar distance from a point to any sub-segment of a polyline.
fn planar_distance_sq(line: &LineString<f64>, p: Point<f64>) -> f64 {
    ring_edges(line)
        .map(|seg| point_segment_distance_sq(p, seg))
        .fold(f64::INFINITY, f64::min)
}

fn no_path(from: Point<f64>, to: Point<f64>) -> PlanError {
    PlanError::NoPath {
        from_lon: from.x(),
        from_lat: from.y(),
        to_lon: to.x(),
        to_lat: to.y(),
    }
}
