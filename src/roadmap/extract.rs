//! Edge extraction and polyline joining for the roadmap.
//!
//! The Voronoi cells are clipped to the working boundary, their ring edges
//! harvested (minus any edge touching an obstacle), and the resulting
//! dense edge set is condensed into junction-to-junction polylines. A
//! junction is a fingerprint appearing as an endpoint of more than two
//! edges; chains ending at a degree-1 node are dropped, leaving only the
//! skeleton useful for routing.

use std::collections::{BTreeMap, BTreeSet};

use geo::{BooleanOps, BoundingRect, Intersects, LineString, Point};

use crate::boundary::WorkingField;
use crate::core::geometry::ring_edges;
use crate::core::PointKey;

use super::voronoi::voronoi_cells;
use super::{Roadmap, RoadmapSegment};

pub(crate) fn build_roadmap(field: &WorkingField) -> Roadmap {
    // Seed points: all distinct vertices of the boundary and obstacles.
    let mut seeds: BTreeMap<PointKey, Point<f64>> = BTreeMap::new();
    let rings = std::iter::once(field.boundary.exterior())
        .chain(field.obstacles.iter().map(|o| o.exterior()));
    for ring in rings {
        let coords = &ring.0;
        for &c in &coords[..coords.len().saturating_sub(1)] {
            seeds.entry(PointKey::of_coord(c)).or_insert_with(|| Point::from(c));
        }
    }
    let seed_points: Vec<Point<f64>> = seeds.into_values().collect();

    let bbox = match field.boundary.bounding_rect() {
        Some(r) => r,
        None => return outline_roadmap(field),
    };
    if seed_points.len() < 3 {
        return outline_roadmap(field);
    }

    // Harvest clipped cell edges, deduplicated by fingerprint pair.
    let mut edge_keys: BTreeSet<(PointKey, PointKey)> = BTreeSet::new();
    let mut edges: Vec<(Point<f64>, Point<f64>)> = Vec::new();
    let mut nodes: BTreeMap<PointKey, Point<f64>> = BTreeMap::new();

    for cell in voronoi_cells(&seed_points, &bbox) {
        if !cell.intersects(&field.boundary) {
            continue;
        }
        let clipped = cell.intersection(&field.boundary);
        for polygon in &clipped {
            for segment in ring_edges(polygon.exterior()) {
                let a = Point::from(segment.start);
                let b = Point::from(segment.end);
                let (ka, kb) = (PointKey::of(a), PointKey::of(b));
                if ka == kb {
                    continue;
                }
                if field.obstacles.iter().any(|o| segment.intersects(o)) {
                    continue;
                }
                let key = if ka <= kb { (ka, kb) } else { (kb, ka) };
                if edge_keys.insert(key) {
                    nodes.entry(ka).or_insert(a);
                    nodes.entry(kb).or_insert(b);
                    edges.push((a, b));
                }
            }
        }
    }

    // Junction detection: endpoints shared by more than two edges.
    let mut adjacency: BTreeMap<PointKey, Vec<usize>> = BTreeMap::new();
    for (idx, &(a, b)) in edges.iter().enumerate() {
        adjacency.entry(PointKey::of(a)).or_default().push(idx);
        adjacency.entry(PointKey::of(b)).or_default().push(idx);
    }
    let branch_points: BTreeSet<PointKey> = adjacency
        .iter()
        .filter(|(_, incident)| incident.len() > 2)
        .map(|(&key, _)| key)
        .collect();

    // Join degree-2 chains between branch points into polylines.
    let mut visited = vec![false; edges.len()];
    let mut segments = Vec::new();
    for &start in &branch_points {
        for &first_edge in &adjacency[&start] {
            if visited[first_edge] {
                continue;
            }
            if let Some(chain) = walk_chain(
                start,
                first_edge,
                &edges,
                &adjacency,
                &branch_points,
                &nodes,
                &mut visited,
            ) {
                segments.push(RoadmapSegment::new(LineString::from(chain)));
            }
        }
    }

    log::debug!(
        "roadmap: {} seeds, {} raw edges, {} junctions, {} segments",
        seed_points.len(),
        edges.len(),
        branch_points.len(),
        segments.len()
    );

    Roadmap { segments }
}

/// Follow edges from a branch point through degree-2 nodes until another
/// branch point. Returns `None` for chains that die at a dead end.
fn walk_chain(
    start: PointKey,
    first_edge: usize,
    edges: &[(Point<f64>, Point<f64>)],
    adjacency: &BTreeMap<PointKey, Vec<usize>>,
    branch_points: &BTreeSet<PointKey>,
    nodes: &BTreeMap<PointKey, Point<f64>>,
    visited: &mut [bool],
) -> Option<Vec<Point<f64>>> {
    let mut chain = vec![nodes[&start]];
    let mut current_key = start;
    let mut current_edge = first_edge;

    loop {
        visited[current_edge] = true;
        let (a, b) = edges[current_edge];
        let (ka, kb) = (PointKey::of(a), PointKey::of(b));
        let (next_key, next_point) = if ka == current_key { (kb, b) } else { (ka, a) };
        chain.push(next_point);

        if branch_points.contains(&next_key) {
            return Some(chain);
        }

        let onward = adjacency[&next_key]
            .iter()
            .copied()
            .find(|&e| !visited[e]);
        match onward {
            Some(edge) => {
                current_key = next_key;
                current_edge = edge;
            }
            // Dead end: the roadmap keeps the junction-to-junction
            // skeleton only.
            None => return None,
        }
    }
}

/// Fallback when the Voronoi diagram is degenerate: the boundary outline
/// as a single segment.
fn outline_roadmap(field: &WorkingField) -> Roadmap {
    Roadmap {
        segments: vec![RoadmapSegment::new(field.boundary.exterior().clone())],
    }
}
