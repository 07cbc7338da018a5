//! Dijkstra's shortest path over the adjacency graph.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use geo::{Coord, LineString};

use crate::core::PointKey;

use super::graph::AdjacencyGraph;

/// State for the priority queue.
#[derive(Clone, Copy, Debug)]
struct SearchState {
    /// Current path cost in meters.
    cost: f64,
    /// Current node.
    node: PointKey,
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for SearchState {}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the shortest path between two fingerprints.
///
/// On relaxation both the predecessor node and the oriented polyline used
/// to reach it are recorded, so the reconstructed route is a concatenation
/// of polylines rather than a chord sequence. Consecutive duplicate
/// vertices are collapsed by fingerprint.
///
/// Returns `None` when either endpoint is missing from the graph or no
/// route exists.
pub(crate) fn shortest_path(
    graph: &AdjacencyGraph,
    start: PointKey,
    goal: PointKey,
) -> Option<LineString<f64>> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(LineString::from(vec![start.to_point()]));
    }

    let mut dist: BTreeMap<PointKey, f64> = BTreeMap::new();
    let mut prev: BTreeMap<PointKey, (PointKey, LineString<f64>)> = BTreeMap::new();
    dist.insert(start, 0.0);

    let mut heap = BinaryHeap::new();
    heap.push(SearchState {
        cost: 0.0,
        node: start,
    });

    while let Some(SearchState { cost, node }) = heap.pop() {
        // Skip if we've already found a better path
        if cost > dist.get(&node).copied().unwrap_or(f64::INFINITY) {
            continue;
        }
        if node == goal {
            break;
        }
        for edge in graph.neighbors(node) {
            let new_dist = cost + edge.distance_m;
            if new_dist < dist.get(&edge.neighbor).copied().unwrap_or(f64::INFINITY) {
                dist.insert(edge.neighbor, new_dist);
                prev.insert(edge.neighbor, (node, edge.path.clone()));
                heap.push(SearchState {
                    cost: new_dist,
                    node: edge.neighbor,
                });
            }
        }
    }

    if !prev.contains_key(&goal) {
        return None;
    }

    // Reconstruct by walking predecessors, prepending each polyline.
    let mut pieces: Vec<&LineString<f64>> = Vec::new();
    let mut current = goal;
    while current != start {
        let (predecessor, polyline) = prev.get(&current)?;
        pieces.push(polyline);
        current = *predecessor;
    }
    pieces.reverse();

    let mut coords: Vec<Coord<f64>> = Vec::new();
    for piece in pieces {
        for &c in &piece.0 {
            let duplicate = coords
                .last()
                .map_or(false, |&last| PointKey::of_coord(last) == PointKey::of_coord(c));
            if !duplicate {
                coords.push(c);
            }
        }
    }
    Some(LineString::from(coords))
}
