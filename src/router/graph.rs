//! Adjacency graph over roadmap polylines, keyed by point fingerprints.

use std::collections::BTreeMap;

use geo::LineString;

use crate::core::geometry::polyline_length_m;
use crate::core::PointKey;

/// One directed edge of the adjacency graph.
///
/// Each physical polyline is inserted twice, once per direction, each
/// carrying its own oriented copy of the polyline so path reconstruction
/// is a plain concatenation.
#[derive(Clone, Debug)]
pub struct GraphEdge {
    /// Fingerprint of the node this edge leads to.
    pub neighbor: PointKey,
    /// Polyline length in meters; the Dijkstra edge weight.
    pub distance_m: f64,
    /// The polyline, oriented from the owning node toward `neighbor`.
    pub path: LineString<f64>,
}

/// Bidirectional adjacency graph of a (possibly temporary) roadmap.
///
/// Backed by an ordered map so iteration, and with it the whole route
/// computation, is deterministic.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyGraph {
    nodes: BTreeMap<PointKey, Vec<GraphEdge>>,
}

impl AdjacencyGraph {
    /// Build the graph from a set of polylines.
    ///
    /// Degenerate polylines (fewer than two vertices, or endpoints sharing
    /// a fingerprint) contribute nothing: a self-loop cannot shorten any
    /// route.
    pub fn from_polylines<'a, I>(polylines: I) -> Self
    where
        I: IntoIterator<Item = &'a LineString<f64>>,
    {
        let mut nodes: BTreeMap<PointKey, Vec<GraphEdge>> = BTreeMap::new();
        for line in polylines {
            if line.0.len() < 2 {
                continue;
            }
            let start = PointKey::of_coord(line.0[0]);
            let end = PointKey::of_coord(*line.0.last().expect("non-empty polyline"));
            if start == end {
                continue;
            }
            let distance_m = polyline_length_m(line);
            let mut reversed = line.clone();
            reversed.0.reverse();
            nodes.entry(start).or_default().push(GraphEdge {
                neighbor: end,
                distance_m,
                path: line.clone(),
            });
            nodes.entry(end).or_default().push(GraphEdge {
                neighbor: start,
                distance_m,
                path: reversed,
            });
        }
        Self { nodes }
    }

    /// Does the graph contain this node?
    #[inline]
    pub fn contains(&self, key: PointKey) -> bool {
        self.nodes.contains_key(&key)
    }

    /// Out-edges of a node, in insertion order.
    pub fn neighbors(&self, key: PointKey) -> &[GraphEdge] {
        self.nodes.get(&key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
