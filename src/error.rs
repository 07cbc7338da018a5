//! Error types for the planning pipeline.

use thiserror::Error;

/// Planner error type.
///
/// Every pipeline stage reports failures through this enum; `plan()`
/// surfaces them unchanged. The sweep driver is the one exception: a
/// [`PlanError::NoPath`] from its resume routing is treated as "return the
/// current path unchanged", because partial coverage is a legitimate
/// outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The boundary conditioner clipped the whole field away.
    #[error("boundary is empty after subtracting straddling obstacles")]
    EmptyBoundary,

    /// The convex hull has fewer than three distinct vertices.
    #[error("convex hull is degenerate ({vertices} distinct vertices)")]
    DegenerateHull {
        /// Number of distinct hull vertices found.
        vertices: usize,
    },

    /// The router could not connect two points through free space.
    #[error("no clear path from ({from_lon:.6}, {from_lat:.6}) to ({to_lon:.6}, {to_lat:.6})")]
    NoPath {
        /// Longitude of the start point.
        from_lon: f64,
        /// Latitude of the start point.
        from_lat: f64,
        /// Longitude of the goal point.
        to_lon: f64,
        /// Latitude of the goal point.
        to_lat: f64,
    },

    /// A geometry primitive returned an inconsistent result.
    #[error("geometry primitive returned an inconsistent result: {0}")]
    GeometryPrecision(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Planner result type.
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanError::DegenerateHull { vertices: 2 };
        assert_eq!(err.to_string(), "convex hull is degenerate (2 distinct vertices)");
    }

    #[test]
    fn test_no_path_display() {
        let err = PlanError::NoPath {
            from_lon: 10.0,
            from_lat: 50.0,
            to_lon: 10.000001,
            to_lat: 50.0,
        };
        assert!(err.to_string().contains("10.000001"));
    }
}
