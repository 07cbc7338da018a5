//! Fundamental geometry utilities: point fingerprinting, geodesic
//! measures, and polyline helpers.

pub mod fingerprint;
pub mod geodesy;
pub mod geometry;

pub use fingerprint::{same_point, PointKey};
pub use geodesy::{bearing_deg, destination, distance_m, rotate_around, LocalFrame};
