//! Geodesic measures and tangent-frame rotation.
//!
//! All geometry in this crate is carried in geographic coordinates
//! (longitude/latitude, degrees) while distances, bearings, and areas are
//! measured in meters. Haversine measures cover point-to-point queries;
//! shape-preserving operations (rotation about a pivot, metric grid
//! construction) go through a local equirectangular tangent frame anchored
//! at the pivot, so a square stays square in meters rather than in
//! degrees.

use geo::{Bearing, Coord, Destination, Distance, Haversine, MapCoords, Point};

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Distance between two points in meters.
#[inline]
pub fn distance_m(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine::distance(a, b)
}

/// Geographic bearing from `a` to `b` in degrees, normalized to [0, 360).
///
/// North is 0°, East is 90°.
#[inline]
pub fn bearing_deg(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine::bearing(a, b).rem_euclid(360.0)
}

/// Point reached by travelling `meters` from `origin` on `bearing` degrees.
#[inline]
pub fn destination(origin: Point<f64>, bearing: f64, meters: f64) -> Point<f64> {
    Haversine::destination(origin, bearing, meters)
}

/// Local equirectangular tangent frame anchored at an origin point.
///
/// Converts between degrees and meters with the longitude axis scaled by
/// the cosine of the origin latitude. Adequate for field-sized geometry
/// (hundreds of meters); consistent with the haversine measures to first
/// order.
#[derive(Clone, Copy, Debug)]
pub struct LocalFrame {
    origin: Coord<f64>,
    meters_per_deg_lon: f64,
    meters_per_deg_lat: f64,
}

impl LocalFrame {
    /// Create a frame anchored at `origin`.
    pub fn new(origin: Point<f64>) -> Self {
        let meters_per_deg_lat = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        Self {
            origin: origin.0,
            meters_per_deg_lon: meters_per_deg_lat * origin.y().to_radians().cos(),
            meters_per_deg_lat,
        }
    }

    /// Meters of easting per degree of longitude at the origin latitude.
    #[inline]
    pub fn meters_per_deg_lon(&self) -> f64 {
        self.meters_per_deg_lon
    }

    /// Meters of northing per degree of latitude.
    #[inline]
    pub fn meters_per_deg_lat(&self) -> f64 {
        self.meters_per_deg_lat
    }

    /// Project a geographic coordinate into the frame (meters).
    #[inline]
    pub fn to_local(&self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (c.x - self.origin.x) * self.meters_per_deg_lon,
            y: (c.y - self.origin.y) * self.meters_per_deg_lat,
        }
    }

    /// Unproject a frame coordinate (meters) back to degrees.
    #[inline]
    pub fn from_local(&self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.origin.x + c.x / self.meters_per_deg_lon,
            y: self.origin.y + c.y / self.meters_per_deg_lat,
        }
    }
}

/// Rotate a geometry about a pivot by `clockwise_deg` degrees.
///
/// Positive angles rotate clockwise, matching compass bearings: rotating a
/// segment of bearing θ by −θ leaves it pointing north. The rotation is
/// performed in the pivot's tangent frame, so shapes are preserved in
/// meters.
pub fn rotate_around<G>(geometry: &G, pivot: Point<f64>, clockwise_deg: f64) -> G
where
    G: MapCoords<f64, f64, Output = G>,
{
    let frame = LocalFrame::new(pivot);
    let (sin_a, cos_a) = clockwise_deg.to_radians().sin_cos();
    geometry.map_coords(|c| {
        let l = frame.to_local(c);
        frame.from_local(Coord {
            x: l.x * cos_a + l.y * sin_a,
            y: -l.x * sin_a + l.y * cos_a,
        })
    })
}
