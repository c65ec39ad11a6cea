//! Geographic coordinates and great-circle distance.

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 position in decimal degrees.
///
/// # Examples
///
/// ```
/// use bike_events::domain::Coordinate;
///
/// let placa_catalunya = Coordinate::new(41.3870, 2.1700);
/// let sagrada_familia = Coordinate::new(41.4036, 2.1744);
///
/// let d = placa_catalunya.distance_to(&sagrada_familia);
/// assert!((d - 1881.0).abs() < 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from decimal degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other`, in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(*self, *other)
    }
}

/// Haversine distance between two coordinates, in meters.
///
/// Uses a spherical Earth of radius [`EARTH_RADIUS_M`]. The result is never
/// negative and is symmetric in its arguments.
#[inline]
pub fn haversine_distance(origin: Coordinate, destination: Coordinate) -> f64 {
    let origin_lat = origin.latitude.to_radians();
    let destination_lat = destination.latitude.to_radians();
    let delta_lat = (destination.latitude - origin.latitude).to_radians();
    let delta_lon = (destination.longitude - origin.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + origin_lat.cos() * destination_lat.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}
