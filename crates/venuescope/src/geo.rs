//! Great-circle distance between coordinate pairs.

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Unit for reported distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

const EARTH_RADIUS_KM: f64 = 6371.0;
const KM_PER_MILE: f64 = 1.60934;

/// Haversine distance between two points.
///
/// Inputs are taken as-is: non-finite coordinates yield a non-finite
/// distance rather than an error.
///
/// # Examples
///
/// ```rust
/// use venuescope::{Coordinates, DistanceUnit, geo};
///
/// let london = Coordinates::new(51.5074, -0.1278);
/// let paris = Coordinates::new(48.8566, 2.3522);
///
/// let km = geo::distance(london, paris, DistanceUnit::Kilometers);
/// assert!((300.0..400.0).contains(&km));
/// ```
#[must_use]
pub fn distance(from: Coordinates, to: Coordinates, unit: DistanceUnit) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lng = (to.longitude - from.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    let km = EARTH_RADIUS_KM * central_angle;
    match unit {
        DistanceUnit::Kilometers => km,
        DistanceUnit::Miles => km / KM_PER_MILE,
    }
}
