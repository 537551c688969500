use serde::{Deserialize, Serialize};

/// A position on the unit sphere, stored as latitude/longitude in radians.
///
/// The optional altitude is carried through untouched; the grid only ever
/// looks at the angular part.
///
/// # Examples
///
/// ```
/// use parkgrid_types::SphericalPoint;
///
/// let nyc = SphericalPoint::from_degrees(40.7128, -74.0060);
/// assert!((nyc.lat() - 40.7128_f64.to_radians()).abs() < 1e-15);
/// assert_eq!(nyc.altitude(), None);
///
/// let drone = nyc.with_altitude(120.0);
/// assert_eq!(drone.altitude(), Some(120.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalPoint {
    lat: f64,
    lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    altitude: Option<f64>,
}

impl SphericalPoint {
    /// Create a point from latitude and longitude in radians.
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            altitude: None,
        }
    }

    /// Create a point from latitude and longitude in degrees.
    #[inline]
    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        Self::new(lat.to_radians(), lng.to_radians())
    }

    /// Attach an altitude (metres, or a radius fraction; the caller decides).
    #[inline]
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Latitude in radians.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in radians.
    #[inline]
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat_degrees(&self) -> f64 {
        self.lat.to_degrees()
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lng_degrees(&self) -> f64 {
        self.lng.to_degrees()
    }

    #[inline]
    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    /// Whether both angular components are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// `geo` points are (x = longitude, y = latitude) in degrees.
impl From<geo::Point<f64>> for SphericalPoint {
    fn from(point: geo::Point<f64>) -> Self {
        Self::from_degrees(point.y(), point.x())
    }
}

impl From<SphericalPoint> for geo::Point<f64> {
    fn from(point: SphericalPoint) -> Self {
        geo::Point::new(point.lng_degrees(), point.lat_degrees())
    }
}
