//! Great-circle math on the unit sphere.
//!
//! Coordinate convention: `x = cos(lat)·cos(lng)`, `y = cos(lat)·sin(lng)`,
//! `z = sin(lat)`. All angles are radians.

use crate::error::{GridError, Result};
use nalgebra::Vector3;
use parkgrid_types::SphericalPoint;

/// Mean Earth radius in metres (IUGG).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Mean vectors shorter than this have no meaningful direction.
const MIN_CENTROID_NORM: f64 = 1e-12;

/// Unit vector for a latitude/longitude pair.
#[inline]
pub fn to_cartesian(lat: f64, lng: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lng, cos_lng) = lng.sin_cos();
    Vector3::new(cos_lat * cos_lng, cos_lat * sin_lng, sin_lat)
}

/// Convert a cartesian vector to `(lat, lng, magnitude)`.
///
/// Only the direction determines latitude and longitude. The zero vector has
/// no direction and maps to `(0.0, 0.0, 0.0)`.
///
/// ```
/// use parkgrid::compute::sphere::{to_cartesian, to_spherical};
///
/// let v = to_cartesian(0.3, -1.2) * 2.0;
/// let (lat, lng, r) = to_spherical(&v);
/// assert!((lat - 0.3).abs() < 1e-12);
/// assert!((lng + 1.2).abs() < 1e-12);
/// assert!((r - 2.0).abs() < 1e-12);
///
/// assert_eq!(to_spherical(&nalgebra::Vector3::zeros()), (0.0, 0.0, 0.0));
/// ```
pub fn to_spherical(v: &Vector3<f64>) -> (f64, f64, f64) {
    let magnitude = v.norm();
    if magnitude == 0.0 {
        return (0.0, 0.0, 0.0);
    }

    let lat = (v.z / magnitude).clamp(-1.0, 1.0).asin();
    let lng = v.y.atan2(v.x);
    (lat, lng, magnitude)
}

/// Cosine of the central angle by the spherical law of cosines, unchecked.
#[inline]
fn raw_central_angle_cosine(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lng2 - lng1).cos()
}

/// Fails with [`GridError::InvalidAngularDistanceInput`] when rounding pushed
/// `cosine` outside `[-1, 1]`.
fn check_cosine(cosine: f64) -> Result<f64> {
    if (-1.0..=1.0).contains(&cosine) {
        Ok(cosine)
    } else {
        Err(GridError::InvalidAngularDistanceInput { cosine })
    }
}

/// Checked cosine of the central angle.
#[cfg(test)]
fn central_angle_cosine(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<f64> {
    check_cosine(raw_central_angle_cosine(lat1, lng1, lat2, lng2))
}

/// Great-circle angular distance in radians.
///
/// Coincident and antipodal points can overshoot the cosine domain by an ulp;
/// those are clamped rather than turned into NaN.
///
/// ```
/// use parkgrid::compute::sphere::angular_distance;
/// use std::f64::consts::PI;
///
/// assert!(angular_distance(0.4, 0.4, 0.4, 0.4) < 1e-7);
/// assert!((angular_distance(0.0, 0.0, 0.0, PI) - PI).abs() < 1e-12);
/// ```
pub fn angular_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let cosine = raw_central_angle_cosine(lat1, lng1, lat2, lng2);
    check_cosine(cosine)
        .unwrap_or_else(|err| {
            log::trace!("{}; clamping", err);
            cosine.clamp(-1.0, 1.0)
        })
        .acos()
}

/// [`angular_distance`] between two points.
#[inline]
pub fn angular_distance_between(a: &SphericalPoint, b: &SphericalPoint) -> f64 {
    angular_distance(a.lat(), a.lng(), b.lat(), b.lng())
}

#[inline]
pub fn angular_to_meters(radians: f64) -> f64 {
    radians * EARTH_RADIUS_METERS
}

#[inline]
pub fn meters_to_angular(meters: f64) -> f64 {
    meters / EARTH_RADIUS_METERS
}

/// Spherical centroid of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    /// Direction of the mean vector.
    pub point: SphericalPoint,
    /// Length of the mean vector, `1.0` when all points coincide and
    /// shrinking as they spread out.
    pub radius_fraction: f64,
    /// Number of points that contributed.
    pub count: usize,
}

/// Average the unit vectors of `points` and return the mean direction.
///
/// The mean is used by direction only, which is the same as renormalizing it
/// onto the unit sphere.
///
/// # Errors
///
/// - [`GridError::EmptyInput`] when `points` is empty
/// - [`GridError::UndefinedCentroid`] when the vectors cancel out
///
/// ```
/// use parkgrid::compute::sphere::centroid;
/// use parkgrid_types::SphericalPoint;
///
/// let c = centroid([
///     SphericalPoint::from_degrees(0.0, -5.0),
///     SphericalPoint::from_degrees(0.0, 5.0),
/// ])
/// .unwrap();
/// assert!(c.point.lat_degrees().abs() < 1e-12);
/// assert!(c.point.lng_degrees().abs() < 1e-12);
/// assert_eq!(c.count, 2);
/// ```
pub fn centroid<I>(points: I) -> Result<Centroid>
where
    I: IntoIterator<Item = SphericalPoint>,
{
    let mut sum = Vector3::zeros();
    let mut count = 0usize;

    for point in points {
        sum += to_cartesian(point.lat(), point.lng());
        count += 1;
    }

    if count == 0 {
        return Err(GridError::EmptyInput);
    }

    let mean = sum / count as f64;
    if mean.norm() < MIN_CENTROID_NORM {
        return Err(GridError::UndefinedCentroid);
    }

    let (lat, lng, radius_fraction) = to_spherical(&mean);
    Ok(Centroid {
        point: SphericalPoint::new(lat, lng),
        radius_fraction,
        count,
    })
}
