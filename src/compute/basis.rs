//! Local cartesian frames anchored at a point on the sphere.
//!
//! A [`BasisConverter`] rotates the globe so that its origin lands on the
//! `+x` axis. In the local frame `y` points east and `z` points north of the
//! origin (before any extra rotation), so small `(y, z)` offsets read like
//! tangent-plane coordinates.

use crate::compute::sphere::{to_cartesian, to_spherical};
use nalgebra::{Matrix3, Rotation3, Vector3};
use parkgrid_types::SphericalPoint;

/// Forward and inverse rotation between world and origin-local coordinates.
///
/// The forward operator is `Rx(rotation) · Ry(lat₀) · Rz(−lng₀)`: undo the
/// origin longitude, tip the origin latitude down to the equator, then spin
/// about the primary axis. A positive rotation turns the local axes clockwise
/// on a north-up map.
///
/// # Examples
///
/// ```
/// use parkgrid::compute::basis::BasisConverter;
///
/// let lat = 40.0_f64.to_radians();
/// let lng = -73.0_f64.to_radians();
/// let converter = BasisConverter::new(lat, lng, 0.0);
///
/// let v = converter.convert(lat, lng);
/// assert!((v.x - 1.0).abs() < 1e-12);
///
/// let (back_lat, back_lng, _) = converter.revert(&v);
/// assert!((back_lat - lat).abs() < 1e-12);
/// assert!((back_lng - lng).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BasisConverter {
    origin: SphericalPoint,
    rotation: f64,
    forward: Rotation3<f64>,
    inverse: Rotation3<f64>,
}

impl BasisConverter {
    /// Build the operators for an origin (radians) and a rotation about the
    /// origin axis (radians).
    pub fn new(origin_lat: f64, origin_lng: f64, rotation: f64) -> Self {
        let azimuth = Rotation3::from_axis_angle(&Vector3::z_axis(), -origin_lng);
        let elevation = Rotation3::from_axis_angle(&Vector3::y_axis(), origin_lat);
        let roll = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation);

        let forward = roll * elevation * azimuth;
        Self {
            origin: SphericalPoint::new(origin_lat, origin_lng),
            rotation,
            forward,
            inverse: forward.inverse(),
        }
    }

    pub fn at(origin: &SphericalPoint, rotation: f64) -> Self {
        Self::new(origin.lat(), origin.lng(), rotation)
    }

    pub fn origin(&self) -> &SphericalPoint {
        &self.origin
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// The forward 3×3 operator.
    pub fn matrix(&self) -> &Matrix3<f64> {
        self.forward.matrix()
    }

    pub fn inverse_matrix(&self) -> &Matrix3<f64> {
        self.inverse.matrix()
    }

    /// Map a spherical point into the local frame.
    #[inline]
    pub fn convert(&self, lat: f64, lng: f64) -> Vector3<f64> {
        self.forward * to_cartesian(lat, lng)
    }

    #[inline]
    pub fn convert_point(&self, point: &SphericalPoint) -> Vector3<f64> {
        self.convert(point.lat(), point.lng())
    }

    /// Map a local vector back to `(lat, lng, radius_fraction)`.
    ///
    /// The zero vector has no direction and reverts to `(0.0, 0.0, 0.0)`.
    #[inline]
    pub fn revert(&self, local: &Vector3<f64>) -> (f64, f64, f64) {
        to_spherical(&(self.inverse * local))
    }

    /// Revert a tangent offset `(dy, dz)` from the origin.
    ///
    /// The offset is lifted onto the unit sphere before reverting, so an
    /// offset equal to a converted point's `(y, z)` lands back on that point.
    /// Offsets beyond the unit disc are pushed onto the great circle 90°
    /// from the origin.
    pub fn revert_offset(&self, dy: f64, dz: f64) -> SphericalPoint {
        let x = (1.0 - dy * dy - dz * dz).max(0.0).sqrt();
        let (lat, lng, _) = self.revert(&Vector3::new(x, dy, dz));
        SphericalPoint::new(lat, lng)
    }
}
