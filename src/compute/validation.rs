//! Validation for incoming spherical coordinates.

use crate::error::{GridError, Result};
use parkgrid_types::SphericalPoint;
use std::f64::consts::{FRAC_PI_2, PI};

/// Slack for values that went through a degree/radian conversion.
const ANGLE_TOLERANCE: f64 = 1e-9;

/// Validates a point has finite, in-range latitude and longitude.
///
/// Latitude: [-π/2, π/2], Longitude: [-π, π] (radians)
///
/// # Examples
///
/// ```
/// use parkgrid::compute::validation::validate_spherical_point;
/// use parkgrid_types::SphericalPoint;
///
/// assert!(validate_spherical_point(&SphericalPoint::from_degrees(40.7, -74.0)).is_ok());
/// assert!(validate_spherical_point(&SphericalPoint::from_degrees(95.0, 0.0)).is_err());
/// assert!(validate_spherical_point(&SphericalPoint::new(f64::NAN, 0.0)).is_err());
/// ```
pub fn validate_spherical_point(point: &SphericalPoint) -> Result<()> {
    let (lat, lng) = (point.lat(), point.lng());

    if !lat.is_finite() {
        return Err(GridError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !lng.is_finite() {
        return Err(GridError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            lng
        )));
    }

    if lat.abs() > FRAC_PI_2 + ANGLE_TOLERANCE {
        return Err(GridError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat.to_degrees()
        )));
    }

    if lng.abs() > PI + ANGLE_TOLERANCE {
        return Err(GridError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lng.to_degrees()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poles_and_antimeridian_are_valid() {
        for &(lat, lng) in &[(90.0, 0.0), (-90.0, 0.0), (0.0, 180.0), (0.0, -180.0)] {
            assert!(validate_spherical_point(&SphericalPoint::from_degrees(lat, lng)).is_ok());
        }
    }

    #[test]
    fn test_out_of_range_longitude() {
        let err = validate_spherical_point(&SphericalPoint::from_degrees(0.0, 200.0)).unwrap_err();
        assert!(matches!(err, GridError::InvalidInput(msg) if msg.contains("Longitude")));
    }
}
