//! Locations as handed over by collaborators, and the capability the grid
//! needs from its items.

use crate::point::SphericalPoint;
use serde::{Deserialize, Serialize};

/// Anything that may carry a position on the sphere.
///
/// The grid only bins items whose `location()` is `Some`; the rest are kept
/// but never placed in a cell.
///
/// # Examples
///
/// ```
/// use parkgrid_types::{Locatable, SphericalPoint};
///
/// struct Meter {
///     position: Option<SphericalPoint>,
/// }
///
/// impl Locatable for Meter {
///     fn location(&self) -> Option<SphericalPoint> {
///         self.position
///     }
/// }
///
/// let placed = Meter { position: Some(SphericalPoint::from_degrees(40.0, -73.0)) };
/// assert!(placed.is_located());
/// assert!(!Meter { position: None }.is_located());
/// ```
pub trait Locatable {
    /// The item's position, if it has usable coordinates.
    fn location(&self) -> Option<SphericalPoint>;

    fn is_located(&self) -> bool {
        self.location().is_some()
    }
}

impl Locatable for SphericalPoint {
    #[inline]
    fn location(&self) -> Option<SphericalPoint> {
        Some(*self)
    }
}

impl Locatable for geo::Point<f64> {
    #[inline]
    fn location(&self) -> Option<SphericalPoint> {
        Some(SphericalPoint::from(*self))
    }
}

impl<T: Locatable + ?Sized> Locatable for &T {
    #[inline]
    fn location(&self) -> Option<SphericalPoint> {
        (**self).location()
    }
}

impl<T: Locatable + ?Sized> Locatable for Box<T> {
    #[inline]
    fn location(&self) -> Option<SphericalPoint> {
        (**self).location()
    }
}

/// A place that is known by coordinates, by postal address, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    coordinates: Option<SphericalPoint>,
    #[serde(default)]
    address: Option<String>,
}

impl Location {
    /// An empty location with neither coordinates nor address.
    pub fn new() -> Self {
        Self::default()
    }

    /// A location with coordinates given in degrees.
    pub fn from_coords(lat: f64, lng: f64, altitude: Option<f64>) -> Self {
        let mut location = Self::new();
        location.set_coords(lat, lng, altitude);
        location
    }

    /// An address-only location. It stays unlocated until geocoded.
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            coordinates: None,
            address: Some(address.into()),
        }
    }

    /// Set coordinates from latitude/longitude in degrees.
    pub fn set_coords(&mut self, lat: f64, lng: f64, altitude: Option<f64>) {
        let point = SphericalPoint::from_degrees(lat, lng);
        self.coordinates = Some(match altitude {
            Some(altitude) => point.with_altitude(altitude),
            None => point,
        });
    }

    /// Populate from a raw `[lat, lng, alt?]` coordinate array in degrees.
    ///
    /// Returns `false` and leaves the location untouched when the array has
    /// fewer than two components.
    ///
    /// ```
    /// use parkgrid_types::Location;
    ///
    /// let mut location = Location::new();
    /// assert!(location.set_from_coordinates(&[40.0, -73.0, 12.5]));
    /// assert_eq!(location.coordinates().unwrap().altitude(), Some(12.5));
    ///
    /// let mut unset = Location::new();
    /// assert!(!unset.set_from_coordinates(&[40.0]));
    /// assert!(!unset.has_coords());
    /// ```
    pub fn set_from_coordinates(&mut self, coordinates: &[f64]) -> bool {
        match coordinates {
            [lat, lng, rest @ ..] => {
                self.set_coords(*lat, *lng, rest.first().copied());
                true
            }
            _ => false,
        }
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
    }

    pub fn has_coords(&self) -> bool {
        self.coordinates.is_some()
    }

    pub fn coordinates(&self) -> Option<&SphericalPoint> {
        self.coordinates.as_ref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

impl Locatable for Location {
    #[inline]
    fn location(&self) -> Option<SphericalPoint> {
        self.coordinates
    }
}

impl From<SphericalPoint> for Location {
    fn from(point: SphericalPoint) -> Self {
        Self {
            coordinates: Some(point),
            address: None,
        }
    }
}
