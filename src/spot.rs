//! Parking spot records as delivered by the placemark feed.
//!
//! A feed document looks like
//! `{"placemarks": [{"coordinates": [lat, lng, alt], "name": ...}, ...]}` with
//! coordinates in degrees. Fields other than `coordinates` are kept verbatim.

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::grid::SpatialGrid;
use parkgrid_types::{Locatable, Location, SphericalPoint};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One placemark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    /// `[lat°, lng°]` or `[lat°, lng°, altitude]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,

    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ParkingSpot {
    pub fn new(lat_degrees: f64, lng_degrees: f64) -> Self {
        Self {
            coordinates: Some(vec![lat_degrees, lng_degrees]),
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The spot's `name` property, when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.property("name").and_then(Value::as_str)
    }

    /// Resolve the coordinate array into a [`Location`]. Arrays shorter than
    /// two entries leave the location without coordinates.
    pub fn to_location(&self) -> Location {
        let mut location = Location::new();
        if let Some(coordinates) = &self.coordinates {
            location.set_from_coordinates(coordinates);
        }
        location
    }
}

impl Locatable for ParkingSpot {
    fn location(&self) -> Option<SphericalPoint> {
        self.to_location().location()
    }
}

/// A placemark feed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placemarks {
    #[serde(default)]
    pub placemarks: Vec<ParkingSpot>,
}

impl Placemarks {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| GridError::InvalidInput(format!("Failed to parse placemarks: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.placemarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placemarks.is_empty()
    }

    /// Bin every placemark into a grid built with `config`.
    pub fn into_grid(self, config: GridConfig) -> Result<SpatialGrid<ParkingSpot>> {
        log::debug!("binning {} placemarks", self.placemarks.len());
        SpatialGrid::with_config(config, self.placemarks)
    }
}

impl IntoIterator for Placemarks {
    type Item = ParkingSpot;
    type IntoIter = std::vec::IntoIter<ParkingSpot>;

    fn into_iter(self) -> Self::IntoIter {
        self.placemarks.into_iter()
    }
}
