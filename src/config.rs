//! Grid configuration
//!
//! Serializable construction parameters for a [`SpatialGrid`](crate::SpatialGrid),
//! loadable from JSON (and TOML with the `toml` feature).

use crate::compute::sphere::meters_to_angular;
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Upper bound on lattice size; keeps `(2c+1)·(2r+1)` far from overflow and
/// the arena allocation sane.
pub const MAX_CELLS: usize = 1 << 22;

/// Lattice construction parameters.
///
/// `columns` and `rows` are half-widths: the lattice has `2·columns+1`
/// columns and `2·rows+1` rows around a single center cell.
///
/// # Example
///
/// ```rust
/// use parkgrid::GridConfig;
///
/// let config = GridConfig::default();
/// assert_eq!(config.lattice_columns(), 11);
///
/// let json = r#"{
///     "columns": 2,
///     "rows": 0,
///     "rotation_offset_degrees": 15.0
/// }"#;
/// let config = GridConfig::from_json(json).unwrap();
/// assert_eq!(config.cell_count(), Some(5));
/// assert_eq!(config.min_spacing_meters, 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Columns on each side of the center column
    #[serde(default = "GridConfig::default_half_width")]
    pub columns: usize,

    /// Rows on each side of the center row
    #[serde(default = "GridConfig::default_half_width")]
    pub rows: usize,

    /// Clockwise rotation of the lattice axes, in degrees
    #[serde(default)]
    pub rotation_offset_degrees: f64,

    /// Lower bound for the distance between neighbouring cell centers.
    /// Tight clusters get cells at least this far apart.
    #[serde(default = "GridConfig::default_min_spacing_meters")]
    pub min_spacing_meters: f64,
}

impl GridConfig {
    const fn default_half_width() -> usize {
        5
    }

    const fn default_min_spacing_meters() -> f64 {
        100.0
    }

    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_rotation_offset_degrees(mut self, degrees: f64) -> Self {
        self.rotation_offset_degrees = degrees;
        self
    }

    pub fn with_min_spacing_meters(mut self, meters: f64) -> Self {
        self.min_spacing_meters = meters;
        self
    }

    /// Lattice width, `2·columns+1`.
    pub fn lattice_columns(&self) -> usize {
        2 * self.columns + 1
    }

    /// Lattice height, `2·rows+1`.
    pub fn lattice_rows(&self) -> usize {
        2 * self.rows + 1
    }

    /// Total cells, or `None` if the size would overflow.
    pub fn cell_count(&self) -> Option<usize> {
        let columns = self.columns.checked_mul(2)?.checked_add(1)?;
        let rows = self.rows.checked_mul(2)?.checked_add(1)?;
        columns.checked_mul(rows)
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation_offset_degrees.to_radians()
    }

    /// Spacing floor as an angle on the unit sphere.
    pub fn min_spacing_radians(&self) -> f64 {
        meters_to_angular(self.min_spacing_meters)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        match self.cell_count() {
            None => return Err("Lattice size overflows".to_string()),
            Some(count) if count > MAX_CELLS => {
                return Err(format!(
                    "Lattice of {} cells exceeds the maximum of {}",
                    count, MAX_CELLS
                ));
            }
            Some(_) => {}
        }

        if !self.rotation_offset_degrees.is_finite() {
            return Err("Rotation offset must be finite (not NaN or infinity)".to_string());
        }

        if !self.min_spacing_meters.is_finite() {
            return Err("Minimum spacing must be finite (not NaN or infinity)".to_string());
        }
        if self.min_spacing_meters < 0.0 {
            return Err("Minimum spacing must not be negative".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: GridConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: GridConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: Self::default_half_width(),
            rows: Self::default_half_width(),
            rotation_offset_degrees: 0.0,
            min_spacing_meters: Self::default_min_spacing_meters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = GridConfig::from_json("{}").unwrap();
        assert_eq!(config, GridConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = GridConfig::new(3, 1)
            .with_rotation_offset_degrees(-20.0)
            .with_min_spacing_meters(25.0);
        let json = config.to_json().unwrap();
        assert_eq!(GridConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_negative_spacing_rejected() {
        let err = GridConfig::from_json(r#"{"min_spacing_meters": -1.0}"#).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_non_finite_rotation_rejected() {
        let config = GridConfig::default().with_rotation_offset_degrees(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_lattice_rejected() {
        assert!(GridConfig::new(usize::MAX, 1).validate().is_err());
        assert!(GridConfig::new(2048, 2048).validate().is_err());
        assert!(GridConfig::new(0, 0).validate().is_ok());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_round_trip() {
        let config = GridConfig::new(1, 4).with_rotation_offset_degrees(45.0);
        let text = config.to_toml().unwrap();
        assert_eq!(GridConfig::from_toml(&text).unwrap(), config);
    }
}
