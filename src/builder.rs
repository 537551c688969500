//! Grid builder
//!
//! Fluent construction of a [`SpatialGrid`] when more than the half-widths
//! and rotation need setting.

use crate::config::GridConfig;
use crate::error::Result;
use crate::grid::SpatialGrid;
use parkgrid_types::Locatable;

/// Builder for grid configuration.
///
/// ```rust
/// use parkgrid::GridBuilder;
/// use parkgrid_types::SphericalPoint;
///
/// let grid = GridBuilder::new()
///     .columns(1)
///     .rows(1)
///     .min_spacing_meters(50.0)
///     .build(vec![
///         SphericalPoint::from_degrees(51.50, -0.12),
///         SphericalPoint::from_degrees(51.52, -0.10),
///     ])?;
/// assert_eq!(grid.dimensions(), (3, 3));
/// # Ok::<(), parkgrid::GridError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    config: GridConfig,
}

impl GridBuilder {
    /// Start from [`GridConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns on each side of the center column.
    pub fn columns(mut self, columns: usize) -> Self {
        self.config.columns = columns;
        self
    }

    /// Rows on each side of the center row.
    pub fn rows(mut self, rows: usize) -> Self {
        self.config.rows = rows;
        self
    }

    /// Clockwise rotation of the lattice axes in degrees.
    pub fn rotation_offset_degrees(mut self, degrees: f64) -> Self {
        self.config.rotation_offset_degrees = degrees;
        self
    }

    pub fn min_spacing_meters(mut self, meters: f64) -> Self {
        self.config.min_spacing_meters = meters;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the lattice over `items` and bin them.
    pub fn build<T, I>(self, items: I) -> Result<SpatialGrid<T>>
    where
        T: Locatable,
        I: IntoIterator<Item = T>,
    {
        SpatialGrid::with_config(self.config, items)
    }

    /// An empty grid that builds its lattice on the first successful `bind`.
    pub fn empty<T: Locatable>(self) -> Result<SpatialGrid<T>> {
        SpatialGrid::empty(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use parkgrid_types::SphericalPoint;

    #[test]
    fn test_builder_default() {
        let builder = GridBuilder::new();
        assert_eq!(builder.config, GridConfig::default());
    }

    #[test]
    fn test_builder_setters() {
        let builder = GridBuilder::new()
            .columns(4)
            .rows(2)
            .rotation_offset_degrees(30.0)
            .min_spacing_meters(10.0);
        assert_eq!(
            builder.config,
            GridConfig::new(4, 2)
                .with_rotation_offset_degrees(30.0)
                .with_min_spacing_meters(10.0)
        );
    }

    #[test]
    fn test_builder_with_config() {
        let config = GridConfig::new(0, 3);
        let grid = GridBuilder::new()
            .config(config.clone())
            .build(vec![
                SphericalPoint::from_degrees(10.0, 10.0),
                SphericalPoint::from_degrees(11.0, 10.0),
            ])
            .unwrap();
        assert_eq!(grid.config(), &config);
        assert_eq!(grid.dimensions(), (1, 7));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let err = GridBuilder::new()
            .rotation_offset_degrees(f64::INFINITY)
            .empty::<SphericalPoint>()
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_empty() {
        let grid = GridBuilder::new().empty::<SphericalPoint>().unwrap();
        assert!(!grid.is_built());
        assert!(grid.is_empty());
    }
}
