//! Spatial binning of geolocated items into a rotated lattice on the sphere.
//!
//! Items are placed in a fixed `(2c+1) × (2r+1)` grid of cells centered on
//! their spherical centroid, with cell spacing derived from how far the data
//! reaches along each local axis.
//!
//! ```rust
//! use parkgrid::{SpatialGrid, SphericalPoint};
//!
//! let spots = vec![
//!     SphericalPoint::from_degrees(40.0000, -73.0000),
//!     SphericalPoint::from_degrees(40.0001, -73.0000),
//!     SphericalPoint::from_degrees(40.0000, -73.0001),
//! ];
//! let mut grid = SpatialGrid::new(1, 1, spots, 0.0)?;
//! assert_eq!(grid.center_cell().unwrap().len(), 3);
//!
//! grid.bind(SphericalPoint::from_degrees(40.00005, -73.00005))?;
//! assert_eq!(grid.bound_count(), 4);
//! # Ok::<(), parkgrid::GridError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod spot;

pub use builder::GridBuilder;
pub use config::GridConfig;
pub use error::{GridError, Result};

pub use grid::{CellIndex, Direction, GridCell, Located, Spacing, SpatialGrid};

pub use compute::{BasisConverter, Centroid, EARTH_RADIUS_METERS, angular_distance, centroid};

pub use export::CellSummary;
pub use spot::{ParkingSpot, Placemarks};

pub use parkgrid_types::{Locatable, Location, SphericalPoint};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GridBuilder, GridConfig, GridError, Result, SpatialGrid};

    pub use crate::{CellIndex, Direction, GridCell, Located};

    pub use crate::{Locatable, Location, SphericalPoint};

    pub use crate::{ParkingSpot, Placemarks};
}
