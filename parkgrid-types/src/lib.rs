//! # parkgrid-types
//!
//! Core geographic value types for the parkgrid binning library.
//!
//! - **Point types**: [`SphericalPoint`], a latitude/longitude pair in radians
//! - **Location types**: [`Location`], coordinates and/or a postal address
//! - **Capabilities**: [`Locatable`], anything that may expose a position
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's primitives.
//!
//! ## Examples
//!
//! ```rust
//! use parkgrid_types::{Locatable, Location, SphericalPoint};
//!
//! let mut spot = Location::new();
//! assert!(!spot.has_coords());
//!
//! spot.set_coords(40.7128, -74.0060, None); // NYC, degrees
//! let point: SphericalPoint = spot.location().unwrap();
//! assert!((point.lat_degrees() - 40.7128).abs() < 1e-12);
//! ```

pub mod location;
pub mod point;

pub use location::{Locatable, Location};
pub use point::SphericalPoint;
