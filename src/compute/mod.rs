//! Numeric building blocks: great-circle math, local bases and validation.

pub mod basis;
pub mod sphere;
pub mod validation;

pub use basis::BasisConverter;
pub use sphere::{Centroid, EARTH_RADIUS_METERS, angular_distance, centroid};
