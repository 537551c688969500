//! Error types for grid construction and queries.

use thiserror::Error;

/// Errors raised while building or feeding a [`SpatialGrid`](crate::SpatialGrid).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// No item with usable coordinates was available to compute a centroid.
    #[error("no located points available to compute a centroid")]
    EmptyInput,

    /// Every located item projects onto the origin, so the spacing would be zero.
    #[error("all located points coincide; grid spacing would be zero")]
    DegenerateExtent,

    /// The located items cancel out and the mean direction has no length.
    #[error("located points cancel out; centroid direction is undefined")]
    UndefinedCentroid,

    /// Cosine argument outside `[-1, 1]`. Recovered by clamping inside
    /// [`angular_distance`](crate::compute::sphere::angular_distance).
    #[error("cosine argument {cosine} outside [-1, 1]")]
    InvalidAngularDistanceInput { cosine: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
