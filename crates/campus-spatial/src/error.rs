//! Spatial-subsystem error type.
//!
//! A missing route is not an error: routing returns `Ok(None)` for an empty
//! graph or disconnected endpoints.

use thiserror::Error;

use campus_core::{CoreError, VertexId};

/// Errors produced by `campus-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("vertex {0} not found in network")]
    VertexNotFound(VertexId),

    #[error("route search cancelled")]
    Cancelled,

    #[error("route search exceeded its {limit_ms} ms limit")]
    TimedOut { limit_ms: u64 },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "geojson")]
    #[error("GeoJSON parse error: {0}")]
    GeoJson(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
