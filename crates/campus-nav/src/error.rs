use campus_core::CoreError;
use campus_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("routing error: {0}")]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type NavResult<T> = Result<T, NavError>;
