//! Construction-time validation errors.

use rt_math::Scalar;
use thiserror::Error;

/// Errors raised while building scene data.
///
/// Every check happens when a value is constructed, so a scene that was
/// built successfully can always be rendered.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(Scalar),

    #[error("Plane normal must be a non-zero, finite vector")]
    DegeneratePlane,

    #[error("Checker width must be positive and finite, got {0}")]
    InvalidCheckerWidth(Scalar),

    #[error("Invalid light: {0}")]
    InvalidLight(String),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    InvalidImageSize { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;
