//! Error types for renderer construction.

use rt_core::SceneError;
use thiserror::Error;

/// Errors that can occur while setting up a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
