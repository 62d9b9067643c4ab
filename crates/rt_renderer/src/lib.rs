//! rt Renderer - recursive ray tracing with adaptive supersampling.
//!
//! Renders an [`rt_core::Scene`] through an [`rt_core::Camera`] into an
//! [`rt_core::Image`]:
//!
//! - Recursive Whitted-style tracing with mirror reflection
//! - Two-phase adaptive antialiasing (coarse pass, then recursive
//!   refinement of pixels that differ from their neighbours)
//! - Thin-lens depth of field
//! - Deterministic, seeded parallel rendering with rayon

mod config;
mod error;
mod renderer;

pub use config::{Background, DebugOptions, RenderConfig, MAX_RAY_DEPTH};
pub use error::{RenderError, RenderResult};
pub use renderer::{RenderStats, Renderer};
