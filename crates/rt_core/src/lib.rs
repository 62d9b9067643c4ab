//! rt Core - Scene model for the rt ray tracer.
//!
//! This crate provides:
//!
//! - **Shading types**: `Colour`, `Pixel`, `Material`
//! - **Geometry**: the `Object` trait with `Sphere`, `Plane` and `CheckerBoard`
//! - **Lighting**: the `Light` trait with `PointLight` and `SoftLight`
//! - **Viewing**: `Lens` and `Camera`
//! - **Output**: the `Image` pixel buffer
//! - **Instrumentation**: the `Counters` trait and `AtomicCounters`
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rt_core::{Colour, Material, PointLight, Scene, Sphere};
//! use rt_math::Vector;
//!
//! let red = Arc::new(Material::new(Colour::from_hex(0xff0000), 0.0, 1.0, 0.2, 10.0, 0.0)?);
//! let mut scene = Scene::new();
//! scene.add_object(Sphere::new(Vector::ZERO, 50.0, red)?);
//! scene.add_light(PointLight::new(Vector::new(0.0, 100.0, -200.0), Colour::WHITE));
//! ```

pub mod camera;
pub mod error;
pub mod graphics;
pub mod light;
pub mod material;
pub mod object;
pub mod profiling;
pub mod raster;
pub mod sampling;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, Lens};
pub use error::{SceneError, SceneResult};
pub use graphics::{Colour, Pixel, PIXEL_MAX};
pub use light::{Light, PointLight, SoftLight, SurfacePoint, MAX_SOFT_LIGHT_SAMPLES};
pub use material::Material;
pub use object::{closest_intersect, intersects_any, CheckerBoard, Object, Plane, Sphere};
pub use profiling::{AtomicCounters, Counters, NullCounters, PerformanceReport};
pub use raster::Image;
pub use scene::Scene;
