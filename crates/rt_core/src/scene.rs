//! Scene container: the objects and lights a renderer reads from.

use crate::{Light, Object};

/// A collection of objects and lights.
///
/// The scene is assembled up front and read concurrently while rendering.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Object>>,
    lights: Vec<Box<dyn Light>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: impl Object + 'static) {
        self.objects.push(Box::new(object));
        log::debug!("Scene: added object #{}", self.objects.len());
    }

    pub fn add_light(&mut self, light: impl Light + 'static) {
        log::debug!(
            "Scene: added light #{} ({} samples)",
            self.lights.len() + 1,
            light.samples()
        );
        self.lights.push(Box::new(light));
    }

    pub fn objects(&self) -> &[Box<dyn Object>] {
        &self.objects
    }

    pub fn lights(&self) -> &[Box<dyn Light>] {
        &self.lights
    }

    /// Total number of shadow rays cast per shaded point.
    pub fn light_samples(&self) -> usize {
        self.lights.iter().map(|light| light.samples()).sum()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects.len())
            .field("lights", &self.lights.len())
            .finish()
    }
}
