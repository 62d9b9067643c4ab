//! Recursive ray tracer with adaptive supersampling.
//!
//! Rendering runs in two parallel phases:
//!
//! 1. One sample at the centre of every pixel, plus a one pixel border
//!    around the image so that edge pixels have a full neighbourhood.
//! 2. Every pixel whose sample differs too much from any of its eight
//!    neighbours is recursively supersampled with [`Renderer::render_region`].
//!
//! Each unit of work draws from its own seeded generator, so output is
//! identical from run to run regardless of thread count.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::RngCore;
use rayon::prelude::*;
use rt_core::raster::{coords, index};
use rt_core::sampling::stream_rng;
use rt_core::{closest_intersect, Camera, Colour, Counters, Image, NullCounters, Scene, SurfacePoint};
use rt_math::{Matrix, MatrixExt, Ray, Scalar, Vector};

use crate::{RenderConfig, RenderResult};

/// Offsets of the eight neighbours of a pixel.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Summary of the work done by [`Renderer::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Coarse samples taken in the first phase, border included
    pub samples: usize,
    /// Pixels that were supersampled in the second phase
    pub refined: usize,
}

/// Renders a scene through a camera.
///
/// The renderer owns the scene and camera for its lifetime; neither can
/// change while rendering.
pub struct Renderer {
    scene: Scene,
    camera: Camera,
    config: RenderConfig,
    counters: Arc<dyn Counters>,
}

impl Renderer {
    /// Create a renderer. Fails if the configuration is out of range.
    pub fn new(scene: Scene, camera: Camera, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self {
            scene,
            camera,
            config,
            counters: Arc::new(NullCounters),
        })
    }

    /// Report statistics to `counters`, registering the scene's objects
    /// and lights with it.
    pub fn with_counters(mut self, counters: Arc<dyn Counters>) -> Self {
        for _ in self.scene.objects() {
            counters.object_registered();
        }
        for light in self.scene.lights() {
            counters.light_registered(light.samples() as u64);
        }
        log::debug!(
            "Registered {} objects and {} lights with counters",
            self.scene.objects().len(),
            self.scene.lights().len()
        );
        self.counters = counters;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Compute the colour seen along a ray.
    ///
    /// `depth` is the number of reflections already followed.
    pub fn trace(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Colour {
        self.counters.trace();

        let objects = self.scene.objects();
        let Some((object, t)) = closest_intersect(ray, objects) else {
            return self.config.background.colour(ray);
        };

        let point = ray.at(t);
        let normal = object.normal(point);
        let to_viewer = (ray.origin() - point).normalize();
        let material = object.surface(point);
        let surface = SurfacePoint {
            point,
            normal,
            to_viewer,
            material,
        };

        let mut colour = material.colour() * material.ambient();
        for light in self.scene.lights() {
            colour += light.shade(&surface, objects, rng, self.counters.as_ref());
        }

        if depth < self.config.max_ray_depth && material.reflectivity() > 0.0 {
            let reflection = normal * (2.0 * normal.dot(to_viewer)) - to_viewer;
            let reflected = self.trace(&Ray::new(point, reflection), depth + 1, rng);
            colour += reflected * material.reflectivity();
        }

        colour
    }

    /// Sample the scene at image-space point `(x, y)`, averaging one ray per
    /// depth of field sample.
    pub fn render_point(&self, x: Scalar, y: Scalar, transform: &Matrix, rng: &mut dyn RngCore) -> Colour {
        let film = transform.apply(Vector::new(x, y, 0.0)).truncate();
        let focus = self.camera.focus_point(film);
        let lens = self.camera.lens();

        let mut colour = Colour::BLACK;
        for _ in 0..self.config.num_dof_samples {
            let aperture = lens.sample_aperture(rng);
            colour += self.trace(&self.camera.lens_ray(film, focus, aperture), 0, rng);
        }
        colour / self.config.num_dof_samples as Scalar
    }

    /// Supersample the square region with corner `(x, y)` and side `size`.
    ///
    /// The region is split into four quadrants, each sampled at its centre.
    /// Quadrants that differ from the mean by more than the sub-pixel
    /// threshold are refined recursively, up to the configured depth, with a
    /// region a quarter of this one's side anchored at the quadrant corner.
    pub fn render_region(
        &self,
        x: Scalar,
        y: Scalar,
        size: Scalar,
        depth: u32,
        transform: &Matrix,
        rng: &mut dyn RngCore,
    ) -> Colour {
        let half = size / 2.0;
        let centre = half / 2.0;
        let quadrants = [(x, y), (x + half, y), (x, y + half), (x + half, y + half)];

        let mut samples =
            quadrants.map(|(qx, qy)| self.render_point(qx + centre, qy + centre, transform, rng));
        let mean = samples.iter().copied().sum::<Colour>() / 4.0;

        if depth >= self.config.max_subpixel_depth {
            return mean;
        }

        for (sample, (qx, qy)) in samples.iter_mut().zip(quadrants) {
            if mean.diff(sample) > self.config.subpixel_diff_threshold {
                if self.config.debug.highlight_recursive_regions {
                    return self.config.debug.highlight_colour;
                }
                *sample = self.render_region(qx, qy, size / 4.0, depth + 1, transform, rng);
            }
        }

        samples.into_iter().sum::<Colour>() / 4.0
    }

    /// Render the whole image.
    pub fn render(&self, image: &mut Image) -> RenderStats {
        let (width, height) = (image.width(), image.height());
        let transform = self.camera.image_transform(width, height);
        let seed = self.config.seed;

        log::info!(
            "Rendering {}x{} image: {} objects, {} lights ({} light samples)",
            width,
            height,
            self.scene.objects().len(),
            self.scene.lights().len(),
            self.scene.light_samples()
        );

        // Phase 1: coarse samples over the bordered grid.
        let start = Instant::now();
        let bordered_width = width + 2;
        let bordered_size = bordered_width * (height + 2);
        let sampled: Vec<Colour> = (0..bordered_size)
            .into_par_iter()
            .map(|i| {
                let (bx, by) = coords(i, bordered_width);
                let mut rng = stream_rng(seed, i as u64);
                // Bordered (bx, by) is image pixel (bx - 1, by - 1).
                self.render_point(bx as Scalar - 0.5, by as Scalar - 0.5, &transform, &mut rng)
            })
            .collect();
        log::info!("Sampled {} points in {:.2?}", bordered_size, start.elapsed());

        // Phase 2: refine pixels that differ from their neighbours.
        let start = Instant::now();
        let refined = AtomicUsize::new(0);
        let pixels: Vec<Colour> = (0..image.size())
            .into_par_iter()
            .map(|i| {
                let (x, y) = coords(i, width);
                let (bx, by) = (x + 1, y + 1);
                let coarse = sampled[index(bx, by, bordered_width)];

                let edge = NEIGHBOURS.iter().any(|&(dx, dy)| {
                    let nx = (bx as isize + dx) as usize;
                    let ny = (by as isize + dy) as usize;
                    coarse.diff(&sampled[index(nx, ny, bordered_width)]) > self.config.pixel_diff_threshold
                });
                if !edge {
                    return coarse;
                }

                refined.fetch_add(1, Ordering::Relaxed);
                if self.config.debug.highlight_refined_pixels {
                    return self.config.debug.highlight_colour;
                }
                let mut rng = stream_rng(seed, (bordered_size + i) as u64);
                self.render_region(x as Scalar, y as Scalar, 1.0, 0, &transform, &mut rng)
            })
            .collect();

        let refined = refined.into_inner();
        log::info!(
            "Supersampled {} of {} pixels in {:.2?}",
            refined,
            pixels.len(),
            start.elapsed()
        );

        for (i, colour) in pixels.iter().enumerate() {
            image.set_index(i, colour);
        }

        RenderStats {
            samples: bordered_size,
            refined,
        }
    }
}
