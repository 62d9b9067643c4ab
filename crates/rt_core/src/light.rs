//! Light sources and local illumination.

use rand::distributions::{Distribution, Uniform};
use rand::RngCore;
use rt_math::{Ray, Scalar, Vector};

use crate::object::intersects_any;
use crate::{Colour, Counters, Material, Object, SceneError, SceneResult};

/// Upper bound on the number of shadow samples a soft light takes.
pub const MAX_SOFT_LIGHT_SAMPLES: usize = 256;

/// A shaded point on a surface.
#[derive(Clone, Copy)]
pub struct SurfacePoint<'a> {
    /// Point of intersection
    pub point: Vector,
    /// Unit surface normal at the point
    pub normal: Vector,
    /// Unit direction from the point back toward the viewer
    pub to_viewer: Vector,
    /// Material at the point
    pub material: &'a Material,
}

/// Trait for light sources.
pub trait Light: Send + Sync {
    /// Calculate the additive lighting contribution at a surface point.
    ///
    /// Lights perform their own shadow tests against `objects` and return
    /// black when fully occluded.
    fn shade(
        &self,
        surface: &SurfacePoint,
        objects: &[Box<dyn Object>],
        rng: &mut dyn RngCore,
        counters: &dyn Counters,
    ) -> Colour;

    /// Number of shadow samples taken per shade call.
    fn samples(&self) -> usize {
        1
    }
}

/// Lambert plus Blinn-Phong shading for light arriving along `direction`.
fn local_illumination(surface: &SurfacePoint, illumination: Colour, direction: Vector) -> Colour {
    let material = surface.material;

    let lambert = surface.normal.dot(direction).max(0.0);
    let mut output = illumination * material.diffuse() * lambert;

    let bisector = (surface.to_viewer + direction).normalize();
    let phong = surface.normal.dot(bisector).max(0.0).powf(material.shininess());
    output += illumination * material.specular() * phong;

    output
}

/// Shadow-test and shade a single light sample at `origin`.
///
/// With a `max_distance`, only occluders nearer than it block the sample.
fn sample_light(
    surface: &SurfacePoint,
    origin: Vector,
    illumination: Colour,
    objects: &[Box<dyn Object>],
    max_distance: Option<Scalar>,
    counters: &dyn Counters,
) -> Colour {
    let ray = Ray::new(surface.point, origin - surface.point);

    if intersects_any(&ray, objects, max_distance) {
        return Colour::BLACK;
    }

    counters.light_sample();
    local_illumination(surface, illumination, ray.direction())
}

/// A point light source.
#[derive(Debug, Clone)]
pub struct PointLight {
    position: Vector,
    colour: Colour,
}

impl PointLight {
    pub fn new(position: Vector, colour: Colour) -> Self {
        Self { position, colour }
    }

    pub fn position(&self) -> Vector {
        self.position
    }
}

impl Light for PointLight {
    fn shade(
        &self,
        surface: &SurfacePoint,
        objects: &[Box<dyn Object>],
        _rng: &mut dyn RngCore,
        counters: &dyn Counters,
    ) -> Colour {
        let illumination = self.colour * surface.material.colour();
        // Anything along the shadow ray counts, even past the light.
        sample_light(surface, self.position, illumination, objects, None, counters)
    }
}

/// A round area light approximated by jittered point samples.
///
/// Each shade call casts `samples` shadow rays toward points offset from
/// the light's position by up to `radius` on each axis, producing soft
/// shadow penumbrae.
#[derive(Debug, Clone)]
pub struct SoftLight {
    position: Vector,
    colour: Colour,
    radius: Scalar,
    samples: usize,
    jitter: Uniform<Scalar>,
}

impl SoftLight {
    /// Create a soft light whose sample count grows with the cube of its radius.
    pub fn new(position: Vector, colour: Colour, radius: Scalar) -> SceneResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(SceneError::InvalidLight(format!(
                "radius must be finite and >= 0, got {radius}"
            )));
        }
        Ok(Self {
            position,
            colour,
            radius,
            samples: Self::sample_count(radius),
            jitter: Uniform::new_inclusive(-radius, radius),
        })
    }

    /// Override the sample count chosen from the radius.
    pub fn with_samples(mut self, samples: usize) -> SceneResult<Self> {
        if samples == 0 {
            return Err(SceneError::InvalidLight("sample count must be at least 1".into()));
        }
        self.samples = samples;
        Ok(self)
    }

    /// Number of samples taken for a light of the given radius.
    pub fn sample_count(radius: Scalar) -> usize {
        let volume = radius.max(0.0).powi(3) / 4.0;
        let samples = 1.0 + volume.ceil();
        if samples >= MAX_SOFT_LIGHT_SAMPLES as Scalar {
            MAX_SOFT_LIGHT_SAMPLES
        } else {
            samples as usize
        }
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn radius(&self) -> Scalar {
        self.radius
    }
}

impl Light for SoftLight {
    fn shade(
        &self,
        surface: &SurfacePoint,
        objects: &[Box<dyn Object>],
        rng: &mut dyn RngCore,
        counters: &dyn Counters,
    ) -> Colour {
        let illumination = (self.colour * surface.material.colour()) / self.samples as Scalar;
        let mut output = Colour::BLACK;

        for _ in 0..self.samples {
            let offset = Vector::new(
                self.jitter.sample(rng),
                self.jitter.sample(rng),
                self.jitter.sample(rng),
            );
            let origin = self.position + offset;
            let distance = (origin - surface.point).length();
            output += sample_light(surface, origin, illumination, objects, Some(distance), counters);
        }

        output
    }

    fn samples(&self) -> usize {
        self.samples
    }
}
