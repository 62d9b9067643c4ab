//! Geometric primitives and ray-object intersection.

use std::sync::Arc;

use rt_math::{Ray, Scalar, Vector, PRECISION};

use crate::{Material, SceneError, SceneResult};

/// Trait for physical objects that light interacts with.
pub trait Object: Send + Sync {
    /// Unit surface normal at a point on the surface.
    fn normal(&self, point: Vector) -> Vector;

    /// Distance along the ray to the nearest intersection beyond
    /// [`PRECISION`], or `None` if the ray misses.
    fn intersect(&self, ray: &Ray) -> Option<Scalar>;

    /// Material at a point on the surface.
    fn surface(&self, point: Vector) -> &Material;
}

/// Return the first candidate root that clears the precision threshold.
///
/// Candidates must be given nearest first. Non-finite roots never pass.
#[inline]
fn nearest_root(candidates: [Scalar; 2]) -> Option<Scalar> {
    candidates
        .into_iter()
        .find(|&t| t.is_finite() && t > PRECISION)
}

/// A sphere primitive.
pub struct Sphere {
    position: Vector,
    radius: Scalar,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(position: Vector, radius: Scalar, material: Arc<Material>) -> SceneResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self {
            position,
            radius,
            material,
        })
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn radius(&self) -> Scalar {
        self.radius
    }
}

impl Object for Sphere {
    fn normal(&self, point: Vector) -> Vector {
        (point - self.position).normalize()
    }

    fn intersect(&self, ray: &Ray) -> Option<Scalar> {
        let distance = self.position - ray.origin();
        let b = ray.direction().dot(distance);
        let d = b * b + self.radius * self.radius - distance.dot(distance);

        if d < 0.0 {
            return None;
        }

        let sqrtd = d.sqrt();
        // The far root covers rays starting inside the sphere.
        nearest_root([b - sqrtd, b + sqrtd])
    }

    fn surface(&self, _point: Vector) -> &Material {
        &self.material
    }
}

/// An infinite plane.
pub struct Plane {
    position: Vector,
    direction: Vector,
    material: Arc<Material>,
}

impl Plane {
    /// Create a plane through `position` with the given normal.
    pub fn new(position: Vector, normal: Vector, material: Arc<Material>) -> SceneResult<Self> {
        let direction = normal.normalize();
        if !direction.is_finite() {
            return Err(SceneError::DegeneratePlane);
        }
        Ok(Self {
            position,
            direction,
            material,
        })
    }

    pub fn position(&self) -> Vector {
        self.position
    }
}

impl Object for Plane {
    fn normal(&self, _point: Vector) -> Vector {
        self.direction
    }

    fn intersect(&self, ray: &Ray) -> Option<Scalar> {
        let f = (self.position - ray.origin()).dot(self.direction);
        let g = ray.direction().dot(self.direction);
        // Parallel rays give a non-finite t and are rejected below.
        let t = f / g;

        // A half-precision window either side absorbs jitter at grazing angles.
        nearest_root([t - PRECISION / 2.0, t + PRECISION / 2.0])
    }

    fn surface(&self, _point: Vector) -> &Material {
        &self.material
    }
}

/// A plane textured with alternating square cells of two materials.
pub struct CheckerBoard {
    plane: Plane,
    alternate: Arc<Material>,
    width: Scalar,
    u: Vector,
    v: Vector,
}

impl CheckerBoard {
    /// Create a checkerboard plane.
    ///
    /// Cells are `width` wide, measured along an in-plane basis anchored at
    /// `position`. The cell containing `position` uses `material1`.
    pub fn new(
        position: Vector,
        normal: Vector,
        width: Scalar,
        material1: Arc<Material>,
        material2: Arc<Material>,
    ) -> SceneResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(SceneError::InvalidCheckerWidth(width));
        }
        let plane = Plane::new(position, normal, material1)?;
        let (u, v) = plane.direction.any_orthonormal_pair();

        Ok(Self {
            plane,
            alternate: material2,
            width,
            u,
            v,
        })
    }
}

impl Object for CheckerBoard {
    fn normal(&self, point: Vector) -> Vector {
        self.plane.normal(point)
    }

    fn intersect(&self, ray: &Ray) -> Option<Scalar> {
        self.plane.intersect(ray)
    }

    fn surface(&self, point: Vector) -> &Material {
        let relative = point - self.plane.position;
        let column = (relative.dot(self.u) / self.width).floor() as i64;
        let row = (relative.dot(self.v) / self.width).floor() as i64;

        if (column + row).rem_euclid(2) == 0 {
            &self.plane.material
        } else {
            &self.alternate
        }
    }
}

/// Find the object with the closest intersection to the ray.
///
/// Returns the object and the distance to the intersection, or `None` if
/// nothing is hit.
pub fn closest_intersect<'a>(
    ray: &Ray,
    objects: &'a [Box<dyn Object>],
) -> Option<(&'a dyn Object, Scalar)> {
    let mut closest: Option<(&'a dyn Object, Scalar)> = None;

    for object in objects {
        if let Some(t) = object.intersect(ray) {
            if closest.map_or(true, |(_, best)| t < best) {
                closest = Some((object.as_ref(), t));
            }
        }
    }

    closest
}

/// Return whether the ray hits any object.
///
/// With a `max_distance`, hits at or beyond that distance are ignored.
pub fn intersects_any(ray: &Ray, objects: &[Box<dyn Object>], max_distance: Option<Scalar>) -> bool {
    let limit = max_distance.unwrap_or(Scalar::INFINITY);
    objects
        .iter()
        .any(|object| object.intersect(ray).is_some_and(|t| t < limit))
}
