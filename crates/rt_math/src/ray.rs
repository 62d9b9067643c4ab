use crate::{Scalar, Vector};

/// A ray in 3D space with an origin and a unit direction.
///
/// The direction is normalised on construction, so the parameter `t` of
/// [`Ray::at`] is always a distance from the origin. A zero-length
/// direction produces a NaN direction, which never intersects anything.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vector,
    direction: Vector,
}

impl Ray {
    /// Create a new ray, normalising `direction`.
    #[inline]
    pub fn new(origin: Vector, direction: Vector) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vector {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Get the point along the ray at distance t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: Scalar) -> Vector {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalises_direction() {
        let ray = Ray::new(Vector::ZERO, Vector::new(0.0, 0.0, 5.0));
        assert_eq!(ray.direction(), Vector::Z);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vector::new(1.0, 0.0, 0.0), Vector::new(0.0, 2.0, 0.0));

        assert_eq!(ray.at(0.0), Vector::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), Vector::new(1.0, 2.5, 0.0));
        assert_eq!(ray.at(-1.0), Vector::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn test_degenerate_direction() {
        let ray = Ray::new(Vector::ONE, Vector::ZERO);
        assert!(ray.direction().is_nan());
    }
}
