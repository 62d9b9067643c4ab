// Re-export glam for convenience
pub use glam::*;

// rt math types
mod ray;
mod transform;
pub use ray::Ray;
pub use transform::{rotation, rotation_x, rotation_y, rotation_z, scale, translation, MatrixExt};

/// Scalar type used for all geometry and shading arithmetic.
pub type Scalar = f64;

/// A 3-component vector. Points and directions share this type; the
/// distinction only matters under a [`Matrix`] transform.
pub type Vector = DVec3;

/// A 4x4 row-major-constructed transformation matrix.
pub type Matrix = DMat4;

/// The "rounding error" tolerated when testing for intersections.
pub const PRECISION: Scalar = 1e-6;

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Scalar = 1e-9;

    fn samples() -> Vec<Vector> {
        vec![
            Vector::new(1.0, 2.0, 3.0),
            Vector::new(-4.5, 0.25, 9.0),
            Vector::new(0.0, -7.0, 0.001),
            Vector::new(123.0, -456.0, 789.0),
        ]
    }

    #[test]
    fn test_normalise_has_unit_length() {
        for v in samples() {
            assert!((v.normalize().length() - 1.0).abs() < EPS, "{v:?}");
        }
    }

    #[test]
    fn test_normalise_zero_is_nan() {
        assert!(Vector::ZERO.normalize().is_nan());
    }

    #[test]
    fn test_dot_commutes() {
        for a in samples() {
            for b in samples() {
                assert_eq!(a.dot(b), b.dot(a));
            }
        }
    }

    #[test]
    fn test_cross_anticommutes() {
        for a in samples() {
            for b in samples() {
                assert!((a.cross(b) + b.cross(a)).length() < EPS);
            }
        }
    }

    #[test]
    fn test_component_product() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, 5.0, 6.0);
        assert_eq!(a * b, Vector::new(4.0, 10.0, 18.0));
        assert_eq!((a * 2.0) / 2.0, a);
    }
}
