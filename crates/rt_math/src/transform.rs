// Transform utilities for Matrix
//
// Derived transformation matrices (translation, scale, rotations in
// degrees) plus row-wise construction and homogeneous application.

use crate::{Matrix, Scalar, Vector};
use glam::DVec4;

/// Extension trait for Matrix to provide the ray tracer's transform helpers.
pub trait MatrixExt {
    /// Build a matrix from four row vectors.
    fn from_rows(r0: DVec4, r1: DVec4, r2: DVec4, r3: DVec4) -> Self;

    /// Multiply a vector by the matrix.
    ///
    /// The vector is padded with w=1 before the multiply and the resulting
    /// w component is dropped, so translation applies and no perspective
    /// divide takes place.
    fn apply(&self, vector: Vector) -> Vector;
}

impl MatrixExt for Matrix {
    fn from_rows(r0: DVec4, r1: DVec4, r2: DVec4, r3: DVec4) -> Self {
        // glam stores columns, so build from rows and flip.
        Matrix::from_cols(r0, r1, r2, r3).transpose()
    }

    fn apply(&self, vector: Vector) -> Vector {
        (*self * vector.extend(1.0)).truncate()
    }
}

/// A translation matrix.
pub fn translation(x: Scalar, y: Scalar, z: Scalar) -> Matrix {
    Matrix::from_rows(
        DVec4::new(1.0, 0.0, 0.0, x),
        DVec4::new(0.0, 1.0, 0.0, y),
        DVec4::new(0.0, 0.0, 1.0, z),
        DVec4::W,
    )
}

/// A scale matrix.
pub fn scale(x: Scalar, y: Scalar, z: Scalar) -> Matrix {
    Matrix::from_diagonal(DVec4::new(x, y, z, 1.0))
}

/// Rotation about the X axis by `theta` degrees.
pub fn rotation_x(theta: Scalar) -> Matrix {
    Matrix::from_rotation_x(theta.to_radians())
}

/// Rotation about the Y axis by `theta` degrees.
pub fn rotation_y(theta: Scalar) -> Matrix {
    Matrix::from_rotation_y(theta.to_radians())
}

/// Rotation about the Z axis by `theta` degrees.
pub fn rotation_z(theta: Scalar) -> Matrix {
    Matrix::from_rotation_z(theta.to_radians())
}

/// Yaw, pitch, roll rotation in degrees: X is applied first, then Y, then Z.
pub fn rotation(x: Scalar, y: Scalar, z: Scalar) -> Matrix {
    rotation_z(z) * rotation_y(y) * rotation_x(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Scalar = 1e-9;

    fn close(a: Vector, b: Vector) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_from_rows_matches_row_access() {
        let m = Matrix::from_rows(
            DVec4::new(1.0, 2.0, 3.0, 4.0),
            DVec4::new(5.0, 6.0, 7.0, 8.0),
            DVec4::new(9.0, 10.0, 11.0, 12.0),
            DVec4::new(13.0, 14.0, 15.0, 16.0),
        );

        assert_eq!(m.row(0), DVec4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.row(3), DVec4::new(13.0, 14.0, 15.0, 16.0));
        assert_eq!(m.col(1), DVec4::new(2.0, 6.0, 10.0, 14.0));
    }

    #[test]
    fn test_apply_translates_points() {
        let t = translation(10.0, 20.0, 30.0);
        assert_eq!(t.apply(Vector::new(1.0, 2.0, 3.0)), Vector::new(11.0, 22.0, 33.0));
        // Directions (w=0) are not translated.
        assert_eq!(t.transform_vector3(Vector::X), Vector::X);
    }

    #[test]
    fn test_zero_translation_is_identity() {
        let m = rotation(30.0, 45.0, 60.0) * scale(2.0, 3.0, 4.0);
        let composed = translation(0.0, 0.0, 0.0) * m;
        let v = Vector::new(-1.5, 2.0, 7.25);

        assert!(close(composed.apply(v), m.apply(v)));
        assert!(close(translation(0.0, 0.0, 0.0).apply(v), v));
    }

    #[test]
    fn test_multiplication_is_associative() {
        let m1 = rotation_y(33.0) * translation(1.0, -2.0, 3.0);
        let m2 = scale(0.5, 2.0, -1.0) * rotation_x(-71.0);
        let v = Vector::new(3.0, 4.0, 5.0);

        assert!(close((m1 * m2).apply(v), m1.apply(m2.apply(v))));
    }

    #[test]
    fn test_rotation_degrees() {
        assert!(close(rotation_z(90.0).apply(Vector::X), Vector::Y));
        assert!(close(rotation_x(90.0).apply(Vector::Y), Vector::Z));
        assert!(close(rotation_y(90.0).apply(Vector::Z), Vector::X));
    }

    #[test]
    fn test_yaw_pitch_roll_order() {
        let v = Vector::new(1.0, 2.0, 3.0);
        let expected = rotation_z(20.0).apply(rotation_y(40.0).apply(rotation_x(60.0).apply(v)));
        assert!(close(rotation(60.0, 40.0, 20.0).apply(v), expected));
    }

    #[test]
    fn test_scalar_multiplication() {
        let m = scale(1.0, 2.0, 3.0) * 2.0;
        assert_eq!(m.row(1), DVec4::new(0.0, 4.0, 0.0, 0.0));
        assert_eq!(m.row(3), DVec4::new(0.0, 0.0, 0.0, 2.0));
    }
}
