//! Surface materials.

use rt_math::Scalar;

use crate::{Colour, SceneError, SceneResult};

/// Reflectance properties of a surface.
///
/// Materials are immutable once built and are shared between objects
/// with `Arc<Material>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    colour: Colour,
    ambient: Scalar,
    diffuse: Scalar,
    specular: Scalar,
    shininess: Scalar,
    reflectivity: Scalar,
}

impl Material {
    /// Create a new material.
    ///
    /// - `ambient`, `diffuse`, `specular`: coefficients in [0, 1]
    /// - `shininess`: Blinn-Phong exponent, >= 0
    /// - `reflectivity`: mirror reflection weight in [0, 1)
    pub fn new(
        colour: Colour,
        ambient: Scalar,
        diffuse: Scalar,
        specular: Scalar,
        shininess: Scalar,
        reflectivity: Scalar,
    ) -> SceneResult<Self> {
        if !colour.is_finite() || colour.min() < 0.0 {
            return Err(invalid(format!("colour must be finite and non-negative, got {colour:?}")));
        }
        for (name, value) in [("ambient", ambient), ("diffuse", diffuse), ("specular", specular)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} must be in [0, 1], got {value}")));
            }
        }
        if !shininess.is_finite() || shininess < 0.0 {
            return Err(invalid(format!("shininess must be finite and >= 0, got {shininess}")));
        }
        // Reflectivity of 1 or more never loses energy between bounces.
        if !(0.0..1.0).contains(&reflectivity) {
            return Err(invalid(format!("reflectivity must be in [0, 1), got {reflectivity}")));
        }

        Ok(Self {
            colour,
            ambient,
            diffuse,
            specular,
            shininess,
            reflectivity,
        })
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn ambient(&self) -> Scalar {
        self.ambient
    }

    pub fn diffuse(&self) -> Scalar {
        self.diffuse
    }

    pub fn specular(&self) -> Scalar {
        self.specular
    }

    pub fn shininess(&self) -> Scalar {
        self.shininess
    }

    pub fn reflectivity(&self) -> Scalar {
        self.reflectivity
    }
}

fn invalid(message: String) -> SceneError {
    SceneError::InvalidMaterial(message)
}
