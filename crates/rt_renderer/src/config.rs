//! Render configuration.

use rt_core::Colour;
use rt_math::{Ray, Scalar};
use serde::{Deserialize, Serialize};

use crate::{RenderError, RenderResult};

/// Hard upper bound on reflection recursion.
pub const MAX_RAY_DEPTH: u32 = 1024;

/// Colour returned for rays that hit nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// A single flat colour.
    Solid(Colour),
    /// Linear blend on the ray's vertical direction.
    Gradient { bottom: Colour, top: Colour },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Colour::BLACK)
    }
}

impl Background {
    /// Background colour seen along `ray`.
    pub fn colour(&self, ray: &Ray) -> Colour {
        match *self {
            Background::Solid(colour) => colour,
            Background::Gradient { bottom, top } => {
                let a = 0.5 * (ray.direction().y + 1.0);
                bottom * (1.0 - a) + top * a
            }
        }
    }
}

/// Visualisation of where adaptive supersampling spends its effort.
///
/// Highlighted pixels are painted instead of being refined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Paint every pixel that phase two decided to supersample.
    pub highlight_refined_pixels: bool,
    /// Paint every pixel whose sub-regions needed further recursion.
    pub highlight_recursive_regions: bool,
    /// Colour painted over highlighted pixels
    pub highlight_colour: Colour,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            highlight_refined_pixels: false,
            highlight_recursive_regions: false,
            highlight_colour: Colour::from_hex(0xffffff),
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum number of reflection bounces
    pub max_ray_depth: u32,
    /// Rays per sample point, jittered across the lens aperture
    pub num_dof_samples: u32,
    /// Neighbour colour difference above which a pixel is supersampled
    pub pixel_diff_threshold: Scalar,
    /// Sub-sample difference from the region mean above which a sub-region recurses
    pub subpixel_diff_threshold: Scalar,
    /// Maximum recursion depth of region supersampling
    pub max_subpixel_depth: u32,
    /// Colour for rays that escape the scene
    pub background: Background,
    /// Seed for every random stream used during a render
    pub seed: u64,
    /// Supersampling visualisation switches
    pub debug: DebugOptions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_ray_depth: 50,
            num_dof_samples: 1,
            pixel_diff_threshold: 0.040,
            subpixel_diff_threshold: 0.008,
            max_subpixel_depth: 3,
            background: Background::default(),
            seed: 0,
            debug: DebugOptions::default(),
        }
    }
}

impl RenderConfig {
    /// Check that every setting is in range.
    pub fn validate(&self) -> RenderResult<()> {
        if self.max_ray_depth > MAX_RAY_DEPTH {
            return Err(invalid(format!(
                "max_ray_depth must be <= {MAX_RAY_DEPTH}, got {}",
                self.max_ray_depth
            )));
        }
        if self.num_dof_samples == 0 {
            return Err(invalid("num_dof_samples must be at least 1".into()));
        }
        for (name, value) in [
            ("pixel_diff_threshold", self.pixel_diff_threshold),
            ("subpixel_diff_threshold", self.subpixel_diff_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be a finite value >= 0, got {value}")));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> RenderError {
    RenderError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_math::Vector;

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_ray_depth, 50);
        assert_eq!(config.max_subpixel_depth, 3);
        assert_eq!(config.background, Background::Solid(Colour::BLACK));
        assert_eq!(config.debug.highlight_colour, Colour::WHITE);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            RenderConfig { max_ray_depth: MAX_RAY_DEPTH + 1, ..Default::default() },
            RenderConfig { num_dof_samples: 0, ..Default::default() },
            RenderConfig { pixel_diff_threshold: -0.1, ..Default::default() },
            RenderConfig { subpixel_diff_threshold: Scalar::NAN, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));
        }

        let err = RenderConfig { num_dof_samples: 0, ..Default::default() }
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid render configuration: num_dof_samples must be at least 1"
        );
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let json = r#"{
            "max_ray_depth": 5,
            "seed": 99,
            "background": {
                "kind": "gradient",
                "bottom": { "r": 1.0, "g": 1.0, "b": 1.0 },
                "top": { "r": 0.5, "g": 0.7, "b": 1.0 }
            },
            "debug": { "highlight_refined_pixels": true }
        }"#;
        let config: RenderConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.max_ray_depth, 5);
        assert_eq!(config.seed, 99);
        assert_eq!(config.num_dof_samples, 1);
        assert_eq!(config.pixel_diff_threshold, 0.040);
        assert!(config.debug.highlight_refined_pixels);
        assert!(!config.debug.highlight_recursive_regions);
        assert!(matches!(config.background, Background::Gradient { .. }));
    }

    #[test]
    fn test_solid_background_json() {
        let background: Background =
            serde_json::from_str(r#"{ "kind": "solid", "r": 0.1, "g": 0.2, "b": 0.3 }"#).unwrap();
        assert_eq!(background, Background::Solid(Colour::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn test_gradient_background() {
        let background = Background::Gradient { bottom: Colour::BLACK, top: Colour::WHITE };

        let up = background.colour(&Ray::new(Vector::ZERO, Vector::Y));
        let down = background.colour(&Ray::new(Vector::ZERO, -Vector::Y));
        let level = background.colour(&Ray::new(Vector::ZERO, Vector::Z));

        assert_eq!(up, Colour::WHITE);
        assert_eq!(down, Colour::BLACK);
        assert_eq!(level, Colour::new(0.5, 0.5, 0.5));
    }
}
