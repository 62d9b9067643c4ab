//! Thin-lens camera for ray generation.

use rand::distributions::Distribution;
use rand::RngCore;
use rt_math::{scale, translation, DVec2, Matrix, Ray, Scalar, Vector};

use crate::sampling::UniformDisk;
use crate::{SceneError, SceneResult};

/// Reference "up" direction used to derive the camera basis.
const WORLD_UP: Vector = Vector::Y;

/// A lens has a focal length and aperture setting, along with a focus
/// multiplier that places the plane of perfect focus.
#[derive(Debug, Clone, Copy)]
pub struct Lens {
    focal_length: Scalar,
    aperture: UniformDisk,
    focus: Scalar,
}

impl Lens {
    /// Create a pinhole lens (zero aperture) focused on the look-at point.
    pub fn new(focal_length: Scalar) -> Self {
        Self {
            focal_length,
            aperture: UniformDisk::new(0.0),
            focus: 1.0,
        }
    }

    /// Set the aperture radius. Larger apertures give shallower depth of field.
    pub fn with_aperture(mut self, radius: Scalar) -> Self {
        self.aperture = UniformDisk::new(radius);
        self
    }

    /// Set the focus multiplier, applied to the camera-to-target distance.
    pub fn with_focus(mut self, focus: Scalar) -> Self {
        self.focus = focus;
        self
    }

    pub fn focal_length(&self) -> Scalar {
        self.focal_length
    }

    pub fn aperture(&self) -> Scalar {
        self.aperture.radius()
    }

    pub fn focus(&self) -> Scalar {
        self.focus
    }

    /// Sample a point on the aperture disk, in film units.
    pub fn sample_aperture(&self, rng: &mut dyn RngCore) -> DVec2 {
        self.aperture.sample(rng)
    }

    fn validate(&self) -> SceneResult<()> {
        if !self.focal_length.is_finite() || self.focal_length <= 0.0 {
            return Err(invalid(format!("focal length must be positive, got {}", self.focal_length)));
        }
        let aperture = self.aperture();
        if !aperture.is_finite() || aperture < 0.0 {
            return Err(invalid(format!("aperture must be >= 0, got {aperture}")));
        }
        if !self.focus.is_finite() || self.focus <= 0.0 {
            return Err(invalid(format!("focus must be positive, got {}", self.focus)));
        }
        Ok(())
    }
}

/// A camera has a position, a target that it is pointed at, a film size,
/// and a lens.
///
/// The camera is the only place that maps film coordinates to world rays.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vector,
    direction: Vector,
    film_back: Vector,
    right: Vector,
    up: Vector,
    width: Scalar,
    height: Scalar,
    lens: Lens,
    focus_distance: Scalar,
}

impl Camera {
    /// Create a new camera at `position` looking toward `look_at`.
    ///
    /// `width` and `height` give the film size in world units.
    pub fn new(
        position: Vector,
        look_at: Vector,
        width: Scalar,
        height: Scalar,
        lens: Lens,
    ) -> SceneResult<Self> {
        lens.validate()?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(invalid(format!("film size must be positive, got {width}x{height}")));
        }

        let to_target = look_at - position;
        let target_distance = to_target.length();
        if !target_distance.is_finite() || target_distance == 0.0 {
            return Err(invalid("look-at point must differ from the camera position".into()));
        }
        let direction = to_target / target_distance;

        let right = WORLD_UP.cross(direction);
        if right.length_squared() < 1e-12 {
            return Err(invalid("camera must not look straight up or down".into()));
        }
        let right = right.normalize();
        let up = direction.cross(right);

        let focus_distance = target_distance * lens.focus;
        // The plane of focus must lie beyond every point on the film.
        let film_reach = (lens.focal_length.powi(2) + (width / 2.0).powi(2) + (height / 2.0).powi(2)).sqrt();
        if focus_distance <= film_reach {
            return Err(invalid(format!(
                "focus distance {focus_distance} must exceed the lens reach {film_reach}"
            )));
        }

        Ok(Self {
            position,
            direction,
            film_back: position - direction * lens.focal_length,
            right,
            up,
            width,
            height,
            lens,
            focus_distance,
        })
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    pub fn right(&self) -> Vector {
        self.right
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    pub fn focus_distance(&self) -> Scalar {
        self.focus_distance
    }

    /// Transformation from image space (pixel coordinates, origin in a
    /// corner) to film space (world units, origin at the film centre).
    pub fn image_transform(&self, image_width: usize, image_height: usize) -> Matrix {
        let (image_width, image_height) = (image_width as Scalar, image_height as Scalar);
        let scale = scale(self.width / image_width, self.height / image_height, 1.0);
        let offset = translation(-image_width * 0.5, -image_height * 0.5, 0.0);
        scale * offset
    }

    /// The point on the plane of focus seen through film coordinate `film`.
    pub fn focus_point(&self, film: DVec2) -> Vector {
        let direction = (self.film_to_world(film) - self.film_back).normalize();
        self.film_back + direction * self.focus_distance
    }

    /// A ray leaving the lens at `film + aperture` and passing through
    /// `focus_point`.
    pub fn lens_ray(&self, film: DVec2, focus_point: Vector, aperture: DVec2) -> Ray {
        let origin = self.film_to_world(film + aperture);
        Ray::new(origin, focus_point - origin)
    }

    /// The ray through the centre of the lens for film coordinate `film`.
    pub fn primary_ray(&self, film: DVec2) -> Ray {
        self.lens_ray(film, self.focus_point(film), DVec2::ZERO)
    }

    #[inline]
    fn film_to_world(&self, film: DVec2) -> Vector {
        self.right * film.x + self.up * film.y + self.position
    }
}

fn invalid(message: String) -> SceneError {
    SceneError::InvalidCamera(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rt_math::MatrixExt;

    fn camera(lens: Lens) -> Camera {
        Camera::new(Vector::new(0.0, 0.0, -250.0), Vector::ZERO, 50.0, 50.0, lens).unwrap()
    }

    #[test]
    fn test_camera_basis() {
        let camera = camera(Lens::new(50.0));

        assert_eq!(camera.direction(), Vector::Z);
        assert!((camera.right() - Vector::X).length() < 1e-12);
        assert!((camera.up() - Vector::Y).length() < 1e-12);
        assert_eq!(camera.focus_distance(), 250.0);
    }

    #[test]
    fn test_image_transform_centres_film() {
        let camera = camera(Lens::new(50.0));
        let transform = camera.image_transform(100, 200);

        assert_eq!(transform.apply(Vector::new(50.0, 100.0, 0.0)), Vector::ZERO);
        assert_eq!(transform.apply(Vector::new(0.0, 0.0, 0.0)), Vector::new(-25.0, -25.0, 0.0));
        assert_eq!(transform.apply(Vector::new(100.0, 200.0, 0.0)), Vector::new(25.0, 25.0, 0.0));
    }

    #[test]
    fn test_centre_ray_looks_at_target() {
        let camera = camera(Lens::new(50.0));
        let ray = camera.primary_ray(DVec2::ZERO);

        assert_eq!(ray.origin(), camera.position());
        assert!((ray.direction() - Vector::Z).length() < 1e-12);
    }

    #[test]
    fn test_off_centre_rays_diverge() {
        let camera = camera(Lens::new(50.0));
        let ray = camera.primary_ray(DVec2::new(10.0, -5.0));

        assert!(ray.direction().x > 0.0);
        assert!(ray.direction().y < 0.0);
        assert!(ray.direction().z > 0.0);
    }

    #[test]
    fn test_aperture_rays_converge_on_focus_point() {
        let camera = camera(Lens::new(50.0).with_aperture(4.0).with_focus(0.8));
        let film = DVec2::new(3.0, 7.0);
        let focus = camera.focus_point(film);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..32 {
            let aperture = camera.lens().sample_aperture(&mut rng);
            assert!(aperture.length() <= 4.0);

            let ray = camera.lens_ray(film, focus, aperture);
            let t = (focus - ray.origin()).length();
            assert!((ray.at(t) - focus).length() < 1e-9);
        }
    }

    #[test]
    fn test_pinhole_aperture_is_centred() {
        let lens = Lens::new(35.0);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(lens.sample_aperture(&mut rng), DVec2::ZERO);
    }

    #[test]
    fn test_invalid_cameras() {
        let lens = Lens::new(50.0);
        let at = |position: Vector, look_at: Vector| Camera::new(position, look_at, 50.0, 50.0, lens);

        assert!(matches!(at(Vector::ZERO, Vector::ZERO), Err(SceneError::InvalidCamera(_))));
        assert!(at(Vector::ZERO, Vector::new(0.0, 100.0, 0.0)).is_err());
        assert!(Camera::new(Vector::ZERO, Vector::Z * 100.0, 0.0, 50.0, lens).is_err());
        assert!(Camera::new(Vector::ZERO, Vector::Z * 100.0, 50.0, 50.0, Lens::new(-1.0)).is_err());
        assert!(
            Camera::new(Vector::ZERO, Vector::Z * 100.0, 50.0, 50.0, lens.with_aperture(-1.0)).is_err()
        );
        // Focus plane inside the lens.
        assert!(Camera::new(Vector::ZERO, Vector::Z * 100.0, 50.0, 50.0, lens.with_focus(0.1)).is_err());
    }
}
