//! Image buffer that receives the rendered colours.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rt_math::Scalar;

use crate::{Colour, Pixel, SceneError, SceneResult, PIXEL_MAX};

/// Flat index of pixel `(x, y)` in a buffer `width` pixels wide.
#[inline]
pub fn index(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Inverse of [`index`].
#[inline]
pub fn coords(index: usize, width: usize) -> (usize, usize) {
    (index % width, index / width)
}

/// An 8 bit RGB image.
///
/// Colours are converted on the way in: exposure is applied first, then the
/// value is clamped to [0, 1] and gamma corrected. With vertical inversion
/// enabled (the default) image-space `y` grows upward, so row 0 of the
/// stored buffer is the top of the picture.
#[derive(Debug, Clone)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
    inverse_gamma: Colour,
    exposure: Scalar,
    inverted: bool,
}

impl Image {
    /// Create a black image.
    pub fn new(width: usize, height: usize) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidImageSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Pixel::default(); width * height],
            inverse_gamma: Colour::WHITE,
            exposure: 1.0,
            inverted: true,
        })
    }

    /// Set per-channel gamma. Non-positive values are treated as 1.
    pub fn with_gamma(mut self, gamma: Colour) -> Self {
        let invert = |g: Scalar| if g.is_finite() && g > 0.0 { 1.0 / g } else { 1.0 };
        self.inverse_gamma = Colour::new(invert(gamma.r), invert(gamma.g), invert(gamma.b));
        self
    }

    pub fn with_exposure(mut self, exposure: Scalar) -> Self {
        self.exposure = exposure;
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    /// Store a colour at image-space `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, colour: &Colour) {
        let offset = self.offset(x, y);
        self.pixels[offset] = self.encode(colour);
    }

    /// Store a colour at an image-space flat index.
    pub fn set_index(&mut self, index: usize, colour: &Colour) {
        let (x, y) = coords(index, self.width);
        self.set(x, y, colour);
    }

    /// Read the pixel at image-space `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.pixels[self.offset(x, y)]
    }

    /// Pixels in storage order, top row first.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Packed RGB bytes in storage order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Write a plain text (P3) PPM.
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "{PIXEL_MAX}")?;
        for row in self.pixels.chunks(self.width) {
            let line = row
                .iter()
                .map(|p| format!("{} {} {}", p.r, p.g, p.b))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }

    /// Copy into an `image` crate buffer for encoding.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let p = self.pixels[index(x as usize, y as usize, self.width)];
            image::Rgb([p.r, p.g, p.b])
        })
    }

    /// Save to `path`. `.ppm` files are written as plain text; any other
    /// extension is encoded by the `image` crate.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SceneResult<()> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            self.write_ppm(BufWriter::new(File::create(path)?))?;
        } else {
            self.to_rgb_image().save(path)?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        let row = if self.inverted { self.height - 1 - y } else { y };
        index(x, row, self.width)
    }

    fn encode(&self, colour: &Colour) -> Pixel {
        let exposed = (*colour * self.exposure).clamped();
        Colour::new(
            exposed.r.powf(self.inverse_gamma.r),
            exposed.g.powf(self.inverse_gamma.g),
            exposed.b.powf(self.inverse_gamma.b),
        )
        .to_pixel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        assert_eq!(index(3, 2, 10), 23);
        assert_eq!(coords(23, 10), (3, 2));
    }

    #[test]
    fn test_new_image_is_black() {
        let image = Image::new(4, 3).unwrap();
        assert_eq!(image.size(), 12);
        assert!(image.pixels().iter().all(|p| *p == Pixel::new(0, 0, 0)));
        assert_eq!(image.as_bytes().len(), 36);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Image::new(0, 5),
            Err(SceneError::InvalidImageSize { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_inversion_puts_y_zero_at_bottom() {
        let mut image = Image::new(2, 2).unwrap();
        image.set(0, 0, &Colour::WHITE);

        assert_eq!(image.pixel(0, 0), Pixel::new(255, 255, 255));
        // Bottom row of storage.
        assert_eq!(image.pixels()[2], Pixel::new(255, 255, 255));
        assert_eq!(image.pixels()[0], Pixel::new(0, 0, 0));

        let mut flat = Image::new(2, 2).unwrap().with_inverted(false);
        flat.set_index(1, &Colour::WHITE);
        assert_eq!(flat.pixels()[1], Pixel::new(255, 255, 255));
    }

    #[test]
    fn test_clamping_and_exposure() {
        let mut image = Image::new(1, 1).unwrap().with_exposure(2.0);
        image.set(0, 0, &Colour::new(0.25, 3.0, -1.0));
        assert_eq!(image.pixel(0, 0), Pixel::new(127, 255, 0));
    }

    #[test]
    fn test_gamma_brightens_midtones() {
        let mut linear = Image::new(1, 1).unwrap();
        let mut corrected = Image::new(1, 1).unwrap().with_gamma(Colour::new(2.2, 2.2, 2.2));
        let grey = Colour::new(0.25, 0.25, 0.25);
        linear.set(0, 0, &grey);
        corrected.set(0, 0, &grey);

        assert!(corrected.pixel(0, 0).r > linear.pixel(0, 0).r);
        assert_eq!(corrected.pixel(0, 0).r, (0.25f64.powf(1.0 / 2.2) * 255.0) as u8);
    }

    #[test]
    fn test_write_ppm() {
        let mut image = Image::new(2, 2).unwrap();
        image.set(0, 1, &Colour::new(1.0, 0.0, 0.0));
        image.set(1, 0, &Colour::new(0.0, 0.0, 1.0));

        let mut out = Vec::new();
        image.write_ppm(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 2\n255\n255 0 0 0 0 0\n0 0 0 0 0 255\n");
    }

    #[test]
    fn test_to_rgb_image_matches_storage() {
        let mut image = Image::new(3, 2).unwrap();
        image.set(2, 1, &Colour::new(0.0, 1.0, 0.0));

        let rgb = image.to_rgb_image();
        assert_eq!(rgb.dimensions(), (3, 2));
        assert_eq!(rgb.get_pixel(2, 0).0, [0, 255, 0]);
        assert_eq!(rgb.as_raw().as_slice(), image.as_bytes());
    }

    #[test]
    fn test_save_ppm_and_png() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = std::env::temp_dir().join(format!("rt_core_raster_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut image = Image::new(2, 1).unwrap();
        image.set(0, 0, &Colour::WHITE);

        let ppm = dir.join("out.ppm");
        image.save(&ppm).unwrap();
        assert!(std::fs::read_to_string(&ppm).unwrap().starts_with("P3\n2 1\n"));

        let png = dir.join("out.png");
        image.save(&png).unwrap();
        assert!(std::fs::metadata(&png).unwrap().len() > 0);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
