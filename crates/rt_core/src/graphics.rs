//! Colour and pixel types.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use rt_math::Scalar;
use serde::{Deserialize, Serialize};

/// The maximum value of a single quantised colour channel.
pub const PIXEL_MAX: u8 = 255;

/// A quantised R,G,B pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// An R,G,B colour with channels nominally in [0, 1].
///
/// Channels may exceed 1 while light is being accumulated; they are only
/// clamped when converted to a [`Pixel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: Scalar,
    pub g: Scalar,
    pub b: Scalar,
}

impl Colour {
    pub const BLACK: Colour = Colour::new(0.0, 0.0, 0.0);
    pub const WHITE: Colour = Colour::new(1.0, 1.0, 1.0);

    /// Create a colour from R,G,B channels.
    pub const fn new(r: Scalar, g: Scalar, b: Scalar) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from a 24 bit hex value, e.g. `0xff00aa`.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as Scalar / PIXEL_MAX as Scalar;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Sum of the absolute per-channel differences between two colours.
    ///
    /// Used by the adaptive sampler as its measure of divergence.
    #[inline]
    pub fn diff(&self, other: &Colour) -> Scalar {
        (other.r - self.r).abs() + (other.g - self.g).abs() + (other.b - self.b).abs()
    }

    /// The largest channel value.
    pub fn max(&self) -> Scalar {
        self.r.max(self.g).max(self.b)
    }

    /// The smallest channel value.
    pub fn min(&self) -> Scalar {
        self.r.min(self.g).min(self.b)
    }

    /// Clamp every channel into [0, 1].
    pub fn clamped(&self) -> Colour {
        Colour::new(clamp01(self.r), clamp01(self.g), clamp01(self.b))
    }

    /// Whether every channel is a finite number.
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Quantise to an 8 bit pixel.
    pub fn to_pixel(&self) -> Pixel {
        Pixel::new(quantise(self.r), quantise(self.g), quantise(self.b))
    }
}

/// Clamp a value to [0, 1]. NaN maps to 0.
#[inline]
fn clamp01(x: Scalar) -> Scalar {
    if x > 1.0 {
        1.0
    } else if x > 0.0 {
        x
    } else {
        0.0
    }
}

#[inline]
fn quantise(x: Scalar) -> u8 {
    (clamp01(x) * PIXEL_MAX as Scalar) as u8
}

impl Add for Colour {
    type Output = Colour;

    fn add(self, rhs: Colour) -> Colour {
        Colour::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Colour {
    fn add_assign(&mut self, rhs: Colour) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Mul<Scalar> for Colour {
    type Output = Colour;

    fn mul(self, rhs: Scalar) -> Colour {
        Colour::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl MulAssign<Scalar> for Colour {
    fn mul_assign(&mut self, rhs: Scalar) {
        self.r *= rhs;
        self.g *= rhs;
        self.b *= rhs;
    }
}

/// Channel-wise product, used to tint light by a surface colour.
impl Mul for Colour {
    type Output = Colour;

    fn mul(self, rhs: Colour) -> Colour {
        Colour::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Div<Scalar> for Colour {
    type Output = Colour;

    fn div(self, rhs: Scalar) -> Colour {
        Colour::new(self.r / rhs, self.g / rhs, self.b / rhs)
    }
}

impl DivAssign<Scalar> for Colour {
    fn div_assign(&mut self, rhs: Scalar) {
        self.r /= rhs;
        self.g /= rhs;
        self.b /= rhs;
    }
}

impl Sum for Colour {
    fn sum<I: Iterator<Item = Colour>>(iter: I) -> Colour {
        iter.fold(Colour::BLACK, |acc, c| acc + c)
    }
}
