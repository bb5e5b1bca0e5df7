//! RGB colour values stored in the frame buffer.

use rand::Rng;

/// An opaque 8-bit-per-channel RGB colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draws a uniformly random colour, red first, then green, then blue.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r = rng.gen::<u8>();
        let g = rng.gen::<u8>();
        let b = rng.gen::<u8>();
        Self { r, g, b }
    }

    /// Packs the colour as `0xAARRGGBB` with full alpha, the layout SDL's
    /// `ARGB8888` textures expect.
    #[inline]
    pub const fn to_argb8888(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}
