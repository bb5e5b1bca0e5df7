//! Colour and depth grids written by the compositor.
//!
//! Both grids are row-major and sized from a [`Resolution`]. They are owned by
//! the [`Renderer`](super::Renderer); everything outside it only ever sees a
//! shared borrow of the finished [`FrameBuffer`].

use std::path::Path;

use image::{ImageResult, RgbImage};

use crate::color::Color;
use crate::config::Resolution;

/// Depth value every cell is reset to at the start of a frame.
pub const DEPTH_CLEAR: f32 = f32::NEG_INFINITY;

/// A grid of RGB colours.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pixels: Vec<Color>,
    resolution: Resolution,
}

impl FrameBuffer {
    /// Creates a black buffer.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            pixels: vec![Color::BLACK; resolution.pixel_count()],
            resolution,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    pub fn height(&self) -> u32 {
        self.resolution.height
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.resolution.index(x, y).map(|i| self.pixels[i])
    }

    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.resolution.index(x, y) {
            self.pixels[i] = color;
        }
    }

    #[inline]
    pub(crate) fn set_index(&mut self, index: usize, color: Color) {
        self.pixels[index] = color;
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Writes the grid as `ARGB8888` bytes in native endianness, ready for an
    /// SDL streaming texture. `out` is cleared and reused.
    pub fn write_argb8888(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for color in &self.pixels {
            out.extend_from_slice(&color.to_argb8888().to_ne_bytes());
        }
    }

    /// Copies the grid into an [`RgbImage`].
    pub fn to_image(&self) -> RgbImage {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|c| c.to_array()).collect();
        // Length is always width * height * 3.
        RgbImage::from_raw(self.width(), self.height(), raw)
            .unwrap_or_else(|| RgbImage::new(self.width(), self.height()))
    }

    /// Saves the grid as an image, format chosen from the file extension.
    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_image().save(path)
    }
}

/// A grid of per-pixel depth values.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
    resolution: Resolution,
}

impl DepthBuffer {
    /// Creates a buffer with every cell at [`DEPTH_CLEAR`].
    pub fn new(resolution: Resolution) -> Self {
        Self {
            depths: vec![DEPTH_CLEAR; resolution.pixel_count()],
            resolution,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn clear(&mut self) {
        self.depths.fill(DEPTH_CLEAR);
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.resolution.index(x, y).map(|i| self.depths[i])
    }

    #[inline]
    pub(crate) fn get_index(&self, index: usize) -> f32 {
        self.depths[index]
    }

    #[inline]
    pub(crate) fn set_index(&mut self, index: usize, depth: f32) {
        self.depths[index] = depth;
    }

    pub fn depths(&self) -> &[f32] {
        &self.depths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffers_start_cleared() {
        let res = Resolution::new(3, 2);
        let fb = FrameBuffer::new(res);
        let db = DepthBuffer::new(res);
        assert!(fb.pixels().iter().all(|&c| c == Color::BLACK));
        assert!(db.depths().iter().all(|&d| d == f32::NEG_INFINITY));
        assert_eq!(fb.pixels().len(), 6);
    }

    #[test]
    fn set_pixel_ignores_out_of_bounds() {
        let mut fb = FrameBuffer::new(Resolution::new(2, 2));
        fb.set_pixel(-1, 0, Color::WHITE);
        fb.set_pixel(2, 1, Color::WHITE);
        fb.set_pixel(1, 1, Color::WHITE);
        assert_eq!(fb.get_pixel(1, 1), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(2, 1), None);
        assert_eq!(fb.pixels().iter().filter(|&&c| c == Color::WHITE).count(), 1);
    }

    #[test]
    fn argb_bytes_cover_every_pixel() {
        let mut fb = FrameBuffer::new(Resolution::new(2, 1));
        fb.set_pixel(1, 0, Color::new(1, 2, 3));
        let mut bytes = vec![9; 3];
        fb.write_argb8888(&mut bytes);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[4..], &0xFF01_0203u32.to_ne_bytes());
    }

    #[test]
    fn image_matches_pixels() {
        let mut fb = FrameBuffer::new(Resolution::new(4, 3));
        fb.set_pixel(3, 2, Color::new(10, 20, 30));
        let img = fb.to_image();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(3, 2).0, [10, 20, 30]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
