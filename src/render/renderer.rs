//! Depth-tested compositing into the frame and depth buffers.
//!
//! Provides the [`Renderer`] struct which owns both grids and decides, sample
//! by sample, which triangle's colour survives at each pixel.

use super::framebuffer::{DepthBuffer, FrameBuffer};
use super::rasterizer::PixelSample;
use crate::color::Color;
use crate::config::Resolution;

pub struct Renderer {
    color_buffer: FrameBuffer,
    depth_buffer: DepthBuffer,
}

impl Renderer {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            color_buffer: FrameBuffer::new(resolution),
            depth_buffer: DepthBuffer::new(resolution),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.color_buffer.resolution()
    }

    /// Resets every colour to black and every depth to negative infinity.
    pub fn clear(&mut self) {
        self.color_buffer.fill(Color::BLACK);
        self.depth_buffer.clear();
    }

    /// Writes `color` for every sample that passes the depth test.
    ///
    /// Samples outside `[0, W) x [0, H)` are skipped. A sample is accepted
    /// when its depth is greater than or equal to the stored depth, so the
    /// buffer keeps the *largest* depth seen this frame. Accepted samples
    /// update both colour and depth.
    ///
    /// Returns the number of samples written.
    pub fn composite(&mut self, samples: &[PixelSample], color: Color) -> usize {
        let resolution = self.resolution();
        let mut written = 0;
        for sample in samples {
            let Some(idx) = resolution.index(sample.x, sample.y) else {
                continue;
            };
            if sample.depth >= self.depth_buffer.get_index(idx) {
                self.color_buffer.set_index(idx, color);
                self.depth_buffer.set_index(idx, sample.depth);
                written += 1;
            }
        }
        written
    }

    /// Writes `color` for every in-bounds sample without depth testing.
    ///
    /// The depth buffer is left untouched.
    pub fn write_color(&mut self, samples: &[PixelSample], color: Color) {
        for sample in samples {
            self.color_buffer.set_pixel(sample.x, sample.y, color);
        }
    }

    pub fn color_buffer(&self) -> &FrameBuffer {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }
}
