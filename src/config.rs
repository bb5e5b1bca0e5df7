//! Render configuration: output resolution, frame rate and animation constants.

use crate::math::Vec3;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_FPS: u32 = 60;

/// Milliseconds for one full turn of the mesh about the vertical axis.
pub const ROTATION_PERIOD_MS: u64 = 5000;

/// Camera depth offset added per key press.
pub const DEFAULT_CAMERA_STEP: f32 = 0.1;

/// Pixel dimensions of the frame and depth buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells in a buffer of this resolution.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major buffer index for `(x, y)`, or `None` outside `[0, W) x [0, H)`.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Everything the frame loop needs that is fixed for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub resolution: Resolution,
    pub fps: u32,
    pub camera_step: f32,
    pub initial_camera: Vec3,
}

impl RenderConfig {
    /// Target frame interval in whole milliseconds (`1000 / fps`).
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            fps: DEFAULT_FPS,
            camera_step: DEFAULT_CAMERA_STEP,
            initial_camera: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}
