//! The per-vertex transform chain: model space → rotation → camera
//! projection → pixel space.
//!
//! All functions here are pure. The orchestrator applies [`rotate`] and
//! [`project`] to every vertex each frame; the rasterizer owns the mapping to
//! and from pixel space.

use std::f64::consts::TAU;

use crate::config::{Resolution, ROTATION_PERIOD_MS};
use crate::math::Vec3;

/// Rotates a model-space vertex about the vertical axis.
///
/// The angle is `(tick / 5000) * 2π`, so one full turn takes
/// [`ROTATION_PERIOD_MS`] ticks. `y` passes through unchanged.
pub fn rotate(vertex: Vec3, tick: u64) -> Vec3 {
    // Reducing first keeps whole periods exact no matter how large the tick gets.
    let phase = (tick % ROTATION_PERIOD_MS) as f64 / ROTATION_PERIOD_MS as f64;
    let (sin, cos) = (TAU * phase).sin_cos();
    vertex.rotate_y_sin_cos(sin as f32, cos as f32)
}

/// Projects a rotated vertex through the camera into normalized screen space.
///
/// `x' = (x + cam.x) / cam.z`, `y' = -(y + cam.y) / cam.z`, `z' = z`.
///
/// The vertex is returned untouched when `cam.z == 0`, and also when
/// `vertex.z + cam.z == 0`. The second condition does not match the divisor;
/// it is kept so existing renders stay identical.
pub fn project(vertex: Vec3, camera: Vec3) -> Vec3 {
    if camera.z == 0.0 || vertex.z + camera.z == 0.0 {
        return vertex;
    }

    Vec3::new(
        (vertex.x + camera.x) / camera.z,
        -(vertex.y + camera.y) / camera.z,
        vertex.z,
    )
}

/// Maps normalized `[-1, 1]` coordinates to integer pixel coordinates.
///
/// `px = x * W/2 + W/2`, `py = y * H/2 + H/2`, truncated toward zero.
#[inline]
pub fn to_pixel_space(x: f32, y: f32, resolution: Resolution) -> (i32, i32) {
    let half_w = resolution.width as f32 / 2.0;
    let half_h = resolution.height as f32 / 2.0;
    ((x * half_w + half_w) as i32, (y * half_h + half_h) as i32)
}

/// Re-derives a normalized coordinate from a pixel for plane depth estimation.
///
/// This is `px / W / 2 - W / 2` (and likewise for `y`), which is *not* the
/// inverse of [`to_pixel_space`]. The plane depth estimator depends on this
/// exact mapping.
#[inline]
pub fn from_pixel_space(px: i32, py: i32, resolution: Resolution) -> (f32, f32) {
    let w = resolution.width as f32;
    let h = resolution.height as f32;
    (px as f32 / w / 2.0 - w / 2.0, py as f32 / h / 2.0 - h / 2.0)
}
