//! Triangle rasterization.
//!
//! Converts a projected triangle into a list of [`PixelSample`]s using a
//! bounding box scan with a barycentric inside test.
//!
//! # Algorithm Overview
//!
//! 1. Map the three vertices to pixel space.
//! 2. Drop the whole triangle if any vertex is off screen (there is no clipping).
//! 3. For each pixel in the half-open bounding box, compute barycentric
//!    parameters `s` and `t` from 2D cross products and keep the pixel when
//!    `s >= 0 && t >= 0 && s + t <= 1`.
//! 4. Ask a [`DepthEstimator`] for the depth of every kept pixel.
//!
//! No backface culling is done: both winding orders produce samples.

mod depth;

pub use depth::{
    BarycentricDepthEstimator, DepthEstimator, DepthEstimatorDispatcher, DepthEstimatorKind,
    FaceSetup, PlaneDepthEstimator,
};

use crate::config::Resolution;
use crate::math::Vec3;
use crate::transform::to_pixel_space;

/// One rasterized pixel and its estimated depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelSample {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
}

/// A pixel found inside a triangle, with its barycentric parameters.
///
/// `s` weights the second vertex and `t` the third; the first vertex gets
/// `1 - s - t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coverage {
    pub x: i32,
    pub y: i32,
    pub s: f32,
    pub t: f32,
}

/// 2D cross product in the `y1 * x2 - x1 * y2` orientation.
#[inline]
fn cross(x1: i32, y1: i32, x2: i32, y2: i32) -> f32 {
    (y1 as f32 * x2 as f32) - (x1 as f32 * y2 as f32)
}

/// Whether a pixel-space point lies inside `[0, W] x [0, H]`.
///
/// The upper bound is inclusive: a vertex exactly on the right or bottom
/// edge still counts as on screen.
#[inline]
fn on_screen((x, y): (i32, i32), resolution: Resolution) -> bool {
    x >= 0 && x <= resolution.width as i32 && y >= 0 && y <= resolution.height as i32
}

/// Calls `visit` for every pixel of the bounding box of `a`, `b`, `c` that
/// passes the barycentric inside test.
///
/// The box is half-open: pixels on the maximum x or y edge are never tested.
/// Collinear corners cover nothing.
pub fn scan_triangle(
    a: (i32, i32),
    b: (i32, i32),
    c: (i32, i32),
    mut visit: impl FnMut(Coverage),
) {
    let (x1, y1) = a;
    let (x2, y2) = b;
    let (x3, y3) = c;

    let min_x = x1.min(x2).min(x3);
    let max_x = x1.max(x2).max(x3);
    let min_y = y1.min(y2).min(y3);
    let max_y = y1.max(y2).max(y3);

    let (vs1_x, vs1_y) = (x2 - x1, y2 - y1);
    let (vs2_x, vs2_y) = (x3 - x1, y3 - y1);

    let denom = cross(vs1_x, vs1_y, vs2_x, vs2_y);
    if denom == 0.0 {
        return;
    }

    for x in min_x..max_x {
        for y in min_y..max_y {
            let (q_x, q_y) = (x - x1, y - y1);

            let s = cross(q_x, q_y, vs2_x, vs2_y) / denom;
            let t = cross(vs1_x, vs1_y, q_x, q_y) / denom;

            if s >= 0.0 && t >= 0.0 && s + t <= 1.0 {
                visit(Coverage { x, y, s, t });
            }
        }
    }
}

/// Rasterizes a projected triangle, appending its samples to `out`.
///
/// Returns the number of samples appended; zero when the triangle is rejected.
pub fn rasterize_triangle_into<E: DepthEstimator + ?Sized>(
    points: [Vec3; 3],
    resolution: Resolution,
    estimator: &E,
    out: &mut Vec<PixelSample>,
) -> usize {
    let [p1, p2, p3] = points;
    let corners = [
        to_pixel_space(p1.x, p1.y, resolution),
        to_pixel_space(p2.x, p2.y, resolution),
        to_pixel_space(p3.x, p3.y, resolution),
    ];

    if !corners.iter().all(|&corner| on_screen(corner, resolution)) {
        return 0;
    }

    let face = FaceSetup::new(points, resolution);
    let before = out.len();
    scan_triangle(corners[0], corners[1], corners[2], |coverage| {
        out.push(PixelSample {
            x: coverage.x,
            y: coverage.y,
            depth: estimator.depth_at(&face, coverage),
        });
    });
    out.len() - before
}

/// Rasterizes a projected triangle into a fresh sample list.
///
/// The list is empty if any vertex falls outside `[0, W] x [0, H]` in pixel
/// space, or if the triangle is degenerate.
pub fn rasterize_triangle<E: DepthEstimator + ?Sized>(
    points: [Vec3; 3],
    resolution: Resolution,
    estimator: &E,
) -> Vec<PixelSample> {
    let mut samples = Vec::new();
    rasterize_triangle_into(points, resolution, estimator, &mut samples);
    samples
}
