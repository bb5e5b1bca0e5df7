//! Per-pixel depth estimation strategies.
//!
//! The rasterizer decides *which* pixels a triangle covers; a
//! [`DepthEstimator`] decides what depth each of them gets. Two strategies
//! are provided:
//!
//! - [`PlaneDepthEstimator`]: evaluates the plane through the face normal at a
//!   coordinate reconstructed with
//!   [`from_pixel_space`](crate::transform::from_pixel_space). This is the
//!   default and reproduces the renderer's established output. The
//!   reconstruction is not a true inverse of the pixel mapping, so the result
//!   is an approximation.
//! - [`BarycentricDepthEstimator`]: interpolates the three corner depths with
//!   the barycentric weights found during the inside test.

use super::Coverage;
use crate::config::Resolution;
use crate::math::Vec3;
use crate::transform::from_pixel_space;

/// Per-triangle values shared by every pixel of one rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceSetup {
    pub points: [Vec3; 3],
    /// `(p2 - p1) x (p3 - p1)`; not normalized.
    pub normal: Vec3,
    /// `p2 - p1`.
    pub edge: Vec3,
    pub resolution: Resolution,
}

impl FaceSetup {
    pub fn new(points: [Vec3; 3], resolution: Resolution) -> Self {
        let [p1, p2, p3] = points;
        let edge = p2 - p1;
        Self {
            points,
            normal: edge.cross(p3 - p1),
            edge,
            resolution,
        }
    }
}

/// Strategy for estimating the depth of a covered pixel.
pub trait DepthEstimator {
    fn depth_at(&self, face: &FaceSetup, coverage: Coverage) -> f32;
}

/// Plane equation evaluated at the reconstructed pixel coordinate:
///
/// ```text
/// z = (n.x * (u - e.x) + n.y * (v - e.y)) / n.z + e.z
/// ```
///
/// where `(u, v)` comes from `from_pixel_space`, `n` is the face normal and
/// `e` the first edge. A face with `n.z == 0` yields `e.z`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaneDepthEstimator;

impl DepthEstimator for PlaneDepthEstimator {
    #[inline]
    fn depth_at(&self, face: &FaceSetup, coverage: Coverage) -> f32 {
        let n = face.normal;
        let e = face.edge;
        if n.z == 0.0 {
            return e.z;
        }
        let (u, v) = from_pixel_space(coverage.x, coverage.y, face.resolution);
        (n.x * (u - e.x) + n.y * (v - e.y)) / n.z + e.z
    }
}

/// Linear interpolation of the corner depths: `(1 - s - t) z1 + s z2 + t z3`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BarycentricDepthEstimator;

impl DepthEstimator for BarycentricDepthEstimator {
    #[inline]
    fn depth_at(&self, face: &FaceSetup, coverage: Coverage) -> f32 {
        let [p1, p2, p3] = face.points;
        let Coverage { s, t, .. } = coverage;
        (1.0 - s - t) * p1.z + s * p2.z + t * p3.z
    }
}

/// Available depth estimators.
///
/// Can be changed at runtime via `Engine::set_depth_estimator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthEstimatorKind {
    /// Plane evaluated at the reconstructed pixel coordinate.
    #[default]
    Plane,
    /// Barycentric interpolation of the three corner depths.
    Barycentric,
}

impl std::fmt::Display for DepthEstimatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepthEstimatorKind::Plane => write!(f, "plane"),
            DepthEstimatorKind::Barycentric => write!(f, "barycentric"),
        }
    }
}

impl std::str::FromStr for DepthEstimatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plane" => Ok(Self::Plane),
            "barycentric" => Ok(Self::Barycentric),
            other => Err(format!("unknown depth estimator: {other}")),
        }
    }
}

/// Holds both estimators and forwards to the active one.
#[derive(Debug, Default)]
pub struct DepthEstimatorDispatcher {
    plane: PlaneDepthEstimator,
    barycentric: BarycentricDepthEstimator,
    active: DepthEstimatorKind,
}

impl DepthEstimatorDispatcher {
    pub fn new(kind: DepthEstimatorKind) -> Self {
        Self {
            plane: PlaneDepthEstimator,
            barycentric: BarycentricDepthEstimator,
            active: kind,
        }
    }

    pub fn set_kind(&mut self, kind: DepthEstimatorKind) {
        self.active = kind;
    }

    pub fn active_kind(&self) -> DepthEstimatorKind {
        self.active
    }
}

impl DepthEstimator for DepthEstimatorDispatcher {
    #[inline]
    fn depth_at(&self, face: &FaceSetup, coverage: Coverage) -> f32 {
        match self.active {
            DepthEstimatorKind::Plane => self.plane.depth_at(face, coverage),
            DepthEstimatorKind::Barycentric => self.barycentric.depth_at(face, coverage),
        }
    }
}
