//! A CPU-only software rasterizer for a spinning triangle mesh.
//!
//! Each frame the mesh is rotated about the vertical axis, projected through
//! a point camera, scan-converted with a bounding-box barycentric test and
//! composited into a colour grid with a per-pixel depth rule. SDL2 is used
//! only to show the finished grid and to read key presses.
//!
//! # Quick Start
//!
//! ```ignore
//! use spinraster::prelude::*;
//!
//! let config = RenderConfig::default();
//! let mut engine = Engine::seeded(&config, 7);
//! engine.set_mesh(Mesh::load("teapot.obj")?);
//! let frame = engine.render_frame(0);
//! frame.save_png("frame.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod color;
pub mod config;
pub mod engine;
pub mod input;
pub mod math;
pub mod mesh;
pub mod render;
pub mod transform;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use color::Color;
pub use config::{RenderConfig, Resolution};
pub use engine::{Engine, FrameStats};
pub use input::{ControlFlow, Input};
pub use mesh::{LoadReport, Mesh, MeshError, Triangle};
pub use render::{DepthEstimatorKind, FrameBuffer};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use spinraster::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{Engine, FrameStats};

    // Scene data
    pub use crate::camera::Camera;
    pub use crate::mesh::{Mesh, MeshError, Triangle};

    // Configuration
    pub use crate::config::{RenderConfig, Resolution};

    // Math
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::color::Color;
    pub use crate::render::{DepthEstimatorKind, FrameBuffer, PixelSample};

    // Window & Input
    pub use crate::input::{ControlFlow, Input};
    pub use crate::window::{FrameLimiter, Window};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::{BarycentricDepthEstimator, PlaneDepthEstimator};
    pub use crate::render::{rasterize_triangle, PixelSample, Renderer};
}
