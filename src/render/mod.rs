//! Rasterization and compositing.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::{DepthBuffer, FrameBuffer, DEPTH_CLEAR};
pub use rasterizer::{
    rasterize_triangle, rasterize_triangle_into, scan_triangle, Coverage, DepthEstimator,
    DepthEstimatorDispatcher, DepthEstimatorKind, FaceSetup, PixelSample,
};
pub use renderer::Renderer;
