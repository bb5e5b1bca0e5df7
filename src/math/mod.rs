//! Minimal vector math used by the transform pipeline and rasterizer.

pub mod vec3;

pub use vec3::Vec3;
