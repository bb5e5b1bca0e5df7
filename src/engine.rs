//! Frame orchestration.
//!
//! The [`Engine`] struct owns everything that lives across frames: the mesh,
//! the camera, the colour and depth buffers and the random source used to
//! colour triangles. A frame is driven as
//!
//! ```ignore
//! engine.begin_frame();
//! let stats = engine.draw_mesh(tick);
//! let frame = engine.end_frame();
//! ```
//!
//! or with [`Engine::render_frame`], which does all three.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::Camera;
use crate::color::Color;
use crate::config::{RenderConfig, Resolution};
use crate::input::{ControlFlow, Input};
use crate::mesh::Mesh;
use crate::render::{
    rasterize_triangle_into, DepthEstimatorDispatcher, DepthEstimatorKind, FrameBuffer,
    PixelSample, Renderer,
};
use crate::transform::{project, rotate};

/// Counters for one call to [`Engine::draw_mesh`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    /// Triangles that produced no samples (off screen or degenerate).
    pub rejected: usize,
    pub samples_written: usize,
}

pub struct Engine<R = StdRng> {
    renderer: Renderer,
    depth_estimator: DepthEstimatorDispatcher,
    mesh: Mesh,
    camera: Camera,
    rng: R,
    // Reused across triangles to avoid an allocation per face.
    samples: Vec<PixelSample>,
}

impl Engine<StdRng> {
    /// Creates an engine with an entropy-seeded random source.
    pub fn new(config: &RenderConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates an engine whose triangle colours are reproducible for `seed`.
    pub fn seeded(config: &RenderConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: &RenderConfig, rng: R) -> Self {
        Self {
            renderer: Renderer::new(config.resolution),
            depth_estimator: DepthEstimatorDispatcher::default(),
            mesh: Mesh::default(),
            camera: Camera::new(config.initial_camera, config.camera_step),
            rng,
            samples: Vec::new(),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.renderer.resolution()
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_depth_estimator(&mut self, kind: DepthEstimatorKind) {
        self.depth_estimator.set_kind(kind);
    }

    pub fn depth_estimator(&self) -> DepthEstimatorKind {
        self.depth_estimator.active_kind()
    }

    /// Applies one input event to the camera.
    ///
    /// Only call this between frames; the camera must not change while a
    /// mesh is being drawn.
    pub fn handle_input(&mut self, input: Input) -> ControlFlow {
        self.camera = self.camera.reduce(input);
        ControlFlow::from(input)
    }

    /// Applies every pending input in order and reports whether any asked to quit.
    pub fn handle_inputs(&mut self, inputs: impl IntoIterator<Item = Input>) -> ControlFlow {
        inputs
            .into_iter()
            .fold(ControlFlow::Continue, |flow, input| {
                flow.merge(self.handle_input(input))
            })
    }

    /// Clears the colour buffer to black and the depth buffer to negative infinity.
    pub fn begin_frame(&mut self) {
        self.renderer.clear();
    }

    /// Rotates, projects, rasterizes and composites every triangle of the mesh.
    ///
    /// Each triangle gets one random colour, drawn even when the triangle is
    /// rejected so the colour sequence depends only on the triangle order.
    pub fn draw_mesh(&mut self, tick: u64) -> FrameStats {
        let resolution = self.renderer.resolution();
        let camera = self.camera.position();
        let mut stats = FrameStats::default();

        for triangle in self.mesh.triangles() {
            let points = triangle
                .points
                .map(|vertex| project(rotate(vertex, tick), camera));
            let color = Color::random(&mut self.rng);

            self.samples.clear();
            let produced = rasterize_triangle_into(
                points,
                resolution,
                &self.depth_estimator,
                &mut self.samples,
            );

            stats.triangles += 1;
            if produced == 0 {
                stats.rejected += 1;
                continue;
            }
            stats.samples_written += self.renderer.composite(&self.samples, color);
        }

        log::trace!(
            "tick {tick}: {} triangles, {} rejected, {} samples written",
            stats.triangles,
            stats.rejected,
            stats.samples_written
        );
        stats
    }

    /// Returns the finished frame for presentation.
    pub fn end_frame(&self) -> &FrameBuffer {
        self.renderer.color_buffer()
    }

    /// Runs a whole frame at `tick` and returns the finished colour grid.
    pub fn render_frame(&mut self, tick: u64) -> &FrameBuffer {
        self.begin_frame();
        self.draw_mesh(tick);
        self.end_frame()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::mesh::Triangle;

    const ONE_TRIANGLE: &str = "\
v 0.0 0.0 0.0
v 0.5 0.0 0.0
v 0.0 0.5 0.0
f 1 2 3
";

    fn small_config() -> RenderConfig {
        RenderConfig {
            resolution: Resolution::new(80, 60),
            ..RenderConfig::default()
        }
    }

    fn lit_pixels(frame: &FrameBuffer) -> usize {
        frame
            .pixels()
            .iter()
            .filter(|&&c| c != Color::BLACK)
            .count()
    }

    #[test]
    fn single_triangle_frame_has_visible_pixels() {
        let mut engine = Engine::seeded(&RenderConfig::default(), 1);
        engine.set_mesh(Mesh::from_source(ONE_TRIANGLE).unwrap());

        let frame = engine.render_frame(0);
        assert!(lit_pixels(frame) > 0);
        // footprint: x in [400, 400 + 200), y in [300 - 150, 300)
        for y in 0..frame.height() as i32 {
            for x in 0..frame.width() as i32 {
                if frame.get_pixel(x, y) != Some(Color::BLACK) {
                    assert!((400..600).contains(&x), "x = {x}");
                    assert!((150..300).contains(&y), "y = {y}");
                }
            }
        }
    }

    #[test]
    fn seeded_colours_are_reproducible() {
        let mut engine = Engine::seeded(&small_config(), 42);
        engine.set_mesh(Mesh::from_source(ONE_TRIANGLE).unwrap());
        let frame = engine.render_frame(0);

        let mut expected_rng = StdRng::seed_from_u64(42);
        let expected = Color::random(&mut expected_rng);
        let colours: Vec<Color> = frame
            .pixels()
            .iter()
            .copied()
            .filter(|&c| c != Color::BLACK)
            .collect();
        assert!(!colours.is_empty());
        // a single triangle is flat coloured
        if expected != Color::BLACK {
            assert!(colours.iter().all(|&c| c == expected));
        }
    }

    #[test]
    fn empty_mesh_renders_black() {
        let mut engine = Engine::seeded(&small_config(), 0);
        let frame = engine.render_frame(1234);
        assert_eq!(lit_pixels(frame), 0);
    }

    #[test]
    fn begin_frame_clears_previous_frame() {
        let mut engine = Engine::seeded(&small_config(), 3);
        engine.set_mesh(Mesh::from_source(ONE_TRIANGLE).unwrap());
        engine.render_frame(0);

        engine.set_mesh(Mesh::default());
        engine.begin_frame();
        assert_eq!(lit_pixels(engine.end_frame()), 0);
        assert!(engine
            .renderer()
            .depth_buffer()
            .depths()
            .iter()
            .all(|&d| d == f32::NEG_INFINITY));
    }

    #[test]
    fn off_screen_triangle_is_counted_as_rejected() {
        let mut engine = Engine::seeded(&small_config(), 5);
        engine.set_mesh(Mesh::new(vec![
            Triangle::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.5, 0.0, 0.0),
                Vec3::new(0.0, 0.5, 0.0),
            ),
            Triangle::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(3.0, 0.0, 0.0),
                Vec3::new(0.0, 0.5, 0.0),
            ),
        ]));
        engine.begin_frame();
        let stats = engine.draw_mesh(0);
        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.rejected, 1);
        assert!(stats.samples_written > 0);
    }

    #[test]
    fn key_presses_move_camera_and_quit_stops() {
        let mut engine = Engine::seeded(&small_config(), 0);
        let flow = engine.handle_inputs([Input::KeyPress, Input::KeyPress]);
        assert_eq!(flow, ControlFlow::Continue);
        assert!((engine.camera().position().z - 1.2).abs() < 1e-6);

        assert!(engine.handle_inputs([Input::Quit]).is_quit());
    }

    #[test]
    fn pushing_the_camera_back_shrinks_the_footprint() {
        let mut engine = Engine::seeded(&small_config(), 9);
        engine.set_mesh(Mesh::from_source(ONE_TRIANGLE).unwrap());
        let near = lit_pixels(engine.render_frame(0));

        engine.handle_inputs(std::iter::repeat(Input::KeyPress).take(10));
        let far = lit_pixels(engine.render_frame(0));
        assert!(far > 0);
        assert!(far < near);
    }

    #[test]
    fn both_depth_estimators_render_the_same_footprint() {
        let mesh = Mesh::from_source(ONE_TRIANGLE).unwrap();

        let mut plane = Engine::seeded(&small_config(), 11);
        plane.set_mesh(mesh.clone());
        let plane_lit = lit_pixels(plane.render_frame(250));

        let mut bary = Engine::seeded(&small_config(), 11);
        bary.set_depth_estimator(DepthEstimatorKind::Barycentric);
        bary.set_mesh(mesh);
        assert_eq!(bary.depth_estimator(), DepthEstimatorKind::Barycentric);
        assert_eq!(lit_pixels(bary.render_frame(250)), plane_lit);
    }
}
