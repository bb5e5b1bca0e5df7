//! Point camera.
//!
//! The camera is a single position. Projection adds its `x`/`y` to a vertex
//! and divides by its `z`, so raising `z` pulls the mesh toward the centre of
//! the screen and shrinks it.

use crate::input::Input;
use crate::math::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    step: f32,
}

impl Camera {
    /// Creates a camera at `position` that moves `step` along z per key press.
    pub fn new(position: Vec3, step: f32) -> Self {
        Self { position, step }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn nudge_forward(&mut self) {
        self.position.z += self.step;
    }

    /// Returns the camera after one input event.
    ///
    /// Key presses move the camera; quit leaves it where it is.
    pub fn reduce(mut self, input: Input) -> Self {
        if input == Input::KeyPress {
            self.nudge_forward();
        }
        self
    }

    /// Folds a sequence of inputs into a camera.
    pub fn reduce_all(self, inputs: impl IntoIterator<Item = Input>) -> Self {
        inputs.into_iter().fold(self, Self::reduce)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 1.0), crate::config::DEFAULT_CAMERA_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_sits_one_unit_back() {
        let camera = Camera::default();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(camera.step(), 0.1);
    }

    #[test]
    fn key_press_moves_only_z() {
        let camera = Camera::default().reduce(Input::KeyPress);
        assert_relative_eq!(camera.position().x, 0.0);
        assert_relative_eq!(camera.position().y, 0.0);
        assert_relative_eq!(camera.position().z, 1.1, epsilon = 1e-6);
    }

    #[test]
    fn quit_does_not_move_camera() {
        let camera = Camera::default().reduce(Input::Quit);
        assert_eq!(camera, Camera::default());
    }

    #[test]
    fn reduce_all_folds_in_order() {
        let inputs = [Input::KeyPress, Input::KeyPress, Input::Quit, Input::KeyPress];
        let camera = Camera::default().reduce_all(inputs);
        assert_relative_eq!(camera.position().z, 1.3, epsilon = 1e-6);
    }
}
