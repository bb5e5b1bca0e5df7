//! Discrete input events consumed by the frame loop.

/// One input event from the window (or a scripted source in headless runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// End the render loop once the current frame is finished.
    Quit,
    /// Any key press; nudges the camera forward.
    KeyPress,
}

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlFlow {
    #[default]
    Continue,
    Quit,
}

impl ControlFlow {
    pub fn is_quit(self) -> bool {
        self == ControlFlow::Quit
    }

    /// Quit is sticky: once any event asks to stop, the result stays `Quit`.
    pub fn merge(self, other: ControlFlow) -> ControlFlow {
        if self.is_quit() || other.is_quit() {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        }
    }
}

impl From<Input> for ControlFlow {
    fn from(input: Input) -> Self {
        match input {
            Input::Quit => ControlFlow::Quit,
            Input::KeyPress => ControlFlow::Continue,
        }
    }
}
