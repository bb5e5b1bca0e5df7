use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use thiserror::Error;

use crate::config::Resolution;
use crate::input::Input;
use crate::render::FrameBuffer;

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("SDL initialization failed: {0}")]
    Init(String),
    #[error("window creation failed: {0}")]
    Window(String),
    #[error("failed to present frame: {0}")]
    Present(String),
    #[error("frame is {frame} but the window is {window}")]
    SizeMismatch {
        frame: Resolution,
        window: Resolution,
    },
}

/// Returns how long to sleep so a frame that took `elapsed` lasts `target`.
///
/// `None` when the frame already used up its budget.
pub fn frame_delay(elapsed: Duration, target: Duration) -> Option<Duration> {
    target.checked_sub(elapsed).filter(|d| !d.is_zero())
}

/// Sleeps at the end of each frame to hold a target frame interval.
pub struct FrameLimiter {
    target: Duration,
    frame_start: Instant,
}

impl FrameLimiter {
    pub fn new(target_ms: u64) -> Self {
        Self {
            target: Duration::from_millis(target_ms),
            frame_start: Instant::now(),
        }
    }

    /// Marks the start of a frame.
    pub fn start_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Waits if necessary to maintain frame rate and returns the time the
    /// frame took before any sleep.
    pub fn wait(&mut self) -> Duration {
        let elapsed = self.frame_start.elapsed();
        if let Some(remaining) = frame_delay(elapsed, self.target) {
            std::thread::sleep(remaining);
        }
        elapsed
    }
}

pub struct Window {
    // Declared before `_texture_creator` so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    _texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    resolution: Resolution,
    staging: Vec<u8>,
}

impl Window {
    pub fn new(title: &str, resolution: Resolution) -> Result<Self, DisplayError> {
        let sdl_context = sdl2::init().map_err(DisplayError::Init)?;
        let video_subsystem = sdl_context.video().map_err(DisplayError::Init)?;
        let timer_subsystem = sdl_context.timer().map_err(DisplayError::Init)?;

        let window = video_subsystem
            .window(title, resolution.width, resolution.height)
            .position_centered()
            .build()
            .map_err(|e| DisplayError::Window(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| DisplayError::Window(e.to_string()))?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(DisplayError::Init)?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped before texture_creator.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, resolution.width, resolution.height)
            .map_err(|e| DisplayError::Window(e.to_string()))?;

        log::info!("opened {resolution} window \"{title}\"");

        Ok(Self {
            texture,
            _texture_creator: texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            resolution,
            staging: Vec::with_capacity(resolution.pixel_count() * 4),
        })
    }

    /// Drains pending SDL events into discrete inputs, oldest first.
    ///
    /// Closing the window or pressing Escape yields [`Input::Quit`]; any other
    /// key press yields [`Input::KeyPress`].
    pub fn poll_inputs(&mut self) -> Vec<Input> {
        self.event_pump
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(Input::Quit),
                Event::KeyDown { .. } => Some(Input::KeyPress),
                _ => None,
            })
            .collect()
    }

    /// Copies a finished frame onto the window surface.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        if frame.resolution() != self.resolution {
            return Err(DisplayError::SizeMismatch {
                frame: frame.resolution(),
                window: self.resolution,
            });
        }

        frame.write_argb8888(&mut self.staging);
        self.texture
            .update(None, &self.staging, (self.resolution.width * 4) as usize)
            .map_err(|e| DisplayError::Present(e.to_string()))?;

        self.canvas.clear();
        self.canvas
            .copy(
                &self.texture,
                None,
                Some(Rect::new(0, 0, self.resolution.width, self.resolution.height)),
            )
            .map_err(DisplayError::Present)?;
        self.canvas.present();
        Ok(())
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Milliseconds since SDL was initialised; drives the mesh rotation.
    pub fn ticks(&self) -> u64 {
        self.timer_subsystem.ticks64()
    }
}
