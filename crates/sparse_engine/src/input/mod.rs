//! Input management
//!
//! Platform code feeds raw key, cursor, scroll and resize events into an
//! [`InputManager`]; once per frame the engine takes an [`InputIntent`], the
//! platform-neutral summary the simulation consumes.

use crate::foundation::math::{Vec2, Vec3};

/// Per-frame input summary
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputIntent {
    /// Movement direction; each axis in {-1, 0, 1}. -Z is "forward".
    pub direction: Vec3,
    /// Look offsets (x right, y up) accumulated since the last frame
    pub look: Vec2,
    /// Scroll offset accumulated since the last frame
    pub zoom: f32,
    /// New framebuffer size if the window was resized
    pub viewport: Option<(u32, u32)>,
}

impl InputIntent {
    /// Build a direction from WASD state: W is -Z, S is +Z, A is -X, D is +X
    pub fn from_keys(forward: bool, back: bool, left: bool, right: bool) -> Self {
        let axis = |negative: bool, positive: bool| f32::from(i8::from(positive) - i8::from(negative));
        Self {
            direction: Vec3::new(axis(left, right), 0.0, axis(forward, back)),
            ..Default::default()
        }
    }

    /// Builder pattern: set look offsets
    pub fn with_look(mut self, x_offset: f32, y_offset: f32) -> Self {
        self.look = Vec2::new(x_offset, y_offset);
        self
    }

    /// Builder pattern: set scroll offset
    pub fn with_zoom(mut self, y_offset: f32) -> Self {
        self.zoom = y_offset;
        self
    }

    /// Builder pattern: report a viewport resize
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some((width, height));
        self
    }
}

/// Where the engine loop pulls input from
pub trait InputSource {
    /// Collect this frame's intent
    fn poll(&mut self) -> InputIntent;

    /// True once the user asked to quit
    fn shutdown_requested(&self) -> bool;
}

/// Key codes the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Forward
    W,
    /// Strafe / turn left
    A,
    /// Back
    S,
    /// Strafe / turn right
    D,
    /// Quit
    Escape,
}

/// Accumulates raw window events between frames
#[derive(Debug, Default)]
pub struct InputManager {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
    quit: bool,
    last_cursor: Option<(f64, f64)>,
    look: Vec2,
    zoom: f32,
    viewport: Option<(u32, u32)>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::W => self.forward = pressed,
            KeyCode::S => self.back = pressed,
            KeyCode::A => self.left = pressed,
            KeyCode::D => self.right = pressed,
            KeyCode::Escape => self.quit |= pressed,
        }
    }

    /// Handle an absolute cursor position
    ///
    /// The first sample only primes the tracker. Screen y grows downward, so
    /// the y offset is reversed to make "mouse up" mean "look up".
    #[allow(clippy::cast_possible_truncation)]
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.last_cursor {
            self.look.x += (x - last_x) as f32;
            self.look.y += (last_y - y) as f32;
        }
        self.last_cursor = Some((x, y));
    }

    /// Handle a scroll wheel event
    #[allow(clippy::cast_possible_truncation)]
    pub fn handle_scroll(&mut self, y_offset: f64) {
        self.zoom += y_offset as f32;
    }

    /// Handle a framebuffer resize
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
    }

    /// Build this frame's intent and reset the per-frame accumulators
    ///
    /// Held keys persist across frames.
    pub fn take_intent(&mut self) -> InputIntent {
        InputIntent {
            look: std::mem::take(&mut self.look),
            zoom: std::mem::take(&mut self.zoom),
            viewport: self.viewport.take(),
            ..InputIntent::from_keys(self.forward, self.back, self.left, self.right)
        }
    }

    /// True once Escape was pressed
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl InputSource for InputManager {
    fn poll(&mut self) -> InputIntent {
        self.take_intent()
    }

    fn shutdown_requested(&self) -> bool {
        self.quit_requested()
    }
}
