//! Scripted input source
//!
//! Replays a fixed sequence of window events through an `InputManager` so the
//! demo exercises every driver system without a window.

use sparse_engine::input::{InputIntent, InputManager, InputSource, KeyCode};

/// Feeds one phase of synthetic events per frame
pub struct ScriptedInput {
    manager: InputManager,
    frame: u32,
    total_frames: u32,
    cursor: (f64, f64),
}

impl ScriptedInput {
    /// Stop after `total_frames` frames
    pub fn new(total_frames: u32) -> Self {
        Self {
            manager: InputManager::new(),
            frame: 0,
            total_frames,
            cursor: (800.0, 600.0),
        }
    }

    fn feed_events(&mut self) {
        let phase_length = (self.total_frames / 5).max(1);
        let phase = self.frame / phase_length;
        let phase_start = self.frame % phase_length == 0;

        if phase_start {
            log::info!("Scripted input: phase {} at frame {}", phase, self.frame);
            for key in [KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D] {
                self.manager.handle_key_input(key, false);
            }
        }

        match phase {
            // Fly forward
            0 => self.manager.handle_key_input(KeyCode::W, true),
            // Turn right while strafing
            1 => {
                self.manager.handle_key_input(KeyCode::D, true);
                self.cursor.0 += 4.0;
                self.manager.handle_mouse_move(self.cursor.0, self.cursor.1);
            }
            // Look down and zoom in
            2 => {
                self.cursor.1 += 2.0;
                self.manager.handle_mouse_move(self.cursor.0, self.cursor.1);
                self.manager.handle_scroll(0.25);
            }
            // Back up after a resize
            3 => {
                if phase_start {
                    self.manager.handle_resize(1280, 720);
                }
                self.manager.handle_key_input(KeyCode::S, true);
            }
            // Idle, then quit on the last frame
            _ => {
                if self.frame + 1 >= self.total_frames {
                    self.manager.handle_key_input(KeyCode::Escape, true);
                }
            }
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputIntent {
        if self.frame == 0 {
            // Prime the cursor tracker so the first real move has a reference.
            self.manager.handle_mouse_move(self.cursor.0, self.cursor.1);
        }
        self.feed_events();
        self.frame += 1;
        self.manager.take_intent()
    }

    fn shutdown_requested(&self) -> bool {
        self.frame >= self.total_frames || self.manager.quit_requested()
    }
}
