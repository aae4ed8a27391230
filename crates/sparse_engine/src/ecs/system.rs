//! System trait and per-frame context

use crate::ecs::{Entity, World};
use crate::input::InputIntent;

/// Read-only data every simulation system sees during one tick
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Seconds since the previous tick
    pub delta_time: f32,
    /// This tick's input summary
    pub intent: InputIntent,
    /// The single camera entity
    pub active_camera: Entity,
}

/// System trait for processing entities and components
pub trait System {
    /// Name used in log output
    fn name(&self) -> &'static str;

    /// Run the system for one tick
    fn run(&mut self, world: &mut World, frame: &FrameContext);
}
