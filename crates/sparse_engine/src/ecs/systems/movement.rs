//! Movement system
//!
//! Integrates velocity into position (explicit Euler) and keeps cameras
//! attached to their owning entity.

use crate::ecs::system::{FrameContext, System};
use crate::ecs::World;

/// Applies `position += velocity * dt`
#[derive(Debug, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn run(&mut self, world: &mut World, frame: &FrameContext) {
        let World {
            velocities,
            transforms,
            cameras,
            ..
        } = world;

        for (entity, velocity) in velocities.iter() {
            let transform = transforms.get_mut(entity);
            transform.position += velocity.velocity * frame.delta_time;

            if let Some(camera) = cameras.try_get_mut(entity) {
                camera.follow(transform.position);
            }
        }
    }
}
