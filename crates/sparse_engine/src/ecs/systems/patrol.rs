//! Patrol system
//!
//! Moves patrolling entities back and forth along their direction. On the
//! tick a leg completes, the direction flips and progress resets; velocity is
//! left as it was for that tick. Zero-magnitude patrols are idle.

use crate::ecs::system::{FrameContext, System};
use crate::ecs::World;

/// Drives [`PatrolComponent`](crate::ecs::components::PatrolComponent) entities
#[derive(Debug, Default)]
pub struct PatrolSystem;

impl System for PatrolSystem {
    fn name(&self) -> &'static str {
        "patrol"
    }

    fn run(&mut self, world: &mut World, frame: &FrameContext) {
        let World {
            patrols,
            velocities,
            speeds,
            ..
        } = world;

        for (entity, patrol) in patrols.iter_mut() {
            if patrol.is_idle() {
                continue;
            }
            if patrol.leg_in_progress() {
                let speed = speeds.get(entity).speed;
                velocities.get_mut(entity).velocity = patrol.direction * speed;
                patrol.progress += speed * frame.delta_time;
            } else {
                log::trace!("Patrol {} reversing", entity);
                patrol.flip();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{PatrolComponent, SpeedComponent, VelocityComponent};
    use crate::ecs::Entity;
    use crate::foundation::math::Vec3;
    use crate::input::InputIntent;
    use approx::assert_relative_eq;

    fn patroller(world: &mut World, magnitude: f32, speed: f32) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, VelocityComponent::default());
        world.add_component(entity, SpeedComponent::new(speed));
        world.add_component(entity, PatrolComponent::new(Vec3::x(), magnitude));
        entity
    }

    fn tick(world: &mut World) {
        let frame = FrameContext {
            delta_time: 0.5,
            intent: InputIntent::default(),
            active_camera: Entity::new(0),
        };
        PatrolSystem.run(world, &frame);
    }

    #[test]
    fn test_patrol_ping_pong() {
        let mut world = World::new();
        let entity = patroller(&mut world, 2.0, 2.0);

        tick(&mut world);
        assert_eq!(world.velocities.get(entity).velocity, Vec3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(world.patrols.get(entity).progress, 1.0);

        tick(&mut world);
        assert_relative_eq!(world.patrols.get(entity).progress, 2.0);

        // Leg complete: flip without touching velocity.
        tick(&mut world);
        let patrol = world.patrols.get(entity);
        assert_eq!(patrol.direction, -Vec3::x());
        assert_eq!(patrol.progress, 0.0);
        assert_eq!(world.velocities.get(entity).velocity, Vec3::new(2.0, 0.0, 0.0));

        tick(&mut world);
        assert_eq!(world.velocities.get(entity).velocity, Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_magnitude_stays_idle() {
        let mut world = World::new();
        let entity = patroller(&mut world, 0.0, 2.0);
        let before = *world.patrols.get(entity);

        for _ in 0..3 {
            tick(&mut world);
        }
        assert_eq!(*world.patrols.get(entity), before);
        assert_eq!(world.velocities.get(entity).velocity, Vec3::zeros());
    }
}
