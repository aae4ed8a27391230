//! Collision response system
//!
//! Brute-force pairwise test of every collision box against every other.
//! Movement is probed one axis at a time from the mover's current position,
//! and any axis whose probe overlaps another box has its velocity zeroed.
//! Zeroing one axis leaves the others intact, which lets movers slide along
//! walls.
//!
//! Entities with a collision box but no velocity are static obstacles: they
//! block others but are never probed themselves.

use crate::ecs::system::{FrameContext, System};
use crate::ecs::World;
use crate::foundation::math::Vec3;

/// Axis-separated collision response
#[derive(Debug, Default)]
pub struct CollisionSystem;

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn run(&mut self, world: &mut World, frame: &FrameContext) {
        let World {
            collision_boxes,
            transforms,
            velocities,
            ..
        } = world;

        for (&mover, mover_box) in collision_boxes.entities().iter().zip(collision_boxes.components()) {
            let Some(velocity) = velocities.try_get_mut(mover) else {
                continue;
            };
            if mover_box.is_disabled() || velocity.velocity == Vec3::zeros() {
                continue;
            }
            let position = transforms.get(mover).position;

            for (&obstacle, obstacle_box) in collision_boxes.entities().iter().zip(collision_boxes.components()) {
                if obstacle == mover {
                    continue;
                }
                let obstacle_position = transforms.get(obstacle).position;

                for axis in 0..3 {
                    let mut probe = position;
                    probe[axis] += velocity.velocity[axis] * frame.delta_time;
                    if mover_box.overlaps_at(&probe, obstacle_box, &obstacle_position) {
                        log::trace!("Collision {} -> {} on axis {}", mover, obstacle, axis);
                        velocity.velocity[axis] = 0.0;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{CollisionBoxComponent, TransformComponent, VelocityComponent};
    use crate::ecs::Entity;
    use crate::input::InputIntent;

    fn frame() -> FrameContext {
        FrameContext {
            delta_time: 1.0,
            intent: InputIntent::default(),
            active_camera: Entity::new(0),
        }
    }

    fn boxed(world: &mut World, position: Vec3, velocity: Option<Vec3>) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::from_position(position));
        world.add_component(entity, CollisionBoxComponent::from_half_extents(Vec3::new(0.5, 0.5, 0.5)));
        if let Some(velocity) = velocity {
            world.add_component(entity, VelocityComponent::new(velocity));
        }
        entity
    }

    #[test]
    fn test_slides_along_wall() {
        let mut world = World::new();
        let mover = boxed(&mut world, Vec3::zeros(), Some(Vec3::new(1.0, 0.0, 1.0)));
        boxed(&mut world, Vec3::new(1.5, 0.0, 0.0), None);

        CollisionSystem.run(&mut world, &frame());

        assert_eq!(world.velocities.get(mover).velocity, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_already_overlapping_zeroes_all_moving_axes() {
        let mut world = World::new();
        let mover = boxed(&mut world, Vec3::zeros(), Some(Vec3::new(0.1, 0.0, 0.1)));
        boxed(&mut world, Vec3::new(0.2, 0.0, 0.0), None);

        CollisionSystem.run(&mut world, &frame());

        assert_eq!(world.velocities.get(mover).velocity, Vec3::zeros());
    }

    #[test]
    fn test_clear_path_keeps_velocity() {
        let mut world = World::new();
        let mover = boxed(&mut world, Vec3::zeros(), Some(Vec3::new(1.0, 0.0, 0.0)));
        boxed(&mut world, Vec3::new(0.0, 0.0, 5.0), None);

        CollisionSystem.run(&mut world, &frame());

        assert_eq!(world.velocities.get(mover).velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_disabled_box_is_ignored() {
        let mut world = World::new();
        let mover = boxed(&mut world, Vec3::zeros(), Some(Vec3::new(1.0, 0.0, 0.0)));
        let wall = boxed(&mut world, Vec3::new(1.5, 0.0, 0.0), None);
        world.add_component(wall, CollisionBoxComponent::default());

        CollisionSystem.run(&mut world, &frame());

        assert_eq!(world.velocities.get(mover).velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_two_movers_block_each_other() {
        let mut world = World::new();
        let left = boxed(&mut world, Vec3::new(-1.0, 0.0, 0.0), Some(Vec3::new(1.0, 0.0, 0.0)));
        let right = boxed(&mut world, Vec3::new(1.0, 0.0, 0.0), Some(Vec3::new(-1.0, 0.0, 0.0)));

        CollisionSystem.run(&mut world, &frame());

        // Each probe lands on the other's current position.
        assert_eq!(world.velocities.get(left).velocity, Vec3::zeros());
        assert_eq!(world.velocities.get(right).velocity, Vec3::zeros());
    }
}
