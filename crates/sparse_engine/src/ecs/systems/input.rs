//! Input-driven velocity systems
//!
//! Each system turns the frame's input direction into a velocity for the
//! entities carrying its tag. Entities are expected to carry exactly one
//! driver tag; with several, the last system to run wins.

use crate::ecs::system::{FrameContext, System};
use crate::ecs::World;
use crate::foundation::math::{safe_normalize, utils, Quat, Vec3};

/// World-axis steering: velocity = normalize(direction) * speed
#[derive(Debug, Default)]
pub struct WorldSpaceInputSystem;

impl System for WorldSpaceInputSystem {
    fn name(&self) -> &'static str {
        "world_space_input"
    }

    fn run(&mut self, world: &mut World, frame: &FrameContext) {
        let direction = safe_normalize(frame.intent.direction);
        let World {
            world_inputs,
            velocities,
            speeds,
            ..
        } = world;

        for &entity in world_inputs.entities() {
            velocities.get_mut(entity).velocity = direction * speeds.get(entity).speed;
        }
    }
}

/// Tank steering
///
/// Lateral input turns about world +Y at the entity's rotation speed
/// (positive x turns clockwise seen from above); forward input drives along
/// the rotated local +Z.
#[derive(Debug, Default)]
pub struct TankInputSystem;

impl System for TankInputSystem {
    fn name(&self) -> &'static str {
        "tank_input"
    }

    fn run(&mut self, world: &mut World, frame: &FrameContext) {
        let direction = frame.intent.direction;
        let World {
            tank_inputs,
            transforms,
            velocities,
            speeds,
            rotation_speeds,
            ..
        } = world;

        for &entity in tank_inputs.entities() {
            let turn_rate = utils::deg_to_rad(rotation_speeds.get(entity).degrees_per_second);
            let angle = turn_rate * -direction.x * frame.delta_time;

            let transform = transforms.get_mut(entity);
            transform.rotate_world(Quat::from_axis_angle(&Vec3::y_axis(), angle));

            velocities.get_mut(entity).velocity = direction.z * transform.forward() * speeds.get(entity).speed;
        }
    }
}

/// Camera-relative steering
///
/// Forward input moves along the active camera's view direction (including
/// its vertical component) and lateral input along its right vector.
#[derive(Debug, Default)]
pub struct NoClipInputSystem;

impl System for NoClipInputSystem {
    fn name(&self) -> &'static str {
        "no_clip_input"
    }

    fn run(&mut self, world: &mut World, frame: &FrameContext) {
        if world.no_clip_inputs.is_empty() {
            return;
        }

        let camera = world.cameras.get(frame.active_camera);
        let input = frame.intent.direction;
        let direction = if input == Vec3::zeros() {
            input
        } else {
            camera.front() * -input.z + camera.right() * input.x
        };

        let World {
            no_clip_inputs,
            velocities,
            speeds,
            ..
        } = world;

        for &entity in no_clip_inputs.entities() {
            velocities.get_mut(entity).velocity = direction * speeds.get(entity).speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{
        CameraComponent, CameraMode, NoClipInputTag, RotationSpeedComponent, SpeedComponent,
        TankInputTag, TransformComponent, VelocityComponent, WorldInputTag,
    };
    use crate::ecs::Entity;
    use crate::input::InputIntent;
    use approx::assert_relative_eq;

    fn frame(direction: Vec3, delta_time: f32, active_camera: Entity) -> FrameContext {
        FrameContext {
            delta_time,
            intent: InputIntent {
                direction,
                ..Default::default()
            },
            active_camera,
        }
    }

    fn mover(world: &mut World, speed: f32) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::identity());
        world.add_component(entity, VelocityComponent::default());
        world.add_component(entity, SpeedComponent::new(speed));
        entity
    }

    #[test]
    fn test_world_space_normalizes_diagonal() {
        let mut world = World::new();
        let entity = mover(&mut world, 2.0);
        world.add_component(entity, WorldInputTag);

        WorldSpaceInputSystem.run(&mut world, &frame(Vec3::new(1.0, 0.0, -1.0), 0.016, entity));

        let velocity = world.velocities.get(entity).velocity;
        assert_relative_eq!(velocity.magnitude(), 2.0, epsilon = 1e-6);
        assert_relative_eq!(velocity, Vec3::new(2.0_f32.sqrt(), 0.0, -(2.0_f32.sqrt())), epsilon = 1e-6);
    }

    #[test]
    fn test_world_space_zero_input_stops() {
        let mut world = World::new();
        let entity = mover(&mut world, 2.0);
        world.add_component(entity, WorldInputTag);
        world.velocities.get_mut(entity).velocity = Vec3::x();

        WorldSpaceInputSystem.run(&mut world, &frame(Vec3::zeros(), 0.016, entity));

        assert_eq!(world.velocities.get(entity).velocity, Vec3::zeros());
    }

    #[test]
    fn test_tank_turns_then_drives_along_heading() {
        let mut world = World::new();
        let entity = mover(&mut world, 3.0);
        world.add_component(entity, TankInputTag);
        world.add_component(entity, RotationSpeedComponent::new(90.0));

        // One second of full left turn: +90 degrees about Y.
        TankInputSystem.run(&mut world, &frame(Vec3::new(-1.0, 0.0, 0.0), 1.0, entity));
        assert_relative_eq!(world.transforms.get(entity).forward(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
        assert_eq!(world.velocities.get(entity).velocity, Vec3::zeros());

        // Driving with +Z input follows the rotated heading.
        TankInputSystem.run(&mut world, &frame(Vec3::new(0.0, 0.0, 1.0), 0.5, entity));
        assert_relative_eq!(world.velocities.get(entity).velocity, Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(world.transforms.get(entity).rotation.quaternion().norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_no_clip_follows_camera_basis() {
        let mut world = World::new();
        let camera = world.create_entity();
        world.add_component(camera, TransformComponent::identity());
        world.add_component(
            camera,
            CameraComponent::new(CameraMode::MouseTurn, Vec3::zeros(), Vec3::y(), 0.0, 0.0),
        );
        let entity = mover(&mut world, 4.0);
        world.add_component(entity, NoClipInputTag);

        // Camera faces +X; "forward" input (-Z) moves along +X.
        NoClipInputSystem.run(&mut world, &frame(Vec3::new(0.0, 0.0, -1.0), 0.016, camera));
        assert_relative_eq!(world.velocities.get(entity).velocity, Vec3::new(4.0, 0.0, 0.0), epsilon = 1e-5);

        // Right strafe moves along the camera's right vector (+Z here).
        NoClipInputSystem.run(&mut world, &frame(Vec3::new(1.0, 0.0, 0.0), 0.016, camera));
        assert_relative_eq!(world.velocities.get(entity).velocity, Vec3::new(0.0, 0.0, 4.0), epsilon = 1e-5);

        NoClipInputSystem.run(&mut world, &frame(Vec3::zeros(), 0.016, camera));
        assert_eq!(world.velocities.get(entity).velocity, Vec3::zeros());
    }
}
