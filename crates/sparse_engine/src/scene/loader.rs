//! Scene instantiation
//!
//! Turns a [`SceneDescription`] into entities and components. Loading fails
//! on the first bad instance; entities created before the failure stay in the
//! world, so callers should discard it on error.

use super::description::{ComponentTemplate, SceneDescription, SceneEntity};
use super::SceneError;
use crate::ecs::components::{
    CameraComponent, InstancedComponent, MaterialComponent, MaterialHandle, MeshComponent,
    MeshHandle, NoClipInputTag, PatrolComponent, RenderableTag, RotationSpeedComponent, SkyboxTag,
    SpeedComponent, TankInputTag, TransformComponent, VelocityComponent, WorldInputTag,
};
use crate::ecs::{Entity, World};
use crate::foundation::math::safe_normalize;
use std::collections::HashMap;

/// Builds entities from scene descriptions
pub struct SceneLoader;

impl SceneLoader {
    /// Instantiate every entity of `description` into `world`, in order
    ///
    /// Returns the created entities.
    ///
    /// # Errors
    /// * [`SceneError::DuplicateTemplate`] if two templates share a name
    /// * [`SceneError::UnknownTemplate`] for an instance naming no template
    /// * [`SceneError::MissingTransform`] for a position, scale or camera on
    ///   an entity without a transform
    /// * [`SceneError::MissingComponents`] when an entity's components lack
    ///   something a system needs
    pub fn populate(world: &mut World, description: &SceneDescription) -> Result<Vec<Entity>, SceneError> {
        let mut templates = HashMap::with_capacity(description.templates.len());
        for template in &description.templates {
            if templates.insert(template.name.as_str(), template.components.as_slice()).is_some() {
                return Err(SceneError::DuplicateTemplate(template.name.clone()));
            }
        }

        world.reserve(world.entity_count() + description.entities.len());

        let mut spawned = Vec::with_capacity(description.entities.len());
        for (index, instance) in description.entities.iter().enumerate() {
            let components = templates
                .get(instance.template.as_str())
                .ok_or_else(|| SceneError::UnknownTemplate {
                    index,
                    name: instance.template.clone(),
                })?;

            let entity = world.create_entity();
            Self::apply_template(world, entity, components);
            Self::apply_instance(world, entity, instance)?;

            let missing = world.signature(entity).missing_requirements();
            if !missing.is_empty() {
                return Err(SceneError::MissingComponents {
                    entity,
                    template: instance.template.clone(),
                    missing,
                });
            }

            log::trace!("Spawned {} from template '{}'", entity, instance.template);
            spawned.push(entity);
        }

        log::info!(
            "Scene loaded: {} entities from {} templates",
            spawned.len(),
            description.templates.len()
        );
        Ok(spawned)
    }

    fn apply_template(world: &mut World, entity: Entity, components: &[ComponentTemplate]) {
        for component in components {
            match *component {
                ComponentTemplate::Mesh { handle, bounds } => {
                    world.add_component(entity, MeshComponent { handle: MeshHandle(handle), bounds });
                }
                ComponentTemplate::Material { handle } => {
                    world.add_component(entity, MaterialComponent { handle: MaterialHandle(handle) });
                }
                ComponentTemplate::Renderable => {
                    world.add_component(entity, RenderableTag);
                }
                ComponentTemplate::Transform => {
                    world.add_component(entity, TransformComponent::identity());
                }
                ComponentTemplate::Skybox => {
                    world.add_component(entity, SkyboxTag);
                }
                ComponentTemplate::Velocity => {
                    world.add_component(entity, VelocityComponent::default());
                }
                ComponentTemplate::Speed(speed) => {
                    world.add_component(entity, SpeedComponent::new(speed));
                }
                ComponentTemplate::RotationSpeed(degrees_per_second) => {
                    world.add_component(entity, RotationSpeedComponent::new(degrees_per_second));
                }
            }
        }
    }

    fn apply_instance(world: &mut World, entity: Entity, instance: &SceneEntity) -> Result<(), SceneError> {
        let missing_transform = |part: &'static str| SceneError::MissingTransform {
            entity,
            template: instance.template.clone(),
            part,
        };

        if let Some(position) = instance.position {
            world
                .transforms
                .try_get_mut(entity)
                .ok_or_else(|| missing_transform("position"))?
                .position = position;
        }
        if let Some(scale) = instance.scale {
            world
                .transforms
                .try_get_mut(entity)
                .ok_or_else(|| missing_transform("scale"))?
                .scale = scale;
        }

        if instance.world_input {
            world.add_component(entity, WorldInputTag);
        }
        if instance.tank_input {
            world.add_component(entity, TankInputTag);
        }
        if instance.no_clip {
            world.add_component(entity, NoClipInputTag);
        }
        if let Some(patrol) = instance.patrol {
            world.add_component(
                entity,
                PatrolComponent::new(safe_normalize(patrol.direction), patrol.magnitude),
            );
        }
        if let Some(collision) = instance.collision {
            world.add_component(entity, collision);
        }
        if let Some(light) = instance.point_light {
            world.add_component(entity, light);
        }
        if let Some(count) = instance.instances {
            world.add_component(entity, InstancedComponent { count });
        }

        if let Some(spec) = instance.camera {
            let anchor = world
                .transforms
                .try_get(entity)
                .ok_or_else(|| missing_transform("camera"))?
                .position;
            let mut camera = CameraComponent::new(spec.mode, spec.offset, spec.world_up, spec.yaw, spec.pitch)
                .with_projection(spec.zoom, spec.near, spec.far);
            camera.follow(anchor);
            world.add_component(entity, camera);
        }

        Ok(())
    }
}
