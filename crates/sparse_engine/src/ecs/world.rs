//! ECS World implementation
//!
//! One [`SparseSet`] per component type in the closed catalogue. Stores are
//! public fields so systems can borrow several of them mutably at once.

use super::component::{Component, ComponentKind};
use super::components::{
    CameraComponent, CollisionBoxComponent, InstancedComponent, MaterialComponent, MeshComponent,
    NoClipInputTag, PatrolComponent, PointLightComponent, RenderableTag, RotationSpeedComponent,
    SkyboxTag, SpeedComponent, TankInputTag, TransformComponent, VelocityComponent, WorldInputTag,
};
use super::storage::SparseSet;
use super::Entity;
use thiserror::Error;

/// Active camera lookup failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CameraError {
    /// No entity carries a camera
    #[error("No active camera: exactly one entity must have a camera")]
    Missing,

    /// More than one entity carries a camera
    #[error("Ambiguous camera: found {count} camera entities, expected exactly one")]
    Ambiguous {
        /// Number of camera entities
        count: usize,
    },
}

/// ECS World containing all entities and components
#[derive(Default)]
pub struct World {
    next_entity_id: u32,

    /// Position, rotation and scale
    pub transforms: SparseSet<TransformComponent>,
    /// Linear velocity
    pub velocities: SparseSet<VelocityComponent>,
    /// Driver speed
    pub speeds: SparseSet<SpeedComponent>,
    /// Tank turn rate
    pub rotation_speeds: SparseSet<RotationSpeedComponent>,
    /// Ping-pong motion
    pub patrols: SparseSet<PatrolComponent>,
    /// Axis-aligned collision volumes
    pub collision_boxes: SparseSet<CollisionBoxComponent>,
    /// Draw candidates
    pub renderables: SparseSet<RenderableTag>,
    /// Never-culled skybox
    pub skyboxes: SparseSet<SkyboxTag>,
    /// Instance counts
    pub instanced: SparseSet<InstancedComponent>,
    /// Mesh handles and bounds
    pub meshes: SparseSet<MeshComponent>,
    /// Material handles
    pub materials: SparseSet<MaterialComponent>,
    /// World-axis steering
    pub world_inputs: SparseSet<WorldInputTag>,
    /// Tank steering
    pub tank_inputs: SparseSet<TankInputTag>,
    /// Camera-relative steering
    pub no_clip_inputs: SparseSet<NoClipInputTag>,
    /// Cameras
    pub cameras: SparseSet<CameraComponent>,
    /// Point lights
    pub point_lights: SparseSet<PointLightComponent>,
}

macro_rules! impl_component {
    ($($ty:ty => $field:ident, $kind:ident;)*) => {
        $(
            impl Component for $ty {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn store(world: &World) -> &SparseSet<Self> {
                    &world.$field
                }

                fn store_mut(world: &mut World) -> &mut SparseSet<Self> {
                    &mut world.$field
                }
            }
        )*

        impl World {
            /// Union of the kinds of every store holding `entity`
            pub fn signature(&self, entity: Entity) -> ComponentKind {
                let mut signature = ComponentKind::empty();
                $(
                    if self.$field.has(entity) {
                        signature |= ComponentKind::$kind;
                    }
                )*
                signature
            }

            /// Reserve sparse capacity for `entity_count` ids in every store
            pub fn reserve(&mut self, entity_count: usize) {
                $( self.$field.reserve(entity_count); )*
            }

            /// Drop all entities and components
            pub fn clear(&mut self) {
                $( self.$field.clear(); )*
                self.next_entity_id = 0;
            }
        }
    };
}

impl_component! {
    TransformComponent => transforms, TRANSFORM;
    VelocityComponent => velocities, VELOCITY;
    SpeedComponent => speeds, SPEED;
    RotationSpeedComponent => rotation_speeds, ROTATION_SPEED;
    PatrolComponent => patrols, PATROL;
    CollisionBoxComponent => collision_boxes, COLLISION;
    RenderableTag => renderables, RENDERABLE;
    SkyboxTag => skyboxes, SKYBOX;
    InstancedComponent => instanced, INSTANCED;
    MeshComponent => meshes, MESH;
    MaterialComponent => materials, MATERIAL;
    WorldInputTag => world_inputs, WORLD_INPUT;
    TankInputTag => tank_inputs, TANK_INPUT;
    NoClipInputTag => no_clip_inputs, NO_CLIP_INPUT;
    CameraComponent => cameras, CAMERA;
    PointLightComponent => point_lights, POINT_LIGHT;
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity; ids are sequential from zero
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        entity
    }

    /// Number of entities created so far
    pub fn entity_count(&self) -> usize {
        self.next_entity_id as usize
    }

    /// Iterate every entity id handed out so far
    pub fn entities(&self) -> impl Iterator<Item = Entity> {
        (0..self.next_entity_id).map(Entity::new)
    }

    /// Add a component, returning the value it replaced if any
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Option<C> {
        C::store_mut(self).add(entity, component)
    }

    /// Remove a component if present
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Option<C> {
        let store = C::store_mut(self);
        store.has(entity).then(|| store.remove(entity))
    }

    /// Check whether `entity` carries a `C`
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        C::store(self).has(entity)
    }

    /// Get a component from an entity
    pub fn get_component<C: Component>(&self, entity: Entity) -> Option<&C> {
        C::store(self).try_get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        C::store_mut(self).try_get_mut(entity)
    }

    /// Direct access to the store for `C`
    pub fn store<C: Component>(&self) -> &SparseSet<C> {
        C::store(self)
    }

    /// The single camera entity
    ///
    /// # Errors
    /// [`CameraError::Missing`] when no entity has a camera,
    /// [`CameraError::Ambiguous`] when more than one does.
    pub fn active_camera(&self) -> Result<Entity, CameraError> {
        match self.cameras.entities() {
            [camera] => Ok(*camera),
            [] => Err(CameraError::Missing),
            many => Err(CameraError::Ambiguous { count: many.len() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_entities_are_sequential() {
        let mut world = World::new();
        let ids: Vec<u32> = (0..4).map(|_| world.create_entity().id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(world.entity_count(), 4);
        assert_eq!(world.entities().count(), 4);
    }

    #[test]
    fn test_generic_component_access() {
        let mut world = World::new();
        let entity = world.create_entity();

        assert!(world.add_component(entity, SpeedComponent::new(3.0)).is_none());
        assert!(world.has_component::<SpeedComponent>(entity));
        assert!(!world.has_component::<VelocityComponent>(entity));

        world.get_component_mut::<SpeedComponent>(entity).unwrap().speed = 5.0;
        let replaced = world.add_component(entity, SpeedComponent::new(7.0));
        assert_eq!(replaced, Some(SpeedComponent::new(5.0)));
        assert_eq!(world.get_component::<SpeedComponent>(entity).unwrap().speed, 7.0);

        assert_eq!(world.remove_component::<SpeedComponent>(entity), Some(SpeedComponent::new(7.0)));
        assert_eq!(world.remove_component::<SpeedComponent>(entity), None);
    }

    #[test]
    fn test_signature_tracks_stores() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::from_position(Vec3::x()));
        world.add_component(entity, VelocityComponent::default());
        world.add_component(entity, WorldInputTag);

        assert_eq!(
            world.signature(entity),
            ComponentKind::TRANSFORM | ComponentKind::VELOCITY | ComponentKind::WORLD_INPUT
        );
        assert_eq!(world.signature(entity).missing_requirements(), ComponentKind::SPEED);
    }

    #[test]
    fn test_active_camera_requires_exactly_one() {
        let mut world = World::new();
        assert_eq!(world.active_camera(), Err(CameraError::Missing));

        let first = world.create_entity();
        world.add_component(first, CameraComponent::default());
        assert_eq!(world.active_camera().unwrap(), first);

        let second = world.create_entity();
        world.add_component(second, CameraComponent::default());
        assert_eq!(world.active_camera(), Err(CameraError::Ambiguous { count: 2 }));
    }

    #[test]
    fn test_clear_resets_ids() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, RenderableTag);
        world.clear();
        assert_eq!(world.entity_count(), 0);
        assert!(world.renderables.is_empty());
        assert_eq!(world.create_entity().id(), 0);
    }
}
