//! Component trait and the closed component catalogue
//!
//! Every component type the engine knows about is listed in
//! [`ComponentKind`]. Each one owns exactly one [`SparseSet`] inside the
//! [`World`]; the [`Component`] trait maps a type to its bit and its store.

use crate::ecs::storage::SparseSet;
use crate::ecs::World;
use bitflags::bitflags;

bitflags! {
    /// One bit per component type
    ///
    /// An entity's signature is the union of the bits of every store that
    /// holds it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentKind: u32 {
        /// [`TransformComponent`](super::components::TransformComponent)
        const TRANSFORM = 1 << 0;
        /// [`VelocityComponent`](super::components::VelocityComponent)
        const VELOCITY = 1 << 1;
        /// [`SpeedComponent`](super::components::SpeedComponent)
        const SPEED = 1 << 2;
        /// [`RotationSpeedComponent`](super::components::RotationSpeedComponent)
        const ROTATION_SPEED = 1 << 3;
        /// [`PatrolComponent`](super::components::PatrolComponent)
        const PATROL = 1 << 4;
        /// [`CollisionBoxComponent`](super::components::CollisionBoxComponent)
        const COLLISION = 1 << 5;
        /// [`RenderableTag`](super::components::RenderableTag)
        const RENDERABLE = 1 << 6;
        /// [`SkyboxTag`](super::components::SkyboxTag)
        const SKYBOX = 1 << 7;
        /// [`InstancedComponent`](super::components::InstancedComponent)
        const INSTANCED = 1 << 8;
        /// [`MeshComponent`](super::components::MeshComponent)
        const MESH = 1 << 9;
        /// [`MaterialComponent`](super::components::MaterialComponent)
        const MATERIAL = 1 << 10;
        /// [`WorldInputTag`](super::components::WorldInputTag)
        const WORLD_INPUT = 1 << 11;
        /// [`TankInputTag`](super::components::TankInputTag)
        const TANK_INPUT = 1 << 12;
        /// [`NoClipInputTag`](super::components::NoClipInputTag)
        const NO_CLIP_INPUT = 1 << 13;
        /// [`CameraComponent`](super::components::CameraComponent)
        const CAMERA = 1 << 14;
        /// [`PointLightComponent`](super::components::PointLightComponent)
        const POINT_LIGHT = 1 << 15;
    }
}

impl ComponentKind {
    /// Components the systems expect alongside each kind in `self`
    ///
    /// Systems index these stores directly, so an entity that carries a kind
    /// without its requirements would panic mid-frame. Scene loading checks
    /// this up front.
    pub fn requirements(self) -> Self {
        let mut required = Self::empty();
        for kind in self.iter() {
            required |= match kind {
                Self::VELOCITY
                | Self::COLLISION
                | Self::CAMERA
                | Self::POINT_LIGHT => Self::TRANSFORM,
                Self::WORLD_INPUT | Self::NO_CLIP_INPUT | Self::PATROL => {
                    Self::VELOCITY | Self::SPEED
                }
                Self::TANK_INPUT => {
                    Self::TRANSFORM | Self::VELOCITY | Self::SPEED | Self::ROTATION_SPEED
                }
                Self::RENDERABLE => Self::TRANSFORM | Self::MESH | Self::MATERIAL,
                Self::SKYBOX | Self::INSTANCED => Self::RENDERABLE,
                _ => Self::empty(),
            };
        }
        required
    }

    /// Requirements of `self` that `self` does not itself satisfy
    ///
    /// Closed over transitively, so `SKYBOX` alone reports the renderable's
    /// own needs as well.
    pub fn missing_requirements(self) -> Self {
        let mut needed = self.requirements();
        loop {
            let expanded = needed | needed.requirements();
            if expanded == needed {
                break;
            }
            needed = expanded;
        }
        needed.difference(self)
    }
}

/// A type stored in one of the world's sparse sets
pub trait Component: Sized + 'static {
    /// This type's bit in an entity signature
    const KIND: ComponentKind;

    /// The world's store for this type
    fn store(world: &World) -> &SparseSet<Self>;

    /// Mutable access to the world's store for this type
    fn store_mut(world: &mut World) -> &mut SparseSet<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct_bits() {
        let all: Vec<ComponentKind> = ComponentKind::all().iter().collect();
        assert_eq!(all.len(), 16);
        for kind in &all {
            assert_eq!(kind.bits().count_ones(), 1);
        }
    }

    #[test]
    fn test_tank_requirements() {
        let missing = (ComponentKind::TANK_INPUT | ComponentKind::TRANSFORM).missing_requirements();
        assert_eq!(
            missing,
            ComponentKind::VELOCITY | ComponentKind::SPEED | ComponentKind::ROTATION_SPEED
        );
    }

    #[test]
    fn test_skybox_requirements_are_transitive() {
        let missing = ComponentKind::SKYBOX.missing_requirements();
        assert!(missing.contains(ComponentKind::RENDERABLE));
        assert!(missing.contains(ComponentKind::MESH | ComponentKind::MATERIAL));
        assert!(missing.contains(ComponentKind::TRANSFORM));
    }

    #[test]
    fn test_static_obstacle_needs_only_transform() {
        let signature = ComponentKind::COLLISION | ComponentKind::TRANSFORM;
        assert!(signature.missing_requirements().is_empty());
    }
}
