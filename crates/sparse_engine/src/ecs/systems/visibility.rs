//! Object visibility culling
//!
//! Tests each renderable's mesh bounds against the camera frustum. The local
//! AABB is carried through the entity's rotation and scale as an oriented
//! box, then reduced to a world-axis half-extent (Arvo's method) so a single
//! dot product per plane decides rejection.

use crate::ecs::components::{Aabb, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;
use crate::render::frustum::Frustum;

/// World-space center and world-axis half-extents of a transformed AABB
pub fn world_bounds(transform: &TransformComponent, local: &Aabb) -> (Vec3, Vec3) {
    let linear = transform.rotation_scale_matrix();
    let center = transform.position + linear * local.center();
    let half_extents = linear.abs() * local.half_extents();
    (center, half_extents)
}

/// Produces the ordered list of visible renderables each frame
#[derive(Debug)]
pub struct VisibilitySystem {
    visible: Vec<Entity>,
    previous: Vec<Entity>,
    culling_enabled: bool,
    log_changes: bool,
}

impl Default for VisibilitySystem {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl VisibilitySystem {
    /// Create the system
    ///
    /// With `culling_enabled` false every renderable is reported visible.
    /// With `log_changes` set, any change in the visible list is logged.
    pub fn new(culling_enabled: bool, log_changes: bool) -> Self {
        Self {
            visible: Vec::new(),
            previous: Vec::new(),
            culling_enabled,
            log_changes,
        }
    }

    /// Rebuild the visible list, in renderable-store order
    ///
    /// The skybox is always visible. An entity is culled only when its bounds
    /// lie strictly outside at least one plane.
    pub fn cull(&mut self, world: &World, frustum: &Frustum) -> &[Entity] {
        std::mem::swap(&mut self.visible, &mut self.previous);
        self.visible.clear();

        for &entity in world.renderables.entities() {
            if !self.culling_enabled || world.skyboxes.has(entity) {
                self.visible.push(entity);
                continue;
            }

            let (center, half_extents) = world_bounds(world.transforms.get(entity), &world.meshes.get(entity).bounds);
            if frustum.intersects_box(&center, &half_extents) {
                self.visible.push(entity);
            }
        }

        if self.log_changes && self.visible != self.previous {
            log::debug!(
                "Visible entities changed! Count: {} {:?}",
                self.visible.len(),
                self.visible.iter().map(|entity| entity.id()).collect::<Vec<_>>()
            );
        }

        &self.visible
    }

    /// Result of the most recent [`cull`](Self::cull)
    pub fn visible(&self) -> &[Entity] {
        &self.visible
    }

    /// Whether frustum tests are performed
    pub fn culling_enabled(&self) -> bool {
        self.culling_enabled
    }
}
