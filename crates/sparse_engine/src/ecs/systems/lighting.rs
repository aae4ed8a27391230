//! Light culling system
//!
//! Collects point lights whose sphere of influence touches the frustum and
//! packs them for the renderer. The packed buffer is reused across frames.

use crate::ecs::World;
use crate::render::frame::PackedPointLight;
use crate::render::frustum::Frustum;

/// Builds the visible point light list each frame
#[derive(Debug)]
pub struct LightCullingSystem {
    visible: Vec<PackedPointLight>,
    culling_enabled: bool,
}

impl LightCullingSystem {
    /// Create the system; with culling disabled every light is kept
    pub fn new(culling_enabled: bool) -> Self {
        Self {
            visible: Vec::new(),
            culling_enabled,
        }
    }

    /// Rebuild the packed list in light-store order
    ///
    /// A light is dropped only when its sphere lies strictly outside some
    /// plane.
    pub fn cull(&mut self, world: &World, frustum: &Frustum) -> &[PackedPointLight] {
        self.visible.clear();

        for (entity, light) in world.point_lights.iter() {
            let position = world.transforms.get(entity).position;
            if self.culling_enabled && !frustum.intersects_sphere(&position, light.radius) {
                continue;
            }
            self.visible
                .push(PackedPointLight::new(light.color, light.intensity, position, light.radius));
        }

        log::trace!("LightCullingSystem: {} visible point lights", self.visible.len());
        &self.visible
    }

    /// Result of the most recent [`cull`](Self::cull)
    pub fn visible(&self) -> &[PackedPointLight] {
        &self.visible
    }
}
