//! Frame hand-off to the renderer
//!
//! The simulation never talks to a graphics API. Each tick it produces a
//! [`FrameOutput`] and passes it to a [`FrameRenderer`] implementation.

use crate::ecs::components::{MaterialHandle, MeshHandle};
use crate::ecs::Entity;
use crate::foundation::math::{Mat4, Vec3};
use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Point light packed for a GPU storage buffer (std430 compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PackedPointLight {
    /// rgb = color, a = intensity
    pub color_intensity: [f32; 4],
    /// xyz = world position, w = radius
    pub position_radius: [f32; 4],
}

impl PackedPointLight {
    /// Pack a light at `position`
    pub fn new(color: Vec3, intensity: f32, position: Vec3, radius: f32) -> Self {
        Self {
            color_intensity: [color.x, color.y, color.z, intensity],
            position_radius: [position.x, position.y, position.z, radius],
        }
    }
}

/// One visible entity to draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Source entity
    pub entity: Entity,
    /// Mesh to draw
    pub mesh: MeshHandle,
    /// Material to bind
    pub material: MaterialHandle,
    /// Translation * rotation * scale
    pub model_matrix: Mat4,
    /// 1 unless the entity is instanced
    pub instance_count: u32,
    /// Draw with translation stripped from the view matrix
    pub skybox: bool,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameOutput<'a> {
    /// Visible entities in draw order
    pub draws: &'a [DrawItem],
    /// Visible point lights
    pub lights: &'a [PackedPointLight],
    /// Active camera view matrix
    pub view: Mat4,
    /// Active camera projection matrix
    pub projection: Mat4,
    /// Active camera eye position
    pub camera_position: Vec3,
}

impl FrameOutput<'_> {
    /// Packed light array as raw bytes for buffer upload
    pub fn light_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.lights)
    }
}

/// Renderer errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// The backend failed to submit the frame
    #[error("Frame submission failed: {0}")]
    SubmissionFailed(String),

    /// A draw referenced a resource the backend does not know
    #[error("Unknown {kind} handle {id}")]
    UnknownResource {
        /// "mesh" or "material"
        kind: &'static str,
        /// Raw handle value
        id: u32,
    },
}

/// Consumer of per-frame output
pub trait FrameRenderer {
    /// Draw one frame
    ///
    /// # Errors
    /// Backend-specific failures; the engine loop stops on the first one.
    fn submit(&mut self, frame: &FrameOutput<'_>) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_light_layout() {
        assert_eq!(std::mem::size_of::<PackedPointLight>(), 32);

        let light = PackedPointLight::new(Vec3::new(1.0, 0.5, 0.25), 2.0, Vec3::new(3.0, 4.0, 5.0), 6.0);
        let frame = FrameOutput {
            draws: &[],
            lights: std::slice::from_ref(&light),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            camera_position: Vec3::zeros(),
        };

        let floats: &[f32] = bytemuck::cast_slice(frame.light_bytes());
        assert_eq!(floats, &[1.0, 0.5, 0.25, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
