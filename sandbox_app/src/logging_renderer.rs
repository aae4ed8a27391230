//! Headless renderer that logs what it would draw

use sparse_engine::prelude::*;
use std::collections::HashSet;

/// Validates handles and logs per-frame statistics
pub struct LoggingRenderer {
    meshes: HashSet<MeshHandle>,
    materials: HashSet<MaterialHandle>,
    frames: u64,
    draw_calls: u64,
    instances: u64,
    lights: u64,
    log_every: u64,
}

impl LoggingRenderer {
    /// Create a renderer that knows the given resources
    pub fn new(
        meshes: impl IntoIterator<Item = MeshHandle>,
        materials: impl IntoIterator<Item = MaterialHandle>,
    ) -> Self {
        Self {
            meshes: meshes.into_iter().collect(),
            materials: materials.into_iter().collect(),
            frames: 0,
            draw_calls: 0,
            instances: 0,
            lights: 0,
            log_every: 60,
        }
    }

    /// Log a summary every `frames` frames
    pub fn with_log_interval(mut self, frames: u64) -> Self {
        self.log_every = frames.max(1);
        self
    }

    /// Frames submitted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Log totals
    pub fn report(&self) {
        log::info!(
            "Renderer totals: {} frames, {} draw calls, {} instances, {} light uploads",
            self.frames,
            self.draw_calls,
            self.instances,
            self.lights
        );
    }
}

impl FrameRenderer for LoggingRenderer {
    fn submit(&mut self, frame: &FrameOutput<'_>) -> Result<(), RenderError> {
        for draw in frame.draws {
            if !self.meshes.contains(&draw.mesh) {
                return Err(RenderError::UnknownResource { kind: "mesh", id: draw.mesh.0 });
            }
            if !self.materials.contains(&draw.material) {
                return Err(RenderError::UnknownResource { kind: "material", id: draw.material.0 });
            }
            self.instances += u64::from(draw.instance_count);
        }

        self.frames += 1;
        self.draw_calls += frame.draws.len() as u64;
        self.lights += frame.lights.len() as u64;

        log::debug!(
            "Frame {}: {} draws, {} lights ({} bytes), camera at {:?}",
            self.frames,
            frame.draws.len(),
            frame.lights.len(),
            frame.light_bytes().len(),
            frame.camera_position
        );
        if self.frames % self.log_every == 0 {
            log::info!(
                "Frame {}: {} visible entities, {} visible lights",
                self.frames,
                frame.draws.len(),
                frame.lights.len()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(draws: &[DrawItem]) -> FrameOutput<'_> {
        FrameOutput {
            draws,
            lights: &[],
            view: Mat4::identity(),
            projection: Mat4::identity(),
            camera_position: Vec3::zeros(),
        }
    }

    fn draw(mesh: u32, material: u32) -> DrawItem {
        DrawItem {
            entity: Entity::new(0),
            mesh: MeshHandle(mesh),
            material: MaterialHandle(material),
            model_matrix: Mat4::identity(),
            instance_count: 4,
            skybox: false,
        }
    }

    #[test]
    fn test_unknown_mesh_is_rejected() {
        let mut renderer = LoggingRenderer::new([MeshHandle(0)], [MaterialHandle(0)]);
        assert!(renderer.submit(&frame_with(&[draw(0, 0)])).is_ok());
        assert!(matches!(
            renderer.submit(&frame_with(&[draw(9, 0)])),
            Err(RenderError::UnknownResource { kind: "mesh", id: 9 })
        ));
        assert_eq!(renderer.frames(), 1);
        assert_eq!(renderer.instances, 4);
    }
}
