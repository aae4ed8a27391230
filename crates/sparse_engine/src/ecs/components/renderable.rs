//! Rendering components
//!
//! Mesh and material data live outside the simulation; components only carry
//! opaque handles plus the mesh's local bounding box, which visibility
//! culling needs.

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque handle to a mesh owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

/// Opaque handle to a material owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialHandle(pub u32);

/// Axis-aligned bounding box in mesh-local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all `points`; `None` for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for point in rest {
            aabb.min = aabb.min.inf(point);
            aabb.max = aabb.max.sup(point);
        }
        Some(aabb)
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half size per axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// Mesh reference with its local bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshComponent {
    /// Renderer-side mesh
    pub handle: MeshHandle,
    /// Local-space bounding box of the mesh vertices
    pub bounds: Aabb,
}

/// Material reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialComponent {
    /// Renderer-side material
    pub handle: MaterialHandle,
}

/// Marks an entity as a candidate for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderableTag;

/// Marks the skybox; it is never culled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkyboxTag;

/// Draw the mesh `count` times in one instanced call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancedComponent {
    /// Number of instances
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, -4.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -4.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 0.5));
        assert_eq!(aabb.center(), Vec3::new(0.0, 0.5, -1.75));
        assert_eq!(aabb.half_extents(), Vec3::new(1.0, 2.5, 2.25));
    }

    #[test]
    fn test_aabb_from_no_points() {
        assert!(Aabb::from_points(&[]).is_none());
    }
}
