//! Collision box component
//!
//! Axis-aligned boxes in the owning entity's local space (offset by its
//! position, never rotated or scaled). Bounds are inclusive: touching faces
//! count as overlapping.

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned collision volume
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CollisionBoxComponent {
    /// Minimum corner relative to the entity position
    pub min: Vec3,

    /// Maximum corner relative to the entity position
    pub max: Vec3,
}

impl CollisionBoxComponent {
    /// Create from local min/max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on the entity with the given half size per axis
    pub fn from_half_extents(half: Vec3) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    /// An all-zero box is the "no collision" sentinel
    pub fn is_disabled(&self) -> bool {
        self.min == Vec3::zeros() && self.max == Vec3::zeros()
    }

    /// Inclusive overlap test of this box at `position` against `other` at
    /// `other_position`. Disabled boxes never overlap anything.
    pub fn overlaps_at(&self, position: &Vec3, other: &Self, other_position: &Vec3) -> bool {
        if self.is_disabled() || other.is_disabled() {
            return false;
        }

        let a_min = position + self.min;
        let a_max = position + self.max;
        let b_min = other_position + other.min;
        let b_max = other_position + other.max;

        (0..3).all(|axis| a_min[axis] <= b_max[axis] && a_max[axis] >= b_min[axis])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> CollisionBoxComponent {
        CollisionBoxComponent::from_half_extents(Vec3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_touching_faces_overlap() {
        let a = unit_box();
        let b = unit_box();
        assert!(a.overlaps_at(&Vec3::zeros(), &b, &Vec3::new(1.0, 0.0, 0.0)));
        assert!(!a.overlaps_at(&Vec3::zeros(), &b, &Vec3::new(1.001, 0.0, 0.0)));
    }

    #[test]
    fn test_separation_on_any_axis_means_no_overlap() {
        let a = unit_box();
        let b = unit_box();
        assert!(!a.overlaps_at(&Vec3::zeros(), &b, &Vec3::new(0.2, 3.0, 0.2)));
        assert!(a.overlaps_at(&Vec3::zeros(), &b, &Vec3::new(0.2, 0.9, -0.2)));
    }

    #[test]
    fn test_disabled_box_never_overlaps() {
        let disabled = CollisionBoxComponent::default();
        assert!(disabled.is_disabled());
        assert!(!disabled.overlaps_at(&Vec3::zeros(), &unit_box(), &Vec3::zeros()));
        assert!(!unit_box().overlaps_at(&Vec3::zeros(), &disabled, &Vec3::zeros()));
    }
}
