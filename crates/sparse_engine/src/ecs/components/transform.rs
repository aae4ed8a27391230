//! Transform component
//!
//! Pure data: world-space position, rotation and scale. Rotation is a unit
//! quaternion and every mutation path that composes rotations renormalizes it.

use crate::foundation::math::{compose_trs, Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Local forward axis rotated by the transform to get an entity's heading
pub const LOCAL_FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// ECS Transform component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation
    pub rotation: Quat,

    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set rotation from axis-angle (radians)
    pub fn with_rotation_axis_angle(mut self, axis: Vec3, angle: f32) -> Self {
        self.rotation = Quat::from_axis_angle(&nalgebra::Unit::new_normalize(axis), angle);
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Apply a world-space rotation on top of the current one
    /// (`new = delta * old`) and renormalize.
    pub fn rotate_world(&mut self, delta: Quat) {
        self.rotation = delta * self.rotation;
        self.rotation.renormalize();
    }

    /// Heading: the local +Z axis in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * LOCAL_FORWARD
    }

    /// Rotation matrix with scale folded into its columns
    pub fn rotation_scale_matrix(&self) -> Mat3 {
        let mut m = self.rotation.to_rotation_matrix().into_inner();
        for (axis, factor) in self.scale.iter().enumerate() {
            m.column_mut(axis).scale_mut(*factor);
        }
        m
    }

    /// Convert to transformation matrix (T * R * S)
    pub fn to_matrix(&self) -> Mat4 {
        compose_trs(&self.position, &self.rotation, &self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_is_identity() {
        let transform = TransformComponent::default();
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(transform.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_forward_follows_rotation() {
        let transform = TransformComponent::identity().with_rotation_axis_angle(Vec3::y(), FRAC_PI_2);
        assert_relative_eq!(transform.forward(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_world_applies_delta_first() {
        let mut transform = TransformComponent::identity().with_rotation_axis_angle(Vec3::x(), FRAC_PI_2);
        transform.rotate_world(Quat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_2));
        // local +Z -> (x rot) -Y -> (world y rot) stays -Y
        assert_relative_eq!(transform.forward(), Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(transform.rotation.quaternion().norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_scale_matrix_matches_full_matrix() {
        let transform = TransformComponent::from_position(Vec3::new(4.0, 5.0, 6.0))
            .with_rotation_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7)
            .with_scale(Vec3::new(2.0, 3.0, 0.5));
        let full = transform.to_matrix();
        let rs = transform.rotation_scale_matrix();
        assert_relative_eq!(full.fixed_view::<3, 3>(0, 0).into_owned(), rs, epsilon = 1e-6);
    }
}
