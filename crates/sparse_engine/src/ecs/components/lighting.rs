//! Point light component
//!
//! Pure data. The light's world position is the owning entity's transform;
//! the light culling system packs visible lights for the renderer.

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Omnidirectional light with a finite range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLightComponent {
    /// RGB color (0.0 to 1.0 range)
    pub color: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
    /// Range of influence; the culling sphere radius
    pub radius: f32,
}

impl Default for PointLightComponent {
    fn default() -> Self {
        Self {
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            radius: 10.0,
        }
    }
}

impl PointLightComponent {
    /// Create a point light
    pub fn new(color: Vec3, intensity: f32, radius: f32) -> Self {
        Self {
            color,
            intensity,
            radius,
        }
    }
}
