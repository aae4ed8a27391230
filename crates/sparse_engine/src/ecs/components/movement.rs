//! Movement components
//!
//! Velocity is written by exactly one driver system per entity (world-space
//! input, tank input, no-clip input or patrol), may be reduced by the
//! collision system and is integrated into the transform by the movement
//! system.

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Linear velocity in world units per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityComponent {
    /// Current velocity
    pub velocity: Vec3,
}

impl VelocityComponent {
    /// Create with an initial velocity
    pub fn new(velocity: Vec3) -> Self {
        Self { velocity }
    }
}

/// Scalar speed a driver system multiplies its direction by
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedComponent {
    /// World units per second
    pub speed: f32,
}

impl SpeedComponent {
    /// Create with a speed
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

/// Turn rate for tank-style steering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationSpeedComponent {
    /// Degrees per second
    pub degrees_per_second: f32,
}

impl RotationSpeedComponent {
    /// Create with a turn rate in degrees per second
    pub fn new(degrees_per_second: f32) -> Self {
        Self { degrees_per_second }
    }
}

/// Back-and-forth motion along a fixed direction
///
/// `progress` accumulates distance travelled in the current leg. Once it
/// reaches `magnitude` the direction flips and progress restarts from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolComponent {
    /// Direction of the current leg (sign flips every leg)
    pub direction: Vec3,

    /// Length of one leg; zero disables motion
    pub magnitude: f32,

    /// Distance covered in the current leg
    #[serde(default)]
    pub progress: f32,
}

impl PatrolComponent {
    /// Create a patrol starting at the beginning of its first leg
    pub fn new(direction: Vec3, magnitude: f32) -> Self {
        Self {
            direction,
            magnitude,
            progress: 0.0,
        }
    }

    /// A zero-length patrol never moves or flips
    pub fn is_idle(&self) -> bool {
        self.magnitude == 0.0
    }

    /// True while the current leg still has distance left
    pub fn leg_in_progress(&self) -> bool {
        self.progress < self.magnitude
    }

    /// Reverse direction and start the next leg
    pub fn flip(&mut self) {
        self.direction = -self.direction;
        self.progress = 0.0;
    }
}

/// Marks an entity steered by world-axis input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorldInputTag;

/// Marks an entity steered tank-style: lateral input turns, forward input drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TankInputTag;

/// Marks an entity steered relative to the active camera's orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoClipInputTag;
