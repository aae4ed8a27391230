//! Serialized scene description
//!
//! A scene is a set of named templates (bundles of shared components) plus a
//! list of entity instances, each naming a template and adding per-instance
//! parts. Scenes are written in RON with implicit `Some`.
//!
//! ```ron
//! (
//!     templates: [
//!         (name: "cube", components: [
//!             Mesh(handle: 0, bounds: (min: (-1.0, -1.0, -1.0), max: (1.0, 1.0, 1.0))),
//!             Material(handle: 0),
//!             Renderable,
//!             Transform,
//!         ]),
//!     ],
//!     entities: [
//!         (template: "cube", position: (0.0, 0.0, -5.0)),
//!     ],
//! )
//! ```

use super::SceneError;
use crate::ecs::components::{Aabb, CameraMode, CollisionBoxComponent, PointLightComponent};
use crate::ecs::components::camera::{DEFAULT_FAR, DEFAULT_NEAR, DEFAULT_YAW, DEFAULT_ZOOM};
use crate::foundation::math::Vec3;
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A component shared by every instance of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentTemplate {
    /// Mesh handle with its local bounds
    Mesh {
        /// Renderer mesh id
        handle: u32,
        /// Local-space AABB
        bounds: Aabb,
    },
    /// Material handle
    Material {
        /// Renderer material id
        handle: u32,
    },
    /// Draw candidate
    Renderable,
    /// Identity transform (position set per instance)
    Transform,
    /// Never culled
    Skybox,
    /// Zero velocity, written by driver systems
    Velocity,
    /// Driver speed in units per second
    Speed(f32),
    /// Tank turn rate in degrees per second
    RotationSpeed(f32),
}

/// Named bundle of components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Lookup key for instances
    pub name: String,
    /// Components applied in order
    pub components: Vec<ComponentTemplate>,
}

/// Patrol parameters; the direction is normalized at load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolSpec {
    /// Initial travel direction
    pub direction: Vec3,
    /// Leg length
    pub magnitude: f32,
}

/// Camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSpec {
    /// Look mode
    pub mode: CameraMode,
    /// Offset from the entity position
    pub offset: Vec3,
    /// Up reference
    pub world_up: Vec3,
    /// Heading in degrees
    pub yaw: f32,
    /// Elevation in degrees
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub zoom: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            mode: CameraMode::Fixed,
            offset: Vec3::zeros(),
            world_up: Vec3::y(),
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            zoom: DEFAULT_ZOOM,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

/// One entity instance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneEntity {
    /// Template to instantiate
    pub template: String,
    /// Spawn position (needs a transform)
    pub position: Option<Vec3>,
    /// Per-axis scale (needs a transform)
    pub scale: Option<Vec3>,
    /// Steered along world axes
    pub world_input: bool,
    /// Steered tank-style
    pub tank_input: bool,
    /// Steered relative to the camera
    pub no_clip: bool,
    /// Back-and-forth motion
    pub patrol: Option<PatrolSpec>,
    /// Collision volume
    pub collision: Option<CollisionBoxComponent>,
    /// Attached camera (needs a transform)
    pub camera: Option<CameraSpec>,
    /// Attached point light
    pub point_light: Option<PointLightComponent>,
    /// Instanced draw count
    pub instances: Option<u32>,
}

impl SceneEntity {
    /// Instance of `template` with no extra parts
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Default::default()
        }
    }

    /// Builder pattern: set spawn position
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }
}

/// Templates plus instances
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Shared component bundles
    pub templates: Vec<EntityTemplate>,
    /// Instances in creation order
    pub entities: Vec<SceneEntity>,
}

impl SceneDescription {
    /// Parse a RON scene
    ///
    /// # Errors
    /// [`SceneError::Parse`] on malformed input.
    pub fn from_ron_str(source: &str) -> Result<Self, SceneError> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(source)
            .map_err(SceneError::Parse)
    }

    /// Read and parse a RON scene file
    ///
    /// # Errors
    /// [`SceneError::Io`] if the file cannot be read, [`SceneError::Parse`]
    /// on malformed input.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        log::info!("Loading scene from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Template by name
    pub fn template(&self, name: &str) -> Option<&EntityTemplate> {
        self.templates.iter().find(|template| template.name == name)
    }
}
