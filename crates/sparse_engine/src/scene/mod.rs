//! Scene loading
//!
//! RON scene descriptions and the loader that instantiates them into a
//! [`World`](crate::ecs::World).

pub mod description;
pub mod loader;

pub use description::{
    CameraSpec, ComponentTemplate, EntityTemplate, PatrolSpec, SceneDescription, SceneEntity,
};
pub use loader::SceneLoader;

use crate::ecs::{ComponentKind, Entity};
use thiserror::Error;

/// Scene loading errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// Scene file could not be read
    #[error("Scene IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene source is not valid RON for a scene
    #[error("Scene parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Two templates share a name
    #[error("Duplicate template '{0}'")]
    DuplicateTemplate(String),

    /// An instance names a template that does not exist
    #[error("Entity #{index} uses unknown template '{name}'")]
    UnknownTemplate {
        /// Position in the entity list
        index: usize,
        /// Requested template
        name: String,
    },

    /// A per-instance part needs a transform the template does not provide
    #[error("Entity {entity} ('{template}') sets {part} without a transform")]
    MissingTransform {
        /// Offending entity
        entity: Entity,
        /// Its template
        template: String,
        /// "position", "scale" or "camera"
        part: &'static str,
    },

    /// An entity lacks components its other components depend on
    #[error("Entity {entity} ('{template}') is missing components {missing:?}")]
    MissingComponents {
        /// Offending entity
        entity: Entity,
        /// Its template
        template: String,
        /// Required kinds not present
        missing: ComponentKind,
    },
}
