//! # Sparse Engine
//!
//! Simulation core for a small 3D engine built on a sparse-set ECS.
//!
//! ## Features
//!
//! - **Sparse-set storage**: O(1) add/remove/lookup with dense iteration
//! - **Movement**: world-space, tank and camera-relative steering plus patrols
//! - **Collision**: axis-separated AABB response that lets movers slide
//! - **Culling**: frustum tests for oriented mesh bounds and point lights
//! - **Renderer-agnostic**: each tick yields draw items and packed lights
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sparse_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let scene = SceneDescription::load_from_file("scene.ron")?;
//!
//!     let mut engine = Engine::new(config)?;
//!     engine.load_scene(&scene)?;
//!
//!     let frame = engine.tick(1.0 / 60.0, &InputIntent::from_keys(true, false, false, false))?;
//!     println!("{} visible entities", frame.draws.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

mod engine;

pub use config::EngineConfig;
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        ecs::{
            components::{
                Aabb, CameraComponent, CameraMode, CollisionBoxComponent, MaterialHandle, MeshHandle,
                PointLightComponent, TransformComponent, VelocityComponent,
            },
            CameraError, Component, ComponentKind, Entity, World,
        },
        foundation::{
            math::{Mat4, Quat, Vec2, Vec3},
            time::Timer,
        },
        input::{InputIntent, InputManager, InputSource, KeyCode},
        render::{DrawItem, FrameOutput, FrameRenderer, PackedPointLight, RenderError},
        scene::{SceneDescription, SceneError, SceneLoader},
        Engine, EngineConfig, EngineError,
    };
}
