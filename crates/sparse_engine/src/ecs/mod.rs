//! Entity-Component-System implementation
//!
//! Sparse-set storage with one store per component type and a fixed set of
//! systems run in a fixed order by the [`Engine`](crate::Engine).

pub mod component;
pub mod components;
pub mod entity;
pub mod storage;
pub mod system;
pub mod systems;
pub mod world;

pub use component::{Component, ComponentKind};
pub use entity::Entity;
pub use storage::{PagedSparseSet, SparseSet};
pub use system::{FrameContext, System};
pub use world::{CameraError, World};
