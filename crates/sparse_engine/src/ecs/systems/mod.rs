//! ECS Systems module
//!
//! Simulation systems implement [`System`](super::System) and mutate the
//! world; the two culling systems only read it and produce per-frame lists.

pub mod collision_system;
pub mod input;
pub mod lighting;
pub mod movement;
pub mod patrol;
pub mod visibility;

pub use collision_system::CollisionSystem;
pub use input::{NoClipInputSystem, TankInputSystem, WorldSpaceInputSystem};
pub use lighting::LightCullingSystem;
pub use movement::MovementSystem;
pub use patrol::PatrolSystem;
pub use visibility::{world_bounds, VisibilitySystem};
