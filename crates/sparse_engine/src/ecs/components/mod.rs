//! ECS Components module
//!
//! Pure data. Each type here has its own store in [`World`](super::World).

pub mod camera;
pub mod collision;
pub mod lighting;
pub mod movement;
pub mod renderable;
pub mod transform;

pub use camera::{CameraComponent, CameraMode};
pub use collision::CollisionBoxComponent;
pub use lighting::PointLightComponent;
pub use movement::{
    NoClipInputTag, PatrolComponent, RotationSpeedComponent, SpeedComponent, TankInputTag,
    VelocityComponent, WorldInputTag,
};
pub use renderable::{
    Aabb, InstancedComponent, MaterialComponent, MaterialHandle, MeshComponent, MeshHandle,
    RenderableTag, SkyboxTag,
};
pub use transform::TransformComponent;
