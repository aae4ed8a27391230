//! Renderer-facing types
//!
//! Frustum extraction for culling and the per-frame output handed to a
//! [`FrameRenderer`].

pub mod frame;
pub mod frustum;

pub use frame::{DrawItem, FrameOutput, FrameRenderer, PackedPointLight, RenderError};
pub use frustum::{Frustum, FrustumSide};
