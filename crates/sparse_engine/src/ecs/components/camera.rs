//! # Camera component
//!
//! Perspective camera driven by yaw/pitch Euler angles with OpenGL
//! conventions (right-handed, looking down -Z at yaw = -90 degrees).
//!
//! ## Derived state
//! Basis vectors, view/projection matrices and frustum planes are private and
//! recomputed together by [`CameraComponent::refresh`]. Every public mutator
//! ends with a refresh, so readers never observe a half-updated camera.

use crate::foundation::math::{utils, Mat4, Point3, Vec3};
use crate::render::frustum::Frustum;
use serde::{Deserialize, Serialize};

/// Default yaw in degrees (facing -Z)
pub const DEFAULT_YAW: f32 = -90.0;
/// Default pitch in degrees
pub const DEFAULT_PITCH: f32 = 0.0;
/// Default vertical field of view in degrees
pub const DEFAULT_ZOOM: f32 = 45.0;
/// Narrowest field of view reachable by scrolling
pub const MIN_ZOOM: f32 = 1.0;
/// Widest field of view reachable by scrolling
pub const MAX_ZOOM: f32 = 45.0;
/// Pitch is clamped to +/- this many degrees
pub const PITCH_LIMIT: f32 = 89.0;
/// Degrees of rotation per unit of mouse offset
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.1;
/// Default near clip distance
pub const DEFAULT_NEAR: f32 = 0.1;
/// Default far clip distance
pub const DEFAULT_FAR: f32 = 1000.0;

/// How the camera reacts to look input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Orientation never changes from look input
    #[default]
    Fixed,
    /// Mouse offsets turn the camera
    MouseTurn,
}

/// Perspective camera attached to an entity
#[derive(Debug, Clone)]
pub struct CameraComponent {
    mode: CameraMode,
    position_offset: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    near: f32,
    far: f32,
    aspect: f32,
    mouse_sensitivity: f32,

    position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
    frustum: Frustum,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self::new(CameraMode::Fixed, Vec3::zeros(), Vec3::y(), DEFAULT_YAW, DEFAULT_PITCH)
    }
}

impl CameraComponent {
    /// Create a camera
    ///
    /// # Arguments
    /// * `mode` - Whether look input turns the camera
    /// * `position_offset` - Offset from the owning entity's position
    /// * `world_up` - Up reference for the basis (usually +Y)
    /// * `yaw` - Heading in degrees
    /// * `pitch` - Elevation in degrees, clamped to +/-89
    pub fn new(mode: CameraMode, position_offset: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            mode,
            position_offset,
            world_up,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            zoom: DEFAULT_ZOOM,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            aspect: 1.0,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            position: position_offset,
            front: -Vec3::z(),
            right: Vec3::x(),
            up: Vec3::y(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            view_projection: Mat4::identity(),
            frustum: Frustum::default(),
        };
        camera.refresh();
        camera
    }

    /// Builder pattern: set field of view (degrees) and clip distances
    pub fn with_projection(mut self, zoom: f32, near: f32, far: f32) -> Self {
        self.zoom = zoom;
        self.near = near;
        self.far = far;
        self.refresh();
        self
    }

    /// Builder pattern: set aspect ratio from viewport size
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.set_viewport(width, height);
        self
    }

    /// Builder pattern: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Place the camera at `anchor + position_offset`
    pub fn follow(&mut self, anchor: Vec3) {
        self.position = anchor + self.position_offset;
        self.refresh();
    }

    /// Turn by mouse offsets
    ///
    /// Ignored unless the camera is in [`CameraMode::MouseTurn`]. Returns
    /// whether the orientation changed.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) -> bool {
        if self.mode != CameraMode::MouseTurn {
            return false;
        }

        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.refresh();
        true
    }

    /// Zoom by scroll offset; field of view stays within [1, 45] degrees
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
        self.refresh();
    }

    /// Update the aspect ratio after a viewport resize
    ///
    /// Zero-sized viewports (minimized windows) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring zero-sized viewport {}x{}", width, height);
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.aspect = width as f32 / height as f32;
        }
        self.refresh();
    }

    /// Recompute basis vectors, matrices and frustum planes
    pub fn refresh(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);

        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();

        let eye = Point3::from(self.position);
        self.view = Mat4::look_at_rh(&eye, &(eye + self.front), &self.up);
        self.projection = Mat4::new_perspective(self.aspect, utils::deg_to_rad(self.zoom), self.near, self.far);
        self.view_projection = self.projection * self.view;
        self.frustum = Frustum::from_view_projection(&self.view_projection);
    }

    /// Look mode
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Offset from the owning entity
    pub fn position_offset(&self) -> Vec3 {
        self.position_offset
    }

    /// World-space eye position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Heading in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Elevation in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Width / height
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near clip distance
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip distance
    pub fn far(&self) -> f32 {
        self.far
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// `projection * view`
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection
    }

    /// Frustum planes of the current view-projection
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_faces_negative_z() {
        let camera = CameraComponent::default();
        assert_relative_eq!(camera.front(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(camera.up(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_eq!(camera.zoom(), DEFAULT_ZOOM);
        assert_eq!(camera.near(), DEFAULT_NEAR);
        assert_eq!(camera.far(), DEFAULT_FAR);
    }

    #[test]
    fn test_fixed_camera_ignores_mouse() {
        let mut camera = CameraComponent::default();
        assert!(!camera.process_mouse_movement(100.0, 50.0, true));
        assert_eq!(camera.yaw(), DEFAULT_YAW);
        assert_eq!(camera.pitch(), DEFAULT_PITCH);
    }

    #[test]
    fn test_mouse_turn_and_pitch_clamp() {
        let mut camera = CameraComponent::new(CameraMode::MouseTurn, Vec3::zeros(), Vec3::y(), -90.0, 0.0);
        assert!(camera.process_mouse_movement(900.0, 0.0, true));
        assert_relative_eq!(camera.yaw(), 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.front(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);

        camera.process_mouse_movement(0.0, 5000.0, true);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        camera.process_mouse_movement(0.0, -50000.0, true);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_scroll_clamps_zoom() {
        let mut camera = CameraComponent::default();
        camera.process_mouse_scroll(10.0);
        assert_eq!(camera.zoom(), 35.0);
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom(), MIN_ZOOM);
        camera.process_mouse_scroll(-100.0);
        assert_eq!(camera.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_follow_applies_offset_and_moves_frustum() {
        let mut camera = CameraComponent::new(CameraMode::Fixed, Vec3::new(0.0, 2.0, 0.0), Vec3::y(), -90.0, 0.0)
            .with_projection(45.0, 0.1, 100.0);
        camera.follow(Vec3::new(0.0, 0.0, 500.0));
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 2.0, 500.0));
        assert!(camera.frustum().contains_point(&Vec3::new(0.0, 2.0, 450.0)));
        assert!(!camera.frustum().contains_point(&Vec3::new(0.0, 2.0, -5.0)));
    }

    #[test]
    fn test_viewport_updates_aspect() {
        let mut camera = CameraComponent::default().with_viewport(1600, 1200);
        assert_relative_eq!(camera.aspect(), 4.0 / 3.0);
        camera.set_viewport(0, 600);
        assert_relative_eq!(camera.aspect(), 4.0 / 3.0);
        let expected = Mat4::new_perspective(4.0 / 3.0, 45f32.to_radians(), 0.1, 1000.0);
        assert_relative_eq!(*camera.projection_matrix(), expected, epsilon = 1e-6);
    }
}
