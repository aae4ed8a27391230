//! Math utilities and types
//!
//! Provides the fundamental math types used by the simulation and culling
//! code. All matrices follow OpenGL clip-space conventions (right-handed view
//! space, depth in [-1, 1]) because frustum plane extraction depends on them.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion, UnitQuaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Unit quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Lengths below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1.0e-6;

/// Normalize a direction, mapping the zero vector to zero instead of NaN.
///
/// A zero direction means "no direction requested" for the input systems, so
/// it must pass through untouched.
pub fn safe_normalize(v: Vec3) -> Vec3 {
    v.try_normalize(NORMALIZE_EPSILON).unwrap_or_else(Vec3::zeros)
}

/// Build a model matrix as translation * rotation * scale.
pub fn compose_trs(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(position)
        * rotation.to_homogeneous()
        * Mat4::new_nonuniform_scaling(scale)
}

/// A plane in Hessian normal form: `dot(normal, p) + distance = 0`.
///
/// Points with positive signed distance lie on the side the normal points to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal (unit length after [`Plane::normalized`])
    pub normal: Vec3,
    /// Signed offset from the origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a plane from a normal and offset
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Create a plane from packed `(a, b, c, d)` coefficients
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        Self {
            normal: coefficients.xyz(),
            distance: coefficients.w,
        }
    }

    /// Rescale so the normal has unit length.
    ///
    /// Planes extracted from a projection matrix always have a non-zero
    /// normal, so no zero check is performed.
    pub fn normalized(self) -> Self {
        let inv_length = 1.0 / self.normal.magnitude();
        Self {
            normal: self.normal * inv_length,
            distance: self.distance * inv_length,
        }
    }

    /// Signed distance from `point` to the plane
    pub fn signed_distance(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_safe_normalize_zero_stays_zero() {
        let n = safe_normalize(Vec3::zeros());
        assert_eq!(n, Vec3::zeros());
        assert!(n.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_safe_normalize_is_idempotent() {
        let once = safe_normalize(Vec3::new(3.0, -4.0, 12.0));
        let twice = safe_normalize(once);
        assert_relative_eq!(once.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(once, twice, epsilon = 1e-6);
    }

    #[test]
    fn test_plane_signed_distance() {
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), -4.0).normalized();
        assert_relative_eq!(plane.distance, -2.0);
        assert_relative_eq!(plane.signed_distance(&Vec3::new(5.0, 3.0, 1.0)), 1.0);
        assert_relative_eq!(plane.signed_distance(&Vec3::new(0.0, 0.0, 0.0)), -2.0);
    }

    #[test]
    fn test_compose_trs_order() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let m = compose_trs(&Vec3::new(1.0, 0.0, 0.0), &rotation, &Vec3::new(2.0, 2.0, 2.0));
        // +X scaled to 2, rotated 90 degrees about Y to -Z, then translated
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 0.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_degree_conversion_round_trip() {
        assert_relative_eq!(utils::rad_to_deg(utils::deg_to_rad(45.0)), 45.0, epsilon = 1e-5);
    }
}
