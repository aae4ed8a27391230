//! View frustum
//!
//! Six planes extracted from a combined view-projection matrix with the
//! Gribb-Hartmann method. Normals point into the frustum, so a positive
//! signed distance means "inside this plane".

use crate::foundation::math::{Mat4, Plane, Vec3, Vec4};

/// Index of each plane in [`Frustum::planes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumSide {
    /// x >= -w
    Left = 0,
    /// x <= w
    Right = 1,
    /// y >= -w
    Bottom = 2,
    /// y <= w
    Top = 3,
    /// z >= -w
    Near = 4,
    /// z <= w
    Far = 5,
}

impl FrustumSide {
    /// All sides in storage order
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::Bottom,
        Self::Top,
        Self::Near,
        Self::Far,
    ];
}

/// Six normalized planes bounding the visible volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Default for Frustum {
    /// Frustum of the identity matrix: the clip-space cube
    fn default() -> Self {
        Self::from_view_projection(&Mat4::identity())
    }
}

impl Frustum {
    /// Extract planes from `projection * view`
    ///
    /// Assumes OpenGL clip space (`-w <= z <= w`).
    pub fn from_view_projection(view_projection: &Mat4) -> Self {
        let row = |i: usize| -> Vec4 { view_projection.row(i).transpose() };
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        let plane = |coefficients: Vec4| Plane::from_coefficients(coefficients).normalized();

        Self {
            planes: [
                plane(r3 + r0),
                plane(r3 - r0),
                plane(r3 + r1),
                plane(r3 - r1),
                plane(r3 + r2),
                plane(r3 - r2),
            ],
        }
    }

    /// All six planes, indexed by [`FrustumSide`]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// A single plane
    pub fn plane(&self, side: FrustumSide) -> &Plane {
        &self.planes[side as usize]
    }

    /// Conservative test for a box given by world-space center and
    /// half-extents along the world axes.
    ///
    /// The box is rejected only when it lies strictly outside some plane;
    /// a box touching a plane counts as visible.
    pub fn intersects_box(&self, center: &Vec3, half_extents: &Vec3) -> bool {
        self.planes.iter().all(|plane| {
            let radius = half_extents.dot(&plane.normal.abs());
            plane.signed_distance(center) >= -radius
        })
    }

    /// Sphere test; rejected only when strictly outside some plane
    pub fn intersects_sphere(&self, center: &Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(center) >= -radius)
    }

    /// Point containment (boundary inclusive)
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.intersects_sphere(point, 0.0)
    }
}
