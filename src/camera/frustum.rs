//! View frustum used to reject pick hits the user cannot see.
//!
//! Planes are extracted from the view-projection matrix (Gribb/Hartmann)
//! and point inward, so a point is visible when every signed distance is
//! non-negative.

use glam::{Mat4, Vec3, Vec4};

use super::core::Camera;

/// A plane `normal · p + distance = 0` with unit normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed distance term of the plane equation.
    pub distance: f32,
}

impl Plane {
    fn from_row(row: Vec4) -> Self {
        let normal = row.truncate();
        let len = normal.length();
        if len > 0.0 {
            Self {
                normal: normal / len,
                distance: row.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from point to plane (positive = inside).
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Six clipping planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Inward-facing planes.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract the planes of a right-handed, [0,1]-depth view-projection.
    pub fn from_view_projection(vp: Mat4) -> Self {
        let rows = vp.transpose();
        let (r0, r1, r2, r3) = (rows.x_axis, rows.y_axis, rows.z_axis, rows.w_axis);

        Self {
            planes: [
                Plane::from_row(r3 + r0),
                Plane::from_row(r3 - r0),
                Plane::from_row(r3 + r1),
                Plane::from_row(r3 - r1),
                // [0,1] depth: the near plane is row 2 alone
                Plane::from_row(r2),
                Plane::from_row(r3 - r2),
            ],
        }
    }

    /// Frustum of the camera's current view.
    pub fn from_camera(camera: &Camera) -> Self {
        Self::from_view_projection(camera.build_matrix())
    }

    /// Whether `point` lies inside, allowing `tolerance` world units of slack
    /// on every plane.
    #[inline]
    pub fn contains_point(&self, point: Vec3, tolerance: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= -tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frustum() -> Frustum {
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let view =
            Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        Frustum::from_view_projection(proj * view)
    }

    #[test]
    fn origin_is_visible() {
        assert!(frustum().contains_point(Vec3::ZERO, 0.0));
    }

    #[test]
    fn point_behind_camera_is_rejected() {
        assert!(!frustum().contains_point(Vec3::new(0.0, 0.0, 20.0), 0.0));
    }

    #[test]
    fn point_past_far_plane_is_rejected() {
        assert!(!frustum().contains_point(Vec3::new(0.0, 0.0, -200.0), 0.0));
    }

    #[test]
    fn point_off_to_the_side_is_rejected() {
        // Half-width of a 45° frustum at depth 10 is ~4.14
        assert!(!frustum().contains_point(Vec3::new(6.0, 0.0, 0.0), 0.0));
        assert!(frustum().contains_point(Vec3::new(3.0, 0.0, 0.0), 0.0));
    }
}
