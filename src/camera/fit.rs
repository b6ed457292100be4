//! Framing a bounding volume.
//!
//! The camera distance that makes a box fill the vertical field of view is
//! `max_extent / (2 * tan(fovy / 2))`; the margin scales it out so the
//! object does not touch the viewport edges.

use glam::Vec3;

use crate::geometry::BoundingVolume;

/// Target and distance that frame a bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    /// New look-at target (the volume's center).
    pub center: Vec3,
    /// Unclamped eye-to-target distance.
    pub distance: f32,
}

/// Compute the framing for `bounds` under a vertical FOV in degrees.
///
/// Returns `None` for degenerate volumes (zero size or non-finite corners)
/// and for margins or FOVs that would give a non-positive distance.
pub fn frame_bounds(
    bounds: &BoundingVolume,
    fovy_degrees: f32,
    margin: f32,
) -> Option<Framing> {
    if bounds.is_degenerate() {
        return None;
    }
    let half_tan = (fovy_degrees.to_radians() * 0.5).tan();
    let distance = bounds.max_extent() / (2.0 * half_tan) * margin;
    if !(distance > 0.0 && distance.is_finite()) {
        return None;
    }
    Some(Framing {
        center: bounds.center(),
        distance,
    })
}
