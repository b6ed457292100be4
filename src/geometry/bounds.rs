use glam::Vec3;

/// Axis-aligned box enclosing an object's world-space geometry.
///
/// Computed on demand from the geometry that produced it; callers should not
/// cache it across edits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl BoundingVolume {
    /// Box spanning two corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box around a sphere.
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        let r = Vec3::splat(radius.abs());
        Self {
            min: center - r,
            max: center + r,
        }
    }

    /// Tight box around a point set, `None` when the set is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            bounds.min = bounds.min.min(*p);
            bounds.max = bounds.max.max(*p);
        }
        Some(bounds)
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Midpoint of the two corners.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest extent along any axis.
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }

    /// True when the box has no usable extent (all sizes zero) or carries
    /// non-finite corners. Fitting the camera to such a box is meaningless.
    pub fn is_degenerate(&self) -> bool {
        !self.min.is_finite()
            || !self.max.is_finite()
            || !(self.max_extent() > 0.0)
    }

    /// Slab test. Returns the entry distance along the ray (or the exit
    /// distance when the origin is inside), `None` on a miss or when the box
    /// is entirely behind the origin.
    pub fn intersect_ray(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        const EPSILON: f32 = 1e-8;

        // Clamp near-zero components so the reciprocal stays finite
        let safe = |d: f32| {
            if d.abs() < EPSILON {
                1.0 / EPSILON.copysign(d)
            } else {
                1.0 / d
            }
        };
        let inv_dir = Vec3::new(safe(dir.x), safe(dir.y), safe(dir.z));

        let t_min = (self.min - origin) * inv_dir;
        let t_max = (self.max - origin) * inv_dir;
        let t1 = t_min.min(t_max);
        let t2 = t_min.max(t_max);

        let t_near = t1.max_element();
        let t_far = t2.min_element();

        if t_near > t_far || t_far < 0.0 {
            return None;
        }
        Some(if t_near < 0.0 { t_far } else { t_near })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_size() {
        let b = BoundingVolume::new(Vec3::new(2.0, 4.0, 6.0), Vec3::ZERO);
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.size(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b.max_extent(), 6.0);
    }

    #[test]
    fn from_points_handles_empty_and_single() {
        assert!(BoundingVolume::from_points(&[]).is_none());
        let single = BoundingVolume::from_points(&[Vec3::ONE]).unwrap();
        assert!(single.is_degenerate());
    }

    #[test]
    fn flat_box_is_not_degenerate() {
        // A planar surface patch still has something to frame.
        let b = BoundingVolume::new(Vec3::ZERO, Vec3::new(4.0, 4.0, 0.0));
        assert!(!b.is_degenerate());
    }

    #[test]
    fn nan_corners_are_degenerate() {
        let b = BoundingVolume {
            min: Vec3::ZERO,
            max: Vec3::new(f32::NAN, 1.0, 1.0),
        };
        assert!(b.is_degenerate());
    }

    #[test]
    fn union_contains_both() {
        let a = BoundingVolume::new(Vec3::splat(-3.0), Vec3::splat(-1.0));
        let b = BoundingVolume::new(Vec3::ONE, Vec3::splat(3.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-3.0));
        assert_eq!(u.max, Vec3::splat(3.0));
    }

    #[test]
    fn slab_hit_miss_and_inside() {
        let b = BoundingVolume::new(
            Vec3::new(5.0, -1.0, -1.0),
            Vec3::new(10.0, 1.0, 1.0),
        );
        let t = b.intersect_ray(Vec3::ZERO, Vec3::X).unwrap();
        assert!((t - 5.0).abs() < 1e-4);

        assert!(b.intersect_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::X).is_none());
        assert!(b.intersect_ray(Vec3::ZERO, -Vec3::X).is_none());

        let inside = b.intersect_ray(Vec3::new(7.0, 0.0, 0.0), Vec3::X);
        assert!((inside.unwrap() - 3.0).abs() < 1e-4);
    }
}
