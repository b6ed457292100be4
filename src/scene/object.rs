use glam::Vec3;

use crate::geometry::{BoundingVolume, Ray};
use crate::picking::PickTarget;

/// Stable handle for a top-level scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Capability of anything the picker can hit-test.
///
/// Geometry must already be in world coordinates; the camera layer does no
/// model transforms of its own.
pub trait Pickable {
    /// What a hit on this object selects. `None` for non-selectable helpers
    /// (grids, axes), which the picker skips.
    fn pick_target(&self) -> Option<PickTarget>;

    /// Nearest hit distance in front of the ray origin.
    fn intersect_ray(&self, ray: &Ray) -> Option<f32>;

    /// World-space extent, recomputed on every call. `None` when the object
    /// has no geometry.
    fn bounding_volume(&self) -> Option<BoundingVolume>;
}

/// Indexed triangle soup (ribbons, isosurfaces).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex index triples.
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Mesh from positions and index triples.
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            triangles,
        }
    }

    fn vertex(&self, index: u32) -> Option<Vec3> {
        self.positions.get(index as usize).copied()
    }

    /// Nearest triangle hit. Triangles with out-of-range indices are
    /// skipped.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        self.triangles
            .iter()
            .filter_map(|&[a, b, c]| {
                let (v0, v1, v2) =
                    (self.vertex(a)?, self.vertex(b)?, self.vertex(c)?);
                ray.intersect_triangle(v0, v1, v2)
            })
            .min_by(f32::total_cmp)
    }
}

/// Geometric building block of a scene object.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Atom impostor.
    Sphere {
        /// Center in world space.
        center: Vec3,
        /// Radius in world units.
        radius: f32,
    },
    /// Ribbon or surface mesh.
    Mesh(TriangleMesh),
}

impl Primitive {
    /// Nearest hit distance in front of the ray origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        match self {
            Self::Sphere { center, radius } => {
                ray.intersect_sphere(*center, *radius)
            }
            Self::Mesh(mesh) => mesh.intersect_ray(ray),
        }
    }

    /// World-space extent.
    pub fn bounding_volume(&self) -> Option<BoundingVolume> {
        match self {
            Self::Sphere { center, radius } => {
                Some(BoundingVolume::from_sphere(*center, *radius))
            }
            Self::Mesh(mesh) => BoundingVolume::from_points(&mesh.positions),
        }
    }
}

/// Top-level object held by [`Scene`](super::Scene).
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Selection this object represents, if any.
    pub target: Option<PickTarget>,
    /// Geometry, already in world coordinates.
    pub primitives: Vec<Primitive>,
}

impl SceneObject {
    /// Selectable object.
    pub fn new(target: PickTarget, primitives: Vec<Primitive>) -> Self {
        Self {
            target: Some(target),
            primitives,
        }
    }

    /// Non-selectable helper geometry.
    pub fn helper(primitives: Vec<Primitive>) -> Self {
        Self {
            target: None,
            primitives,
        }
    }

    /// Single-sphere atom.
    pub fn sphere(target: PickTarget, center: Vec3, radius: f32) -> Self {
        Self::new(target, vec![Primitive::Sphere { center, radius }])
    }
}

impl Pickable for SceneObject {
    fn pick_target(&self) -> Option<PickTarget> {
        self.target
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        // Coarse reject against the whole object before per-primitive tests
        let bounds = self.bounding_volume()?;
        if bounds.intersect_ray(ray.origin, ray.direction).is_none() {
            return None;
        }

        self.primitives
            .iter()
            .filter_map(|p| p.intersect_ray(ray))
            .min_by(f32::total_cmp)
    }

    fn bounding_volume(&self) -> Option<BoundingVolume> {
        self.primitives
            .iter()
            .filter_map(Primitive::bounding_volume)
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(z: f32) -> TriangleMesh {
        TriangleMesh::new(
            vec![
                Vec3::new(-1.0, -1.0, z),
                Vec3::new(1.0, -1.0, z),
                Vec3::new(1.0, 1.0, z),
                Vec3::new(-1.0, 1.0, z),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn mesh_reports_nearest_triangle() {
        let mut mesh = quad(0.0);
        let offset = mesh.positions.len() as u32;
        mesh.positions.extend(quad(2.0).positions);
        mesh.triangles.push([offset, offset + 1, offset + 2]);

        let ray = Ray::new(Vec3::new(0.5, -0.5, 10.0), -Vec3::Z).unwrap();
        let t = mesh.intersect_ray(&ray).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
    }

    #[test]
    fn out_of_range_indices_are_skipped() {
        let mesh = TriangleMesh::new(vec![Vec3::ZERO], vec![[0, 1, 2]]);
        let ray = Ray::new(Vec3::Z, -Vec3::Z).unwrap();
        assert!(mesh.intersect_ray(&ray).is_none());
    }

    #[test]
    fn object_bounds_cover_all_primitives() {
        let object = SceneObject::new(
            PickTarget::Surface { entity: 0 },
            vec![
                Primitive::Sphere {
                    center: Vec3::new(5.0, 0.0, 0.0),
                    radius: 1.0,
                },
                Primitive::Mesh(quad(-3.0)),
            ],
        );
        let bounds = object.bounding_volume().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn empty_object_has_no_bounds_and_no_hits() {
        let object = SceneObject::new(PickTarget::Residue(3), Vec::new());
        assert!(object.bounding_volume().is_none());
        let ray = Ray::new(Vec3::Z, -Vec3::Z).unwrap();
        assert!(object.intersect_ray(&ray).is_none());
    }
}
