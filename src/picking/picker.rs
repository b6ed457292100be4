use glam::Vec3;

use super::target::PickTarget;
use crate::camera::core::Camera;
use crate::camera::frustum::Frustum;
use crate::geometry::Ray;
use crate::scene::{ObjectId, SceneGraph};
use crate::viewport::Viewport;

/// Slack (world units) when testing hit points against the view frustum, so
/// hits lying exactly on a clip plane survive float error.
const FRUSTUM_TOLERANCE: f32 = 1e-3;

/// One object hit by a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Scene object that was hit.
    pub object: ObjectId,
    /// What the object selects.
    pub target: PickTarget,
    /// Distance from the ray origin along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// CPU ray picker.
///
/// Stateless; every call builds its ray from the camera it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Picker;

impl Picker {
    /// Create a picker.
    pub fn new() -> Self {
        Self
    }

    /// Ray from the camera through a client-space point.
    ///
    /// `None` when the camera is degenerate (non-invertible projection).
    pub fn screen_ray(
        &self,
        viewport: &Viewport,
        camera: &Camera,
        screen_x: f32,
        screen_y: f32,
    ) -> Option<Ray> {
        let ndc = viewport.to_ndc(screen_x, screen_y);
        let view_proj = camera.build_matrix();
        if view_proj.determinant().abs() <= f32::EPSILON * f32::EPSILON {
            return None;
        }
        // [0,1] depth range: z = 0 is the near plane
        let near = view_proj
            .inverse()
            .project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        Ray::new(camera.eye, near - camera.eye)
    }

    /// Every selectable object the ray hits in front of its origin, nearest
    /// first. Ties keep scene insertion order.
    pub fn cast<S: SceneGraph + ?Sized>(
        &self,
        ray: &Ray,
        scene: &S,
    ) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = scene
            .pickables()
            .filter_map(|(object, pickable)| {
                let target = pickable.pick_target()?;
                let distance = pickable.intersect_ray(ray)?;
                (distance >= 0.0 && distance.is_finite()).then(|| Intersection {
                    object,
                    target,
                    distance,
                    point: ray.at(distance),
                })
            })
            .collect();
        // Stable: equal distances stay in enumeration order
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Objects under a client-space point, nearest first, restricted to
    /// what the camera can see.
    pub fn pick<S: SceneGraph + ?Sized>(
        &self,
        screen_x: f32,
        screen_y: f32,
        viewport: &Viewport,
        camera: &Camera,
        scene: &S,
    ) -> Vec<Intersection> {
        let Some(ray) = self.screen_ray(viewport, camera, screen_x, screen_y)
        else {
            return Vec::new();
        };
        let frustum = Frustum::from_camera(camera);
        let mut hits = self.cast(&ray, scene);
        hits.retain(|hit| frustum.contains_point(hit.point, FRUSTUM_TOLERANCE));
        hits
    }
}
