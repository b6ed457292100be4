//! Picking and framing queries for ViewportEngine

use super::{RenderTarget, ViewportEngine};
use crate::geometry::{BoundingVolume, Ray};
use crate::picking::Intersection;
use crate::scene::{ObjectId, SceneGraph};

impl<R: RenderTarget, S: SceneGraph> ViewportEngine<R, S> {
    /// Objects under a client-space point, nearest first.
    pub fn pick(&self, screen_x: f32, screen_y: f32) -> Vec<Intersection> {
        self.picker.pick(
            screen_x,
            screen_y,
            &self.viewport,
            self.controller.camera(),
            &self.scene,
        )
    }

    /// World ray through a client-space point.
    pub fn screen_ray(&self, screen_x: f32, screen_y: f32) -> Option<Ray> {
        self.picker.screen_ray(
            &self.viewport,
            self.controller.camera(),
            screen_x,
            screen_y,
        )
    }

    /// Frame one object. The bounding volume is computed now, so the fit
    /// reflects the object's current geometry.
    ///
    /// Returns `false` for unknown objects and objects without extent.
    pub fn fit_to_object(&mut self, id: ObjectId, margin: f32) -> bool {
        let Some(bounds) = self.scene.bounding_volume(id) else {
            log::debug!("fit skipped: {id:?} has no bounding volume");
            return false;
        };
        self.controller.fit_to_bounds(&bounds, margin)
    }

    /// Frame every object in the scene with the configured margin.
    pub fn fit_all(&mut self) -> bool {
        let Some(bounds) = self.scene_bounds() else {
            log::debug!("fit skipped: scene is empty");
            return false;
        };
        let margin = self.controller.fit_margin();
        self.controller.fit_to_bounds(&bounds, margin)
    }

    /// Union of the bounds of every object.
    pub fn scene_bounds(&self) -> Option<BoundingVolume> {
        self.scene
            .pickables()
            .filter_map(|(_, pickable)| pickable.bounding_volume())
            .reduce(|a, b| a.union(&b))
    }
}
