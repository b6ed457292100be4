//! Assembly of controller, viewport, picker and frame loop around a
//! renderer and a scene supplied by the host.

mod input;
mod navigation;
mod queries;

use glam::Vec2;
use web_time::Instant;

use crate::camera::{Camera, OrbitController};
use crate::error::ViewportError;
use crate::frame::{FrameDriver, FrameScheduler};
use crate::input::{Buttons, ClickTracker, Modifiers};
use crate::options::Options;
use crate::picking::{Intersection, Picker};
use crate::scene::{ObjectId, SceneGraph, SceneObject};
use crate::viewport::Viewport;

/// Rendering backend collaborator.
///
/// The engine never draws; it tells the backend when the surface changed
/// size and when a frame should be drawn from which camera.
pub trait RenderTarget {
    /// Reconfigure the drawable surface.
    fn resize_surface(&mut self, width: u32, height: u32);

    /// Draw one frame.
    fn render(&mut self, camera: &Camera);
}

/// What a processed input event means for the host's selection state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// Nothing selection-related happened (camera motion, drags, etc.)
    None,
    /// A click landed on an object; carries the nearest hit.
    Selected(Intersection),
    /// A double click focused the camera on an object.
    Focused(ObjectId),
    /// A click landed on empty background.
    ClearSelection,
}

/// Camera, viewport, picking and frame loop wired to a renderer and a
/// scene.
///
/// # Frame loop
///
/// Call [`start`](Self::start) once; whenever the host's refresh callback
/// fires, call [`frame`](Self::frame). The engine ticks damping, renders
/// through the [`RenderTarget`] when needed and schedules the next frame.
///
/// # Input
///
/// Forward host events via [`handle_input`](Self::handle_input). Drags
/// orbit/pan/zoom the camera; clicks come back as [`InputOutcome`]s.
pub struct ViewportEngine<R: RenderTarget, S: SceneGraph> {
    /// Rendering backend.
    renderer: R,
    /// Scene collaborator.
    scene: S,
    /// Orbital camera controller.
    controller: OrbitController,
    /// Surface size and client rectangle.
    viewport: Viewport,
    picker: Picker,
    /// Per-frame tick/render scheduling.
    driver: FrameDriver,
    /// Buttons currently held.
    buttons: Buttons,
    modifiers: Modifiers,
    /// Last known pointer position; `None` once it leaves the viewport.
    cursor: Option<Vec2>,
    clicks: ClickTracker,
    /// Position in residue order that next/previous stepping moves from.
    residue_cursor: usize,
}

impl<R: RenderTarget, S: SceneGraph> ViewportEngine<R, S> {
    /// Assemble an engine around its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidConfig`] for invalid options and
    /// [`ViewportError::InvalidDimension`] for a non-positive initial size.
    pub fn new(
        renderer: R,
        scene: S,
        options: &Options,
        width: f32,
        height: f32,
    ) -> Result<Self, ViewportError> {
        let mut controller = OrbitController::new(options)?;
        let mut viewport = Viewport::new(1.0, 1.0);
        viewport.resize(width, height)?;
        controller.set_aspect(viewport.current_aspect());

        let mut engine = Self {
            renderer,
            scene,
            controller,
            viewport,
            picker: Picker::new(),
            driver: FrameDriver::new(&options.frame),
            buttons: Buttons::NONE,
            modifiers: Modifiers::default(),
            cursor: None,
            clicks: ClickTracker::new(),
            residue_cursor: 0,
        };
        engine.renderer.resize_surface(width.round() as u32, height.round() as u32);
        Ok(engine)
    }

    // -- Collaborators --

    /// Orbit controller.
    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    /// Mutable orbit controller (programmatic camera moves).
    pub fn controller_mut(&mut self) -> &mut OrbitController {
        &mut self.controller
    }

    /// Current camera.
    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    /// Viewport state.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport (client rectangle updates).
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Scene collaborator.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable scene. Schedules a render, since the caller is assumed to
    /// edit it.
    pub fn scene_mut(&mut self) -> &mut S {
        self.driver.request_render();
        &mut self.scene
    }

    /// Rendering backend.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable rendering backend.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Frame driver state.
    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    /// Add a top-level object to the scene.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        self.driver.request_render();
        self.scene.add_object(object)
    }

    /// Remove a top-level object from the scene.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.scene.remove_object(id);
        if removed.is_some() {
            self.driver.request_render();
        }
        removed
    }

    // -- Viewport --

    /// Resize the viewport and forward the new size to the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidDimension`] for zero, negative or
    /// non-finite sizes; nothing changes in that case.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ViewportError> {
        self.viewport.resize(width, height)?;
        self.controller.set_aspect(self.viewport.current_aspect());
        self.renderer
            .resize_surface(width.round() as u32, height.round() as u32);
        Ok(())
    }

    // -- Frame loop --

    /// Start the frame loop. Returns `false` if it was already running.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        self.driver.start(scheduler)
    }

    /// Stop the frame loop; no renders happen until the next `start`.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.driver.stop(scheduler);
    }

    /// Handle one fired frame. Returns `true` if a frame was rendered.
    pub fn frame(
        &mut self,
        now: Instant,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        if self.viewport.take_projection_dirty() {
            self.driver.request_render();
        }
        if !self.driver.on_frame(now, &mut self.controller, scheduler) {
            return false;
        }
        self.renderer.render(self.controller.camera());
        true
    }
}
