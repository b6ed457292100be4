//! Orbit camera controller: drag sessions, wheel zoom, fitting and the
//! per-frame damping tick.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use super::core::{Camera, CameraUniform};
use super::fit::frame_bounds;
use super::orbit::{OrbitLimits, OrbitState};
use crate::error::ViewportError;
use crate::geometry::BoundingVolume;
use crate::input::{DragMode, DragSession};
use crate::options::Options;

/// Orbit camera controller: turns drag, wheel and fit requests into camera
/// motion around a look-at target.
///
/// Input mutates the orbit *goal*; [`tick`](Self::tick) eases the rendered
/// camera toward it when damping is enabled.
#[derive(Debug, Clone)]
pub struct OrbitController {
    orbit: OrbitState,
    camera: Camera,
    uniform: CameraUniform,
    session: Option<DragSession>,
    rotate_speed: f32,
    zoom_speed: f32,
    pan_speed: f32,
    fit_margin: f32,
    auto_rotate: bool,
    auto_rotate_speed: f32,
    /// Set by every input mutation; consumed by `tick`.
    dirty: bool,
}

impl OrbitController {
    /// Build a controller from validated options.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidConfig`] for contradictory limits or
    /// projection parameters.
    pub fn new(options: &Options) -> Result<Self, ViewportError> {
        options.validate()?;
        let cam = &options.camera;
        let controls = &options.controls;

        let eye = Vec3::from_array(cam.position);
        let target = Vec3::from_array(cam.target);
        let damping = controls
            .damping_enabled
            .then_some(controls.damping_factor);
        let orbit = OrbitState::new(
            eye,
            target,
            OrbitLimits::from_options(controls),
            damping,
        );

        let camera = Camera {
            eye: orbit.eye(),
            target: orbit.current_target(),
            up: Vec3::Y,
            aspect: 1.0,
            fovy: cam.fovy,
            znear: cam.znear,
            zfar: cam.zfar,
        };
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        Ok(Self {
            orbit,
            camera,
            uniform,
            session: None,
            rotate_speed: controls.rotate_speed,
            zoom_speed: controls.zoom_speed,
            pan_speed: controls.pan_speed,
            fit_margin: controls.fit_margin,
            auto_rotate: false,
            auto_rotate_speed: controls.auto_rotate_speed,
            dirty: true,
        })
    }

    /// Camera as of the last update.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// GPU uniform matching [`camera`](Self::camera).
    pub fn uniform(&self) -> &CameraUniform {
        &self.uniform
    }

    /// Configured fit margin.
    pub fn fit_margin(&self) -> f32 {
        self.fit_margin
    }

    fn sync_camera(&mut self) {
        self.camera.eye = self.orbit.eye();
        self.camera.target = self.orbit.current_target();
        self.uniform.update_view_proj(&self.camera);
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.sync_camera();
    }

    /// Update the projection aspect ratio. Non-positive or non-finite
    /// values are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect > 0.0 && aspect.is_finite() {
            self.camera.aspect = aspect;
            self.touch();
        }
    }

    // -- Drag sessions --

    /// Start a drag session at a pointer position.
    pub fn begin_drag(&mut self, x: f32, y: f32, mode: DragMode) {
        self.session = Some(DragSession::new(mode, Vec2::new(x, y)));
    }

    /// Apply pointer motion to the active session.
    ///
    /// Returns `true` when the camera goal changed; `false` without a
    /// session or when the pointer did not move.
    pub fn drag(&mut self, x: f32, y: f32) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let mode = session.mode;
        let delta = session.advance(Vec2::new(x, y));
        if delta == Vec2::ZERO || !delta.is_finite() {
            return false;
        }
        match mode {
            DragMode::Rotate => self.rotate(delta),
            DragMode::Zoom => self.zoom(delta.y),
            DragMode::Pan => self.pan(delta),
        }
        true
    }

    /// End the active session, if any.
    pub fn end_drag(&mut self) {
        self.session = None;
    }

    /// Whether a drag session is active.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Gesture of the active session.
    pub fn drag_mode(&self) -> Option<DragMode> {
        self.session.map(|s| s.mode)
    }

    // -- Camera operations --

    /// Orbit by a screen delta in pixels. Horizontal motion spins the
    /// azimuth, vertical motion tilts (down = lower elevation).
    pub fn rotate(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.orbit
            .rotate(delta.x * self.rotate_speed, delta.y * self.rotate_speed);
        self.touch();
    }

    /// Scale the goal distance by `1 + delta * zoom_speed` (clamped).
    pub fn zoom(&mut self, delta: f32) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let distance = self.orbit.goal().distance * (1.0 + delta * self.zoom_speed);
        self.orbit.set_distance(distance);
        self.touch();
    }

    /// Wheel zoom, independent of any drag session. Returns `true` when the
    /// delta was applied.
    pub fn zoom_by_wheel(&mut self, delta_y: f32) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        self.zoom(delta_y);
        true
    }

    /// Translate the target in the view plane. The step is proportional to
    /// the current distance so the scene tracks the pointer at any zoom.
    pub fn pan(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let forward = self.camera.forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.pan_speed * self.orbit.current().distance;
        let translation = right * (-delta.x * scale) + up * (delta.y * scale);
        self.orbit.translate_target(translation);
        self.touch();
    }

    /// Place the camera explicitly. The eye is converted to orbit
    /// coordinates around `look_at`; coincident points clamp to the minimum
    /// distance.
    pub fn set_camera_position(&mut self, position: Vec3, look_at: Vec3) {
        if !(position.is_finite() && look_at.is_finite()) {
            log::warn!("ignored non-finite camera placement");
            return;
        }
        self.orbit.place(position, look_at);
        self.touch();
    }

    // -- Fitting --

    /// Frame `bounds` with the given margin, keeping the current
    /// orientation. Returns `false` (and changes nothing) for degenerate
    /// volumes.
    pub fn fit_to_bounds(&mut self, bounds: &BoundingVolume, margin: f32) -> bool {
        let Some(framing) = frame_bounds(bounds, self.camera.fovy, margin) else {
            log::debug!("skipped fit to degenerate bounds {bounds:?} (margin {margin})");
            return false;
        };
        self.orbit.set_target(framing.center);
        self.orbit.set_distance(framing.distance);
        self.touch();
        true
    }

    /// Frame `bounds` with the configured margin.
    pub fn fit(&mut self, bounds: &BoundingVolume) -> bool {
        self.fit_to_bounds(bounds, self.fit_margin)
    }

    /// Frame `bounds` and swing back to the front view (eye on +Z of the
    /// center).
    pub fn fit_and_reset(&mut self, bounds: &BoundingVolume, margin: f32) -> bool {
        if !self.fit_to_bounds(bounds, margin) {
            return false;
        }
        self.orbit.set_orientation(FRAC_PI_2, FRAC_PI_2);
        self.touch();
        true
    }

    // -- Auto-rotate --

    /// Enable or disable turntable rotation.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// Toggle turntable rotation. Returns the new state.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Whether turntable rotation is on.
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    // -- Per-frame update --

    /// Advance damping (and the turntable) by one frame of `dt` seconds.
    ///
    /// Returns `true` when the camera moved since the previous tick and a
    /// re-render is needed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.auto_rotate && dt > 0.0 && dt.is_finite() {
            self.orbit.rotate(self.auto_rotate_speed * dt, 0.0);
            self.dirty = true;
        }
        let stepped = self.orbit.step();
        let changed = stepped || std::mem::take(&mut self.dirty);
        if changed {
            self.sync_camera();
        }
        changed
    }

    /// Whether the rendered camera is still easing toward its goal.
    pub fn is_settling(&self) -> bool {
        !self.orbit.is_settled()
    }

    // -- Accessors --

    /// Goal eye-to-target distance.
    pub fn distance(&self) -> f32 {
        self.orbit.goal().distance
    }

    /// Rendered eye-to-target distance.
    pub fn effective_distance(&self) -> f32 {
        self.orbit.current().distance
    }

    /// Goal polar angle (radians from +Y).
    pub fn polar(&self) -> f32 {
        self.orbit.goal().polar
    }

    /// Rendered polar angle.
    pub fn effective_polar(&self) -> f32 {
        self.orbit.current().polar
    }

    /// Goal azimuth in `[0, 2π)`.
    pub fn azimuth(&self) -> f32 {
        self.orbit.goal().azimuth
    }

    /// Rendered azimuth.
    pub fn effective_azimuth(&self) -> f32 {
        self.orbit.current().azimuth
    }

    /// Goal look-at target.
    pub fn target(&self) -> Vec3 {
        self.orbit.goal_target()
    }

    /// Rendered look-at target.
    pub fn effective_target(&self) -> Vec3 {
        self.orbit.current_target()
    }

    /// Distance and polar limits in effect.
    pub fn limits(&self) -> &OrbitLimits {
        self.orbit.limits()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, TAU};

    use super::*;
    use crate::options::ControlOptions;

    fn undamped() -> OrbitController {
        let options = Options {
            controls: ControlOptions {
                damping_enabled: false,
                ..ControlOptions::default()
            },
            ..Options::default()
        };
        OrbitController::new(&options).unwrap()
    }

    fn damped() -> OrbitController {
        OrbitController::new(&Options::default()).unwrap()
    }

    #[test]
    fn starts_at_configured_position() {
        let c = undamped();
        assert!((c.camera().eye - Vec3::new(0.0, 0.0, 50.0)).length() < 1e-3);
        assert_eq!(c.camera().target, Vec3::ZERO);
        assert!((c.distance() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut options = Options::default();
        options.controls.min_distance = 600.0;
        assert!(matches!(
            OrbitController::new(&options),
            Err(ViewportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn eye_stays_at_distance_over_orientation_grid() {
        let mut c = undamped();
        for i in 0..=8 {
            for j in 0..8 {
                let polar = PI * i as f32 / 8.0;
                let azimuth = TAU * j as f32 / 8.0;
                c.orbit.set_orientation(polar, azimuth);
                c.sync_camera();
                let d = c.camera().eye.distance(c.camera().target);
                assert!((d - c.distance()).abs() < 1e-3, "{polar} {azimuth}: {d}");
            }
        }
    }

    #[test]
    fn zoom_clamps_and_is_idempotent_at_limits() {
        let mut c = undamped();
        for _ in 0..10 {
            c.zoom(10_000.0);
        }
        assert_eq!(c.distance(), c.limits().max_distance);
        c.zoom(10_000.0);
        assert_eq!(c.distance(), c.limits().max_distance);

        for _ in 0..10 {
            c.zoom(-999.0);
        }
        assert_eq!(c.distance(), c.limits().min_distance);
        c.zoom(-999.0);
        assert_eq!(c.distance(), c.limits().min_distance);
        assert!(c.camera().eye.distance(c.camera().target) > 0.0);
    }

    #[test]
    fn rotate_drag_follows_pointer() {
        let mut c = undamped();
        let az = c.azimuth();
        let polar = c.polar();
        c.begin_drag(100.0, 100.0, DragMode::Rotate);
        assert!(c.drag(110.0, 95.0));
        assert!((c.azimuth() - (az + 0.1)).abs() < 1e-5);
        // Dragging up raises the camera (smaller polar angle)
        assert!((c.polar() - (polar - 0.05)).abs() < 1e-5);
    }

    #[test]
    fn rotation_clamps_polar() {
        let mut c = undamped();
        c.rotate(Vec2::new(0.0, 1.0e6));
        assert!(c.polar() < PI);
        let clamped = c.polar();
        c.rotate(Vec2::new(0.0, 1.0e6));
        assert_eq!(c.polar(), clamped);
    }

    #[test]
    fn drag_without_session_changes_nothing() {
        let mut c = undamped();
        let before = c.camera().clone();
        assert!(!c.drag(10.0, 10.0));
        assert!(!c.drag(500.0, -20.0));
        assert_eq!(c.camera(), &before);
    }

    #[test]
    fn zero_delta_drag_is_a_no_op() {
        let mut c = undamped();
        c.begin_drag(5.0, 5.0, DragMode::Pan);
        let target = c.target();
        assert!(!c.drag(5.0, 5.0));
        assert_eq!(c.target(), target);
        c.end_drag();
        assert!(!c.is_dragging());
        assert!(!c.drag(50.0, 5.0));
    }

    #[test]
    fn zoom_drag_uses_vertical_delta() {
        let mut c = undamped();
        c.begin_drag(0.0, 0.0, DragMode::Zoom);
        assert!(c.drag(0.0, 100.0));
        // 50 * (1 + 100 * 0.001)
        assert!((c.distance() - 55.0).abs() < 1e-3);
    }

    #[test]
    fn pan_scales_with_distance() {
        let pan_at = |distance: f32| {
            let mut c = undamped();
            c.set_camera_position(Vec3::new(0.0, 0.0, distance), Vec3::ZERO);
            c.begin_drag(0.0, 0.0, DragMode::Pan);
            assert!(c.drag(10.0, 0.0));
            c.target()
        };
        let near = pan_at(20.0);
        let far = pan_at(40.0);
        assert!(near.length() > 0.0);
        assert!((far - near * 2.0).length() < 1e-4);
        // Dragging right moves the target left (-X from the front view)
        assert!(near.x < 0.0);
    }

    #[test]
    fn wheel_zoom_works_without_session() {
        let mut c = undamped();
        assert!(c.zoom_by_wheel(100.0));
        assert!((c.distance() - 55.0).abs() < 1e-3);
        assert!(!c.zoom_by_wheel(0.0));
    }

    #[test]
    fn fit_frames_cube_and_is_idempotent() {
        let mut c = undamped();
        let bounds = BoundingVolume::new(Vec3::new(5.0, -5.0, -5.0), Vec3::new(15.0, 5.0, 5.0));
        let az = c.azimuth();
        assert!(c.fit_to_bounds(&bounds, 1.25));
        let expected = 5.0 / 22.5_f32.to_radians().tan() * 1.25;
        assert!((c.distance() - expected).abs() < 1e-3);
        assert_eq!(c.target(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(c.azimuth(), az);

        let first = c.camera().clone();
        assert!(c.fit_to_bounds(&bounds, 1.25));
        assert_eq!(c.camera(), &first);
    }

    #[test]
    fn fit_to_degenerate_bounds_is_ignored() {
        let mut c = undamped();
        let before = c.camera().clone();
        assert!(!c.fit(&BoundingVolume::new(Vec3::ONE, Vec3::ONE)));
        assert_eq!(c.camera(), &before);
    }

    #[test]
    fn fit_and_reset_returns_to_front_view() {
        let mut c = undamped();
        c.rotate(Vec2::new(80.0, -40.0));
        let bounds = BoundingVolume::new(Vec3::splat(-5.0), Vec3::splat(5.0));
        assert!(c.fit_and_reset(&bounds, 1.25));
        let eye = c.camera().eye;
        assert!(eye.x.abs() < 1e-3 && eye.y.abs() < 1e-3);
        assert!(eye.z > 0.0);
    }

    #[test]
    fn damped_motion_eases_then_settles() {
        let mut c = damped();
        assert!(c.tick(0.016));
        assert!(!c.tick(0.016));

        c.zoom(100.0);
        let goal = c.distance();
        assert!(c.is_settling());
        assert!(c.effective_distance() < goal);

        let mut ticks = 0;
        while c.tick(0.016) {
            ticks += 1;
            assert!(ticks < 500, "never settled");
        }
        assert!(!c.is_settling());
        assert_eq!(c.effective_distance(), goal);
        assert!((c.camera().distance() - goal).abs() < 1e-3);
    }

    /// Forward angular step between two wrapped azimuths, in `[0, 2π)`.
    fn forward_step(from: f32, to: f32) -> f32 {
        (to - from).rem_euclid(TAU)
    }

    #[test]
    fn fast_damped_drag_keeps_turning_with_the_pointer() {
        let mut c = damped();
        let _ = c.tick(0.016);
        c.begin_drag(0.0, 300.0, DragMode::Rotate);
        let mut last = c.effective_azimuth();
        for i in 1..=30 {
            assert!(c.drag(100.0 * i as f32, 300.0));
            let _ = c.tick(0.016);
            let az = c.effective_azimuth();
            let moved = forward_step(last, az);
            assert!(moved > 0.0 && moved < PI, "frame {i}: step {moved}");
            last = az;
        }
        c.end_drag();
        // The flick carries on in the same direction while settling
        while c.tick(0.016) {
            let az = c.effective_azimuth();
            assert!(forward_step(last, az) < PI);
            last = az;
        }
        assert!((c.effective_azimuth() - c.azimuth()).abs() < 1e-4);
    }

    #[test]
    fn long_turntable_frame_rotates_forwards() {
        let mut c = damped();
        while c.tick(0.0) {}
        c.set_auto_rotate(true);
        let before = c.effective_azimuth();
        // 10 s at 0.5 rad/s puts the goal 5 rad ahead
        assert!(c.tick(10.0));
        let moved = forward_step(before, c.effective_azimuth());
        assert!((moved - 1.25).abs() < 1e-3, "moved {moved}");
    }

    #[test]
    fn auto_rotate_advances_azimuth_by_speed() {
        let mut c = undamped();
        let _ = c.tick(0.0);
        let az = c.azimuth();
        c.set_auto_rotate(true);
        assert!(c.tick(0.5));
        assert!((c.azimuth() - (az + 0.25)).abs() < 1e-5);
        assert!(!c.toggle_auto_rotate());
        assert!(!c.tick(0.5));
    }

    #[test]
    fn set_camera_position_handles_coincident_points() {
        let mut c = undamped();
        c.set_camera_position(Vec3::ONE, Vec3::ONE);
        assert_eq!(c.distance(), c.limits().min_distance);
        assert!(c.camera().eye != c.camera().target);
    }
}
