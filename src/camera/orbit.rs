//! Spherical orbit state with damped easing toward a goal.
//!
//! Input handlers move the *goal*; [`OrbitState::step`] pulls the
//! *current* (rendered) state toward it. With damping disabled the two are
//! always equal.
//!
//! Azimuth is tracked unwrapped internally so the current angle always
//! eases the way the goal moved, however far ahead it is. Only the reported
//! values are wrapped into `[0, 2π)`.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;

use crate::options::ControlOptions;

/// Keeps the camera off the exact poles, where the view basis collapses.
const POLE_EPSILON: f32 = 1e-4;
/// Angular gap (radians) below which the current state snaps to the goal.
const SETTLE_ANGLE: f32 = 1e-4;
/// Relative distance/target gap below which the current state snaps.
const SETTLE_RELATIVE: f32 = 1e-4;

/// Spherical coordinates of the eye relative to the orbit target.
///
/// `polar` is measured from +Y (0 = above the target, π = below);
/// `azimuth` is measured in the XZ plane from +X toward +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Angle from the +Y axis, radians.
    pub polar: f32,
    /// Angle around the Y axis, radians in `[0, 2π)`.
    pub azimuth: f32,
    /// Eye-to-target distance.
    pub distance: f32,
}

impl Spherical {
    /// Decompose an eye-minus-target offset. `None` for a zero or
    /// non-finite offset.
    pub fn from_offset(offset: Vec3) -> Option<Self> {
        let distance = offset.length();
        if !(distance > 0.0 && distance.is_finite()) {
            return None;
        }
        Some(Self {
            polar: (offset.y / distance).clamp(-1.0, 1.0).acos(),
            azimuth: wrap_angle(offset.z.atan2(offset.x)),
            distance,
        })
    }

    /// Angle above the XZ plane.
    #[inline]
    pub fn elevation(&self) -> f32 {
        FRAC_PI_2 - self.polar
    }

    /// Eye-minus-target offset:
    /// `(d·cos(el)·cos(az), d·sin(el), d·cos(el)·sin(az))`.
    pub fn to_offset(&self) -> Vec3 {
        let elevation = self.elevation();
        let (sin_el, cos_el) = elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        Vec3::new(
            self.distance * cos_el * cos_az,
            self.distance * sin_el,
            self.distance * cos_el * sin_az,
        )
    }
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can return TAU itself for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest angular difference `to - from` in `[-π, π)`.
#[inline]
fn shortest_arc(from: f32, to: f32) -> f32 {
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Clamping limits for the orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    /// Closest allowed distance (always > 0).
    pub min_distance: f32,
    /// Farthest allowed distance.
    pub max_distance: f32,
    /// Lowest polar angle.
    pub min_polar: f32,
    /// Highest polar angle.
    pub max_polar: f32,
}

impl OrbitLimits {
    /// Limits taken from validated control options.
    pub fn from_options(options: &ControlOptions) -> Self {
        Self {
            min_distance: options.min_distance,
            max_distance: options.max_distance,
            min_polar: options.min_polar,
            max_polar: options.max_polar,
        }
    }

    /// Clamp a distance into range.
    #[inline]
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    /// Clamp a polar angle into range, staying clear of the poles.
    #[inline]
    pub fn clamp_polar(&self, polar: f32) -> f32 {
        let lo = self.min_polar.max(POLE_EPSILON);
        let hi = self.max_polar.min(PI - POLE_EPSILON);
        if lo > hi {
            // Range lies entirely inside a pole band
            return (self.min_polar + self.max_polar) * 0.5;
        }
        polar.clamp(lo, hi)
    }
}

/// Goal and current orbit around a look-at target.
#[derive(Debug, Clone)]
pub struct OrbitState {
    /// Goal orientation/distance; azimuth unwrapped.
    goal: Spherical,
    /// Rendered orientation/distance; azimuth unwrapped.
    current: Spherical,
    goal_target: Vec3,
    current_target: Vec3,
    limits: OrbitLimits,
    /// Fraction of the remaining gap closed per step; `None` = no damping.
    damping: Option<f32>,
}

impl OrbitState {
    /// Orbit placed at `eye` looking at `target`. Coincident points fall
    /// back to a front view at the minimum distance.
    pub fn new(
        eye: Vec3,
        target: Vec3,
        limits: OrbitLimits,
        damping: Option<f32>,
    ) -> Self {
        let mut state = Self {
            goal: Spherical {
                polar: FRAC_PI_2,
                azimuth: FRAC_PI_2,
                distance: limits.min_distance,
            },
            current: Spherical {
                polar: FRAC_PI_2,
                azimuth: FRAC_PI_2,
                distance: limits.min_distance,
            },
            goal_target: target,
            current_target: target,
            limits,
            damping,
        };
        state.place(eye, target);
        state
    }

    /// Jump both goal and current state to `eye` looking at `target`.
    /// A zero-length offset keeps the current orientation and clamps the
    /// distance to the minimum.
    pub fn place(&mut self, eye: Vec3, target: Vec3) {
        let spherical =
            Spherical::from_offset(eye - target).unwrap_or(Spherical {
                distance: self.limits.min_distance,
                ..self.current
            });
        let clamped = Spherical {
            polar: self.limits.clamp_polar(spherical.polar),
            azimuth: spherical.azimuth,
            distance: self.limits.clamp_distance(spherical.distance),
        };
        self.goal = clamped;
        self.current = clamped;
        self.goal_target = target;
        self.current_target = target;
    }

    /// Clamping limits in effect.
    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// Goal spherical coordinates (azimuth wrapped).
    pub fn goal(&self) -> Spherical {
        Spherical {
            azimuth: wrap_angle(self.goal.azimuth),
            ..self.goal
        }
    }

    /// Current (rendered) spherical coordinates (azimuth wrapped).
    pub fn current(&self) -> Spherical {
        Spherical {
            azimuth: wrap_angle(self.current.azimuth),
            ..self.current
        }
    }

    /// Goal look-at target.
    pub fn goal_target(&self) -> Vec3 {
        self.goal_target
    }

    /// Current (rendered) look-at target.
    pub fn current_target(&self) -> Vec3 {
        self.current_target
    }

    /// Current eye position.
    pub fn eye(&self) -> Vec3 {
        self.current_target + self.current.to_offset()
    }

    /// Whether damping is enabled.
    pub fn is_damped(&self) -> bool {
        self.damping.is_some()
    }

    /// Rotate the goal by azimuth/polar increments (clamped).
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        if !(delta_azimuth.is_finite() && delta_polar.is_finite()) {
            return;
        }
        self.goal.azimuth += delta_azimuth;
        self.goal.polar = self.limits.clamp_polar(self.goal.polar + delta_polar);
        self.sync_undamped();
        self.rebase_azimuth();
    }

    /// Replace the goal orientation. The azimuth is reached along the
    /// shorter arc.
    pub fn set_orientation(&mut self, polar: f32, azimuth: f32) {
        if !(polar.is_finite() && azimuth.is_finite()) {
            return;
        }
        self.goal.polar = self.limits.clamp_polar(polar);
        self.goal.azimuth +=
            shortest_arc(wrap_angle(self.goal.azimuth), wrap_angle(azimuth));
        self.sync_undamped();
        self.rebase_azimuth();
    }

    /// Set the goal distance (clamped). Non-finite input is ignored.
    pub fn set_distance(&mut self, distance: f32) {
        if !distance.is_finite() {
            return;
        }
        self.goal.distance = self.limits.clamp_distance(distance);
        self.sync_undamped();
    }

    /// Move the goal target; the current target eases toward it.
    pub fn set_target(&mut self, target: Vec3) {
        if !target.is_finite() {
            return;
        }
        self.goal_target = target;
        self.sync_undamped();
    }

    /// Shift goal and current target together (no easing), so panning
    /// tracks the pointer exactly.
    pub fn translate_target(&mut self, delta: Vec3) {
        if !delta.is_finite() {
            return;
        }
        self.goal_target += delta;
        self.current_target += delta;
    }

    /// Whether the current state has reached the goal.
    pub fn is_settled(&self) -> bool {
        self.current == self.goal && self.current_target == self.goal_target
    }

    /// Advance the current state one damping step toward the goal.
    /// Returns `true` if the current state changed.
    pub fn step(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }
        let Some(factor) = self.damping else {
            self.snap();
            return true;
        };

        let scale = SETTLE_RELATIVE * self.goal.distance.max(1.0);

        let d_polar = self.goal.polar - self.current.polar;
        // Raw gap: a goal more than π ahead is still approached forwards
        let d_azimuth = self.goal.azimuth - self.current.azimuth;
        let d_distance = self.goal.distance - self.current.distance;
        let d_target = self.goal_target - self.current_target;

        if d_polar.abs() < SETTLE_ANGLE
            && d_azimuth.abs() < SETTLE_ANGLE
            && d_distance.abs() < scale
            && d_target.length() < scale
        {
            self.snap();
            return true;
        }

        self.current.polar += d_polar * factor;
        self.current.azimuth += d_azimuth * factor;
        self.current.distance += d_distance * factor;
        self.current_target += d_target * factor;
        self.rebase_azimuth();
        true
    }

    /// Jump the current state to the goal.
    pub fn snap(&mut self) {
        self.current = self.goal;
        self.current_target = self.goal_target;
        self.rebase_azimuth();
    }

    /// Shift both azimuths by whole turns so the current one stays in
    /// `[0, 2π)`. Their difference is unchanged.
    fn rebase_azimuth(&mut self) {
        let turns = (self.current.azimuth / TAU).floor();
        if turns != 0.0 && turns.is_finite() {
            self.current.azimuth -= turns * TAU;
            self.goal.azimuth -= turns * TAU;
        }
    }

    fn sync_undamped(&mut self) {
        if self.damping.is_none() {
            self.snap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> OrbitLimits {
        OrbitLimits {
            min_distance: 1.0,
            max_distance: 100.0,
            min_polar: 0.0,
            max_polar: PI,
        }
    }

    #[test]
    fn offset_round_trip() {
        let s = Spherical {
            polar: 1.0,
            azimuth: 2.0,
            distance: 7.0,
        };
        let back = Spherical::from_offset(s.to_offset()).unwrap();
        assert!((back.polar - 1.0).abs() < 1e-5);
        assert!((back.azimuth - 2.0).abs() < 1e-5);
        assert!((back.distance - 7.0).abs() < 1e-5);
    }

    #[test]
    fn front_view_sits_on_positive_z() {
        let state = OrbitState::new(
            Vec3::new(0.0, 0.0, 50.0),
            Vec3::ZERO,
            OrbitLimits {
                max_distance: 500.0,
                ..limits()
            },
            None,
        );
        assert!((state.current().azimuth - FRAC_PI_2).abs() < 1e-6);
        assert!((state.current().polar - FRAC_PI_2).abs() < 1e-6);
        assert!((state.eye() - Vec3::new(0.0, 0.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn coincident_eye_and_target_clamp_to_min_distance() {
        let state = OrbitState::new(Vec3::ONE, Vec3::ONE, limits(), None);
        assert_eq!(state.current().distance, 1.0);
        assert!(state.eye().distance(Vec3::ONE) > 0.99);
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for a in [-7.0, -PI, -1e-9, 0.0, TAU, 13.0] {
            let w = wrap_angle(a);
            assert!((0.0..TAU).contains(&w), "{a} -> {w}");
        }
    }

    #[test]
    fn polar_never_reaches_the_poles() {
        let l = limits();
        assert!(l.clamp_polar(-1.0) > 0.0);
        assert!(l.clamp_polar(10.0) < PI);
    }

    #[test]
    fn damped_step_closes_the_gap_by_factor() {
        let mut state = OrbitState::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            limits(),
            Some(0.25),
        );
        state.set_distance(20.0);
        assert_eq!(state.current().distance, 10.0);
        assert!(state.step());
        assert!((state.current().distance - 12.5).abs() < 1e-5);
        assert!(state.step());
        assert!((state.current().distance - 14.375).abs() < 1e-4);
    }

    #[test]
    fn damped_state_settles_and_stops_reporting() {
        let mut state = OrbitState::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            limits(),
            Some(0.25),
        );
        state.rotate(1.0, 0.3);
        let mut steps = 0;
        while state.step() {
            steps += 1;
            assert!(steps < 500, "never settled");
        }
        assert!(state.is_settled());
        assert!(!state.step());
    }

    #[test]
    fn azimuth_eases_along_the_short_way_across_zero() {
        let mut state = OrbitState::new(
            Vec3::new(10.0, 0.0, 0.1),
            Vec3::ZERO,
            limits(),
            Some(0.5),
        );
        // Current azimuth is just above 0; rotate the goal backwards past 0.
        state.rotate(-0.2, 0.0);
        let _ = state.step();
        let az = state.current().azimuth;
        // Moved backwards by ~0.1 into the top of the range, not forward
        assert!(az > PI, "took the long way: {az}");
    }

    /// Forward angular step between two wrapped azimuths, in `[0, 2π)`.
    fn forward_step(from: f32, to: f32) -> f32 {
        (to - from).rem_euclid(TAU)
    }

    #[test]
    fn goal_far_ahead_is_approached_forwards() {
        let mut state = OrbitState::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            limits(),
            Some(0.25),
        );
        let before = state.current().azimuth;
        // More than half a turn ahead
        state.rotate(4.0, 0.0);
        assert!(state.step());
        let moved = forward_step(before, state.current().azimuth);
        assert!((moved - 1.0).abs() < 1e-4, "moved {moved}");
    }

    #[test]
    fn sustained_fast_rotation_never_reverses() {
        let mut state = OrbitState::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            limits(),
            Some(0.25),
        );
        let mut last = state.current().azimuth;
        for _ in 0..40 {
            state.rotate(1.0, 0.0);
            let _ = state.step();
            let az = state.current().azimuth;
            let moved = forward_step(last, az);
            assert!(moved > 0.0 && moved < PI, "step of {moved}");
            last = az;
        }
        let goal = state.goal().azimuth;
        while state.step() {
            let az = state.current().azimuth;
            assert!(forward_step(last, az) < PI);
            last = az;
        }
        assert!((state.current().azimuth - goal).abs() < 1e-4);
        assert!((0.0..TAU).contains(&state.goal().azimuth));
    }

    #[test]
    fn non_finite_distance_is_ignored() {
        let mut state =
            OrbitState::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, limits(), None);
        state.set_distance(f32::INFINITY);
        assert_eq!(state.goal().distance, 10.0);
        state.set_distance(f32::NAN);
        assert_eq!(state.goal().distance, 10.0);
    }

    #[test]
    fn undamped_mutations_apply_immediately() {
        let mut state =
            OrbitState::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, limits(), None);
        state.set_distance(30.0);
        assert_eq!(state.current().distance, 30.0);
        state.set_target(Vec3::X);
        assert_eq!(state.current_target(), Vec3::X);
    }
}
