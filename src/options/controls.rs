use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Orbit navigation limits, sensitivities and damping.
pub struct ControlOptions {
    /// Closest allowed camera distance to the orbit target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest allowed camera distance to the orbit target.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Lower polar angle bound in radians (0 = looking down from +Y).
    #[schemars(skip)]
    pub min_polar: f32,
    /// Upper polar angle bound in radians (π = looking up from -Y).
    #[schemars(skip)]
    pub max_polar: f32,
    /// Radians of rotation per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Fractional distance change per pixel of zoom drag or wheel delta.
    #[schemars(title = "Zoom Speed", range(min = 0.0001, max = 0.01), extend("step" = 0.0001))]
    pub zoom_speed: f32,
    /// Pan distance per pixel, as a fraction of the orbit distance.
    #[schemars(title = "Pan Speed", range(min = 0.0001, max = 0.01), extend("step" = 0.0001))]
    pub pan_speed: f32,
    /// Whether camera motion eases toward its goal instead of snapping.
    #[schemars(title = "Damping")]
    pub damping_enabled: bool,
    /// Fraction of the remaining gap closed on every tick.
    #[schemars(title = "Damping Factor", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub damping_factor: f32,
    /// Padding multiplier applied when fitting the camera to an object.
    #[schemars(title = "Fit Margin", range(min = 1.0, max = 3.0), extend("step" = 0.05))]
    pub fit_margin: f32,
    /// Turntable speed in radians per second.
    #[schemars(title = "Auto-Rotate Speed", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub auto_rotate_speed: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_distance: 500.0,
            min_polar: 0.0,
            max_polar: PI,
            rotate_speed: 0.01,
            zoom_speed: 0.001,
            pan_speed: 0.001,
            damping_enabled: true,
            damping_factor: 0.25,
            fit_margin: 1.25,
            auto_rotate_speed: 0.5,
        }
    }
}

impl ControlOptions {
    /// Reject limits that contradict each other.
    ///
    /// Only structural problems are errors here; runtime inputs that would
    /// push the camera past these limits are clamped instead.
    pub fn validate(&self) -> Result<(), ViewportError> {
        let invalid = |msg: String| Err(ViewportError::InvalidConfig(msg));

        if !(self.min_distance > 0.0 && self.min_distance.is_finite()) {
            return invalid(format!(
                "min_distance must be positive, got {}",
                self.min_distance
            ));
        }
        if self.min_distance > self.max_distance {
            return invalid(format!(
                "min_distance ({}) exceeds max_distance ({})",
                self.min_distance, self.max_distance
            ));
        }
        if !(0.0..=PI).contains(&self.min_polar)
            || !(0.0..=PI).contains(&self.max_polar)
            || self.min_polar > self.max_polar
        {
            return invalid(format!(
                "polar range must satisfy 0 <= min <= max <= pi, got {}..{}",
                self.min_polar, self.max_polar
            ));
        }
        let speeds = [
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("pan_speed", self.pan_speed),
            ("auto_rotate_speed", self.auto_rotate_speed),
        ];
        for (name, speed) in speeds {
            if !(speed.is_finite() && speed >= 0.0) {
                return invalid(format!(
                    "{name} must be finite and non-negative, got {speed}"
                ));
            }
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return invalid(format!(
                "damping_factor must lie in (0, 1], got {}",
                self.damping_factor
            ));
        }
        if !(self.fit_margin > 0.0 && self.fit_margin.is_finite()) {
            return invalid(format!(
                "fit_margin must be positive, got {}",
                self.fit_margin
            ));
        }
        Ok(())
    }
}
