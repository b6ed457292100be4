use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters and initial placement.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial eye position in world space.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Initial look-at point in world space.
    #[schemars(skip)]
    pub target: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            position: [0.0, 0.0, 50.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraOptions {
    /// Reject projections that cannot produce a usable frustum.
    pub fn validate(&self) -> Result<(), ViewportError> {
        if !(self.fovy > 0.0 && self.fovy < 180.0) {
            return Err(ViewportError::InvalidConfig(format!(
                "fovy must lie in (0, 180), got {}",
                self.fovy
            )));
        }
        if !(self.znear > 0.0 && self.zfar > self.znear) {
            return Err(ViewportError::InvalidConfig(format!(
                "clip planes must satisfy 0 < znear < zfar, got {}..{}",
                self.znear, self.zfar
            )));
        }
        if self.position.iter().chain(&self.target).any(|c| !c.is_finite()) {
            return Err(ViewportError::InvalidConfig(
                "camera position and target must be finite".into(),
            ));
        }
        Ok(())
    }
}
