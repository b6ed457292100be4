//! Centralized camera/control options with TOML preset support.
//!
//! All tweakable settings (projection, navigation limits, damping, frame
//! scheduling) are consolidated here. Options serialize to/from TOML so a
//! host can ship view presets next to its assets.

mod camera;
mod controls;
mod frame;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlOptions;
pub use frame::{FrameOptions, RenderPolicy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and initial placement.
    pub camera: CameraOptions,
    /// Orbit navigation parameters.
    pub controls: ControlOptions,
    /// Frame loop scheduling.
    pub frame: FrameOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Check every section for structurally invalid values.
    pub fn validate(&self) -> Result<(), ViewportError> {
        self.camera.validate()?;
        self.controls.validate()
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewportError> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| ViewportError::OptionsParse(e.to_string()))?;
        options.validate()?;
        log::info!("Loaded camera options from '{}'", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewportError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewportError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("Saved camera options to '{}'", path.display());
        Ok(())
    }
}
