use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// When the frame driver asks the renderer for a new frame.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    /// Render on every display refresh.
    #[default]
    Continuous,
    /// Render only when the camera moved since the last frame.
    OnDemand,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[schemars(title = "Frame", inline)]
#[serde(default)]
/// Frame loop scheduling options.
pub struct FrameOptions {
    /// Render scheduling policy.
    #[schemars(title = "Render Policy")]
    pub render_policy: RenderPolicy,
    /// Frame rate cap (0 = follow the display refresh).
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
}
