use glam::Vec2;

use super::event::{Buttons, Modifiers};

/// What a pointer drag does to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Orbit around the target.
    Rotate,
    /// Translate the target in the view plane.
    Pan,
    /// Move toward/away from the target.
    Zoom,
}

impl DragMode {
    /// Resolve the gesture for the buttons held at press time.
    ///
    /// Primary rotates (or pans with shift), secondary zooms, auxiliary
    /// pans. Chords and thumb buttons map to nothing, so no drag session
    /// starts.
    pub fn resolve(buttons: Buttons, modifiers: Modifiers) -> Option<Self> {
        match buttons {
            Buttons::PRIMARY if modifiers.shift => Some(Self::Pan),
            Buttons::PRIMARY => Some(Self::Rotate),
            Buttons::SECONDARY => Some(Self::Zoom),
            Buttons::AUXILIARY => Some(Self::Pan),
            _ => None,
        }
    }
}

/// Transient state between pointer press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Gesture chosen at press time.
    pub mode: DragMode,
    /// Pointer position at the previous drag step.
    pub last: Vec2,
}

impl DragSession {
    /// Start a session at a pointer position.
    pub fn new(mode: DragMode, at: Vec2) -> Self {
        Self { mode, last: at }
    }

    /// Screen delta since the previous call; records `to` as the new
    /// reference point.
    pub fn advance(&mut self, to: Vec2) -> Vec2 {
        let delta = to - self.last;
        self.last = to;
        delta
    }
}
