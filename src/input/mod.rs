//! Input handling: event types, drag gestures, and the click state machine
//! that turns raw pointer events into camera motion and selections.

/// Drag gesture resolution and the per-press drag session.
pub mod drag;
/// Platform-agnostic input events.
pub mod event;
/// Click/double-click state machine.
pub mod mouse;

pub use drag::{DragMode, DragSession};
pub use event::{Buttons, InputEvent, Modifiers, MouseButton};
pub use mouse::{ClickResult, ClickTracker};
