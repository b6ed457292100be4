use glam::Vec2;
use web_time::{Duration, Instant};

use crate::scene::ObjectId;

const DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(400);
/// Squared pixel distance a pressed pointer may travel and still count as a
/// click.
const DRAG_THRESHOLD_SQ: f32 = 1.0;

/// Result of processing a pointer release through the click state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResult {
    /// No selection action (drag, mismatched press/release, etc.)
    NoAction,
    /// Single click on an object.
    SingleClick {
        /// Object under the pointer.
        target: ObjectId,
    },
    /// Second click on the same object within the threshold.
    DoubleClick {
        /// Object under the pointer.
        target: ObjectId,
    },
    /// Clicked on background.
    ClearSelection,
}

/// Tracks press position, drag state, and the double-click timer.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    press_at: Option<Vec2>,
    press_target: Option<ObjectId>,
    is_dragging: bool,
    last_click: Option<(Instant, ObjectId)>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickTracker {
    /// Create a tracker with no active press.
    pub fn new() -> Self {
        Self {
            press_at: None,
            press_target: None,
            is_dragging: false,
            last_click: None,
        }
    }

    /// Record the press position and what (if anything) is under it.
    pub fn press(&mut self, at: Vec2, target: Option<ObjectId>) {
        self.press_at = Some(at);
        self.press_target = target;
        self.is_dragging = false;
    }

    /// Note pointer motion; once it strays from the press point the
    /// gesture is a drag, not a click.
    pub fn moved(&mut self, to: Vec2) {
        if let Some(at) = self.press_at {
            if to.distance_squared(at) > DRAG_THRESHOLD_SQ {
                self.is_dragging = true;
            }
        }
    }

    /// Whether the current press has turned into a drag.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Forget the current press without producing a click (pointer left
    /// the viewport).
    pub fn cancel(&mut self) {
        self.press_at = None;
        self.press_target = None;
        self.is_dragging = false;
    }

    /// Process a release with whatever is under the pointer now.
    pub fn release(
        &mut self,
        target: Option<ObjectId>,
        now: Instant,
    ) -> ClickResult {
        if self.press_at.take().is_none() {
            return ClickResult::NoAction;
        }
        let press_target = self.press_target.take();
        let was_dragging = std::mem::take(&mut self.is_dragging);

        if was_dragging {
            self.last_click = None;
            return ClickResult::NoAction;
        }

        match (press_target, target) {
            (Some(down), Some(up)) if down == up => {
                let is_double = self.last_click.is_some_and(|(at, id)| {
                    id == up
                        && now.saturating_duration_since(at)
                            < DOUBLE_CLICK_THRESHOLD
                });
                if is_double {
                    self.last_click = None;
                    ClickResult::DoubleClick { target: up }
                } else {
                    self.last_click = Some((now, up));
                    ClickResult::SingleClick { target: up }
                }
            }
            (None, None) => {
                self.last_click = None;
                ClickResult::ClearSelection
            }
            _ => {
                self.last_click = None;
                ClickResult::NoAction
            }
        }
    }
}
