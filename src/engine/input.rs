//! Input dispatch for ViewportEngine

use glam::Vec2;
use web_time::Instant;

use super::{InputOutcome, RenderTarget, ViewportEngine};
use crate::input::{Buttons, ClickResult, DragMode, InputEvent, MouseButton};
use crate::scene::SceneGraph;

/// Margin used when a double click focuses an object.
const FOCUS_FIT_MARGIN: f32 = 1.5;

impl<R: RenderTarget, S: SceneGraph> ViewportEngine<R, S> {
    /// Process a platform-agnostic input event.
    ///
    /// Drags rotate/pan/zoom the camera according to the held buttons;
    /// clicks pick and come back as [`InputOutcome`]s.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        self.handle_input_at(event, Instant::now())
    }

    /// [`handle_input`](Self::handle_input) with an explicit timestamp for
    /// double-click detection.
    pub fn handle_input_at(
        &mut self,
        event: InputEvent,
        now: Instant,
    ) -> InputOutcome {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.dispatch_cursor_moved(x, y);
                InputOutcome::None
            }
            InputEvent::CursorLeft => {
                self.release_pointer();
                InputOutcome::None
            }
            InputEvent::PointerDown { x, y, button } => {
                self.dispatch_pointer_down(x, y, button);
                InputOutcome::None
            }
            InputEvent::PointerUp { button } => {
                self.dispatch_pointer_up(button, now)
            }
            InputEvent::Scroll { delta } => {
                let _ = self.controller.zoom_by_wheel(delta);
                InputOutcome::None
            }
            InputEvent::ModifiersChanged { shift } => {
                self.modifiers.shift = shift;
                InputOutcome::None
            }
            InputEvent::Resized { width, height } => {
                if let Err(e) = self.resize(width, height) {
                    log::warn!("{e}");
                }
                InputOutcome::None
            }
        }
    }

    /// Drop every pointer state: drag session, held buttons and pending
    /// click. Hosts call this when they capture the pointer for their own
    /// gestures.
    pub fn release_pointer(&mut self) {
        self.controller.end_drag();
        self.clicks.cancel();
        self.buttons = Buttons::NONE;
        self.cursor = None;
    }

    /// Cursor moved: advance the drag session and the click tracker.
    fn dispatch_cursor_moved(&mut self, x: f32, y: f32) {
        let at = Vec2::new(x, y);
        self.cursor = Some(at);
        self.clicks.moved(at);
        let _ = self.controller.drag(x, y);
    }

    /// Button pressed: resolve the gesture for the full button set.
    fn dispatch_pointer_down(&mut self, x: f32, y: f32, button: MouseButton) {
        let at = Vec2::new(x, y);
        self.cursor = Some(at);
        self.buttons.press(button);
        self.restart_drag(at);

        if self.buttons == Buttons::PRIMARY {
            let under = self.pick(x, y).first().map(|hit| hit.object);
            self.clicks.press(at, under);
        } else {
            // Chords never produce clicks
            self.clicks.cancel();
        }
    }

    /// Button released: end or re-resolve the drag, then run click
    /// detection for the primary button.
    fn dispatch_pointer_up(
        &mut self,
        button: MouseButton,
        now: Instant,
    ) -> InputOutcome {
        self.buttons.release(button);
        match self.cursor {
            Some(at) => self.restart_drag(at),
            None => self.controller.end_drag(),
        }

        if button != MouseButton::Left {
            return InputOutcome::None;
        }

        let hit = self
            .cursor
            .and_then(|at| self.pick(at.x, at.y).into_iter().next());
        match self.clicks.release(hit.map(|h| h.object), now) {
            ClickResult::NoAction => InputOutcome::None,
            ClickResult::SingleClick { .. } => match hit {
                Some(hit) => {
                    self.sync_residue_cursor(hit.object);
                    InputOutcome::Selected(hit)
                }
                None => InputOutcome::None,
            },
            ClickResult::DoubleClick { target } => {
                if self.fit_to_object(target, FOCUS_FIT_MARGIN) {
                    InputOutcome::Focused(target)
                } else {
                    InputOutcome::None
                }
            }
            ClickResult::ClearSelection => InputOutcome::ClearSelection,
        }
    }

    /// Replace the drag session with whatever the held buttons map to now.
    fn restart_drag(&mut self, at: Vec2) {
        self.controller.end_drag();
        if let Some(mode) = DragMode::resolve(self.buttons, self.modifiers) {
            self.controller.begin_drag(at.x, at.y, mode);
        }
    }
}
