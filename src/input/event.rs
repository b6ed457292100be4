/// Platform-agnostic input events.
///
/// Hosts translate their native pointer/wheel/resize notifications into
/// these and feed them to
/// [`ViewportEngine::handle_input`](crate::engine::ViewportEngine::handle_input).
///
/// # Example
///
/// ```ignore
/// engine.handle_input(InputEvent::PointerDown {
///     x: 100.0,
///     y: 200.0,
///     button: MouseButton::Left,
/// });
/// engine.handle_input(InputEvent::CursorMoved { x: 120.0, y: 200.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute client position.
    CursorMoved {
        /// Horizontal position in client pixels.
        x: f32,
        /// Vertical position in client pixels.
        y: f32,
    },
    /// Cursor left the viewport element.
    CursorLeft,
    /// Mouse button pressed at a client position.
    PointerDown {
        /// Horizontal position in client pixels.
        x: f32,
        /// Vertical position in client pixels.
        y: f32,
        /// Which button went down.
        button: MouseButton,
    },
    /// Mouse button released.
    PointerUp {
        /// Which button went up.
        button: MouseButton,
    },
    /// Scroll wheel delta (positive = away from the scene).
    Scroll {
        /// Vertical scroll amount.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
    /// Host element resized.
    Resized {
        /// New width in pixels.
        width: f32,
        /// New height in pixels.
        height: f32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Auxiliary (middle / wheel) button.
    Middle,
    /// Browser "back" thumb button.
    Back,
    /// Browser "forward" thumb button.
    Forward,
}

impl MouseButton {
    /// Bit for this button in a [`Buttons`] set (DOM `MouseEvent.buttons`
    /// layout).
    pub const fn bit(self) -> u8 {
        match self {
            Self::Left => Buttons::PRIMARY.0,
            Self::Right => Buttons::SECONDARY.0,
            Self::Middle => Buttons::AUXILIARY.0,
            Self::Back => 1 << 3,
            Self::Forward => 1 << 4,
        }
    }
}

/// Set of currently held mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons(u8);

impl Buttons {
    /// No buttons held.
    pub const NONE: Self = Self(0);
    /// Primary button only.
    pub const PRIMARY: Self = Self(1);
    /// Secondary button only.
    pub const SECONDARY: Self = Self(1 << 1);
    /// Auxiliary button only.
    pub const AUXILIARY: Self = Self(1 << 2);

    /// Raw bit set.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether no button is held.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Mark a button as held.
    pub fn press(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    /// Mark a button as released.
    pub fn release(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }
}

impl From<MouseButton> for Buttons {
    fn from(button: MouseButton) -> Self {
        Self(button.bit())
    }
}

/// Modifier keys relevant to camera gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift held.
    pub shift: bool,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            winit::event::MouseButton::Back => Self::Back,
            winit::event::MouseButton::Forward => Self::Forward,
            _ => Self::Left,
        }
    }
}
