//! Canvas size, host layout rectangle and projection aspect.

use glam::Vec2;

use crate::error::ViewportError;

/// Layout rectangle of the host element in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// Drawable surface dimensions and the projection state derived from them.
#[derive(Debug, Clone)]
pub struct Viewport {
    width: f32,
    height: f32,
    aspect: f32,
    rect: ClientRect,
    projection_dirty: bool,
}

impl Viewport {
    /// Viewport of the given size. Invalid sizes fall back to 1x1.
    pub fn new(width: f32, height: f32) -> Self {
        let mut viewport = Self {
            width: 1.0,
            height: 1.0,
            aspect: 1.0,
            rect: ClientRect {
                left: 0.0,
                top: 0.0,
                width: 1.0,
                height: 1.0,
            },
            projection_dirty: true,
        };
        if let Err(e) = viewport.resize(width, height) {
            log::warn!("{e}; using a 1x1 viewport");
        }
        viewport
    }

    /// Record a new surface size and recompute the aspect ratio.
    ///
    /// Rejects zero, negative or non-finite dimensions, keeping the previous
    /// aspect. The client rectangle takes the new size and keeps its
    /// offset.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ViewportError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            log::debug!("rejected viewport resize to {width}x{height}");
            return Err(ViewportError::InvalidDimension { width, height });
        }
        self.width = width;
        self.height = height;
        self.aspect = width / height;
        self.rect.width = width;
        self.rect.height = height;
        self.projection_dirty = true;
        Ok(())
    }

    /// Last valid aspect ratio (width / height).
    pub fn current_aspect(&self) -> f32 {
        self.aspect
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Host element's layout rectangle, for hosts whose pointer coordinates
    /// are relative to the page rather than the element.
    ///
    /// Rectangles without positive size are ignored.
    pub fn set_client_rect(&mut self, rect: ClientRect) {
        if rect.width > 0.0 && rect.height > 0.0 {
            self.rect = rect;
        } else {
            log::debug!("ignored empty client rect {rect:?}");
        }
    }

    /// Current layout rectangle.
    pub fn client_rect(&self) -> ClientRect {
        self.rect
    }

    /// Client coordinates to normalized device coordinates (`[-1, 1]`,
    /// +Y up).
    pub fn to_ndc(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        let r = &self.rect;
        Vec2::new(
            (screen_x - r.left) / r.width * 2.0 - 1.0,
            -(screen_y - r.top) / r.height * 2.0 + 1.0,
        )
    }

    /// Whether the projection changed since the last call; clears the flag.
    pub fn take_projection_dirty(&mut self) -> bool {
        std::mem::take(&mut self.projection_dirty)
    }
}
