use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Line, Point, Rect, Size, Vec2};

/// Snapshot of the page viewport as reported by the UI shell.
///
/// Offsets are in CSS pixels. `scroll_top` is the distance the document has been scrolled
/// down; `content_height` is the full scrollable document height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Visible area size.
    pub size: Size,
    /// Current vertical scroll offset.
    pub scroll_top: f64,
    /// Total document height.
    pub content_height: f64,
    /// Last known pointer position in viewport space, if any.
    pub pointer: Option<Point>,
}

impl Viewport {
    /// Create a validated viewport of the given size, scrolled to the top.
    pub fn new(width: f64, height: f64) -> ReelResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ReelError::validation(
                "viewport width and height must be finite and > 0",
            ));
        }
        Ok(Self {
            size: Size::new(width, height),
            scroll_top: 0.0,
            content_height: height,
            pointer: None,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Viewport rectangle in its own coordinate space (origin at the top-left corner).
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size)
    }

    /// Vertical center line of the viewport.
    pub fn center_y(&self) -> f64 {
        self.size.height / 2.0
    }

    /// Copy with the pointer at `pointer`.
    pub fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }

    /// Pointer mapped to `[-1, 1]` on each axis, `(0, 0)` at the center.
    ///
    /// Positions outside the viewport map outside the range. `None` until a pointer is seen.
    pub fn normalized_pointer(&self) -> Option<Vec2> {
        let p = self.pointer?;
        Some(Vec2::new(
            (p.x / self.size.width - 0.5) * 2.0,
            (p.y / self.size.height - 0.5) * 2.0,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
