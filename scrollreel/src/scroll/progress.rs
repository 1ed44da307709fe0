use crate::foundation::core::{Rect, Viewport};
use crate::foundation::math::clamp01;

/// Normalized scroll position of a scrollable region, in `[0, 1]`.
///
/// Tracks position, not time: scrolling back up decreases it.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ScrollProgress(f64);

impl ScrollProgress {
    /// Progress through a whole document: `scroll_top / (content_height - viewport_height)`.
    pub fn document(scroll_top: f64, content_height: f64, viewport_height: f64) -> Self {
        Self::from_offset(scroll_top, content_height - viewport_height)
    }

    /// Progress through a pinned section from its bounding rect top and height.
    ///
    /// `0` when the section top reaches the viewport top, `1` when its bottom reaches the
    /// viewport bottom.
    pub fn section(rect_top: f64, rect_height: f64, viewport_height: f64) -> Self {
        Self::from_offset(-rect_top, rect_height - viewport_height)
    }

    /// Document progress for a viewport snapshot.
    pub fn of_viewport(viewport: &Viewport) -> Self {
        Self::document(
            viewport.scroll_top,
            viewport.content_height,
            viewport.height(),
        )
    }

    /// Wrap an already-normalized value, clamping it into range.
    pub fn new(value: f64) -> Self {
        Self(clamp01(value))
    }

    /// Raw value in `[0, 1]`.
    pub fn value(self) -> f64 {
        self.0
    }

    fn from_offset(offset: f64, range: f64) -> Self {
        if !offset.is_finite() || !range.is_finite() {
            return Self(0.0);
        }
        // Nothing to scroll through: step once the region has been passed.
        if range <= 0.0 {
            return Self(if offset > 0.0 { 1.0 } else { 0.0 });
        }
        Self(clamp01(offset / range))
    }
}

impl From<ScrollProgress> for f64 {
    fn from(p: ScrollProgress) -> Self {
        p.0
    }
}

/// Index of the block straddling the viewport's vertical center.
///
/// Block rects are in viewport coordinates. When several straddle the center the last one
/// wins; when none does the first block (`0`) is reported.
pub fn focused_index(blocks: &[Rect], viewport_height: f64) -> usize {
    let center = viewport_height / 2.0;
    blocks
        .iter()
        .enumerate()
        .filter(|(_, r)| r.y0 < center && r.y1 > center)
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
