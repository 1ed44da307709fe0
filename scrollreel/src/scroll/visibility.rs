use crate::foundation::core::Rect;

/// Margins applied to the observation root before intersecting; negative values shrink it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RootMargin {
    /// Top margin in pixels.
    pub top: f64,
    /// Right margin in pixels.
    pub right: f64,
    /// Bottom margin in pixels.
    pub bottom: f64,
    /// Left margin in pixels.
    pub left: f64,
}

impl RootMargin {
    /// Margin affecting only the bottom edge.
    pub fn bottom(px: f64) -> Self {
        Self {
            bottom: px,
            ..Self::default()
        }
    }

    fn apply(self, root: Rect) -> Rect {
        Rect::new(
            root.x0 - self.left,
            root.y0 - self.top,
            root.x1 + self.right,
            root.y1 + self.bottom,
        )
    }
}

/// Fraction of `target`'s area visible inside `root` grown by `margin`.
///
/// A zero-area target counts as fully visible while it touches the root.
pub fn intersection_ratio(target: Rect, root: Rect, margin: RootMargin) -> f64 {
    let root = margin.apply(root);
    let area = target.area();
    let clipped = target.intersect(root);
    let touches = target.x0 <= root.x1
        && target.x1 >= root.x0
        && target.y0 <= root.y1
        && target.y1 >= root.y0;
    if area <= 0.0 {
        return if touches { 1.0 } else { 0.0 };
    }
    if !touches {
        return 0.0;
    }
    (clipped.area() / area).clamp(0.0, 1.0)
}

/// Visibility transition reported by [`VisibilityTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// The target crossed the threshold into view.
    Entered,
    /// The target dropped below the threshold.
    Left {
        /// `true` when the target left through the top edge (scrolled past).
        above: bool,
    },
}

/// Threshold crossing detector for one observed target.
///
/// Emits events on transitions only. In `once` mode the tracker stops observing after the
/// first [`VisibilityEvent::Entered`].
#[derive(Clone, Debug)]
pub struct VisibilityTracker {
    threshold: f64,
    margin: RootMargin,
    once: bool,
    visible: bool,
    done: bool,
}

impl VisibilityTracker {
    /// Track with the given visible-area `threshold` in `[0, 1]`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: if threshold.is_finite() {
                threshold.clamp(0.0, 1.0)
            } else {
                0.0
            },
            margin: RootMargin::default(),
            once: false,
            visible: false,
            done: false,
        }
    }

    /// Apply a root margin.
    pub fn with_margin(mut self, margin: RootMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Stop observing after the first entry.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Whether the target is currently considered visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a `once` tracker has fired and stopped observing.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed the latest target and root rects; returns a transition if one happened.
    pub fn observe(&mut self, target: Rect, root: Rect) -> Option<VisibilityEvent> {
        if self.done {
            return None;
        }
        let ratio = intersection_ratio(target, root, self.margin);
        let now_visible = if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        };

        match (self.visible, now_visible) {
            (false, true) => {
                self.visible = true;
                if self.once {
                    self.done = true;
                }
                Some(VisibilityEvent::Entered)
            }
            (true, false) => {
                self.visible = false;
                Some(VisibilityEvent::Left {
                    above: target.y0 < root.y0,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/visibility.rs"]
mod tests;
