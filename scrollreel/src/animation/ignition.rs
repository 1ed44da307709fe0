//! Ignition sequence: the pinned "decision" section that goes dark, flares, flashes white and
//! reveals an identity title before three narrative blocks slide in.
//!
//! Everything is derived from one [`Timeline`] over section progress plus a nested content
//! timeline evaluated on the `content` phase's local progress.

use crate::animation::ease::Ease;
use crate::animation::timeline::{Phase, Timeline};
use crate::foundation::math::clamp01;

/// Section progress above which the navigation bar switches to its light theme.
pub const LIGHT_THEME_THRESHOLD: f64 = 0.39;

const FLARE_MAX_WIDTH: f64 = 150.0;
const SPHERE_MAX_SCALE: f64 = 150.0;
const TITLE_MAX_BLUR_PX: f64 = 40.0;
const TITLE_MAX_SPACING_EM: f64 = 2.0;
const BLOCK_TRAVEL_PX: f64 = 100.0;

/// Phase tables for the ignition sequence.
#[derive(Clone, Debug)]
pub struct Ignition {
    outer: Timeline,
    content: Timeline,
}

impl Default for Ignition {
    fn default() -> Self {
        Self::new()
    }
}

impl Ignition {
    /// Build the built-in phase tables.
    pub fn new() -> Self {
        let outer = Timeline::new_unchecked(vec![
            Phase::new("void", 0.0, 0.15),
            Phase::new("flare", 0.15, 0.25),
            Phase::new("flare_in", 0.15, 0.20),
            Phase::new("flare_out", 0.25, 0.35),
            Phase::new("light", 0.20, 0.40).with_ease(Ease::InExpo),
            Phase::new("flash_in", 0.38, 0.40),
            Phase::new("flash_out", 0.40, 0.45),
            Phase::new("identity_in", 0.35, 0.45),
            Phase::new("identity_out", 0.50, 0.60),
            Phase::new("content", 0.60, 1.0),
        ]);
        let content = Timeline::new_unchecked(vec![
            Phase::new("block1", 0.0, 0.2),
            Phase::new("block2", 0.2, 0.5),
            Phase::new("block3", 0.5, 0.8),
        ]);
        Self { outer, content }
    }

    /// Outer phase table over section progress.
    pub fn timeline(&self) -> &Timeline {
        &self.outer
    }

    /// Nested phase table over the `content` phase's local progress.
    pub fn content_timeline(&self) -> &Timeline {
        &self.content
    }

    /// Derive every visual parameter at section `progress`.
    pub fn frame(&self, progress: f64) -> IgnitionFrame {
        let v = self.outer.evaluate(progress);
        let c = self.content.evaluate(v.value("content"));
        let identity_in = v.value("identity_in");

        let block = |name: &str| {
            let t = c.value(name);
            BlockState {
                opacity: t,
                offset_y: BLOCK_TRAVEL_PX - t * BLOCK_TRAVEL_PX,
            }
        };

        IgnitionFrame {
            progress: clamp01(progress),
            void_opacity: v.value("void"),
            flare_width: v.value("flare") * FLARE_MAX_WIDTH,
            flare_opacity: v.pulse("flare_in", "flare_out"),
            sphere_scale: v.value("light") * SPHERE_MAX_SCALE,
            flash_opacity: v.pulse("flash_in", "flash_out"),
            backdrop_opacity: v.value("flash_in"),
            identity_opacity: v.pulse("identity_in", "identity_out"),
            title_blur_px: (1.0 - identity_in) * TITLE_MAX_BLUR_PX,
            title_scale: 2.0 - identity_in,
            title_spacing_em: (1.0 - identity_in) * TITLE_MAX_SPACING_EM,
            blocks: [block("block1"), block("block2"), block("block3")],
        }
    }
}

/// Opacity and vertical offset of one narrative block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BlockState {
    /// Block opacity in `[0, 1]`.
    pub opacity: f64,
    /// Downward offset in pixels; `0` once fully revealed.
    pub offset_y: f64,
}

/// Visual parameters of the ignition sequence at one progress value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IgnitionFrame {
    /// Clamped section progress this frame was derived from.
    pub progress: f64,
    /// Darkening overlay opacity.
    pub void_opacity: f64,
    /// Anamorphic flare width in viewport-width percent.
    pub flare_width: f64,
    /// Flare opacity (rises then falls).
    pub flare_opacity: f64,
    /// Light sphere scale factor.
    pub sphere_scale: f64,
    /// Impact flash opacity.
    pub flash_opacity: f64,
    /// Solid backdrop opacity; stays at 1 once the flash has landed.
    pub backdrop_opacity: f64,
    /// Identity title opacity.
    pub identity_opacity: f64,
    /// Title blur radius.
    pub title_blur_px: f64,
    /// Title scale factor (2 shrinking to 1).
    pub title_scale: f64,
    /// Title letter spacing.
    pub title_spacing_em: f64,
    /// Narrative blocks, top to bottom.
    pub blocks: [BlockState; 3],
}

impl IgnitionFrame {
    /// Convenience wrapper building the default tables for a single evaluation.
    pub fn at(progress: f64) -> Self {
        Ignition::new().frame(progress)
    }

    /// Whether the navigation bar should use its light theme.
    pub fn light_theme(&self) -> bool {
        self.progress > LIGHT_THEME_THRESHOLD
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ignition.rs"]
mod tests;
