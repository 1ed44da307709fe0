//! Hero intro: a timed boot sequence that reveals the title layers one by one, plus the
//! magnetic pull of the call-to-action button.

use crate::foundation::core::{Point, Rect, Vec2};

/// Stage of the hero intro, in the order they are reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootStep {
    /// Black screen.
    Void,
    /// Dust starts drifting.
    Atmosphere,
    /// Flash and title slam.
    Impact,
    /// Version mark flickers on.
    Ignition,
    /// Looping shine on the title.
    Perpetual,
    /// Subtitle and buttons fade in.
    UiReveal,
}

impl BootStep {
    /// Every step with the delay after mount at which it begins.
    pub const SCHEDULE: [(BootStep, f64); 6] = [
        (BootStep::Void, 0.0),
        (BootStep::Atmosphere, 500.0),
        (BootStep::Impact, 1500.0),
        (BootStep::Ignition, 2200.0),
        (BootStep::Perpetual, 2800.0),
        (BootStep::UiReveal, 3200.0),
    ];

    /// Delay after mount at which this step begins.
    pub fn starts_at_ms(self) -> f64 {
        Self::SCHEDULE
            .iter()
            .find(|(step, _)| *step == self)
            .map_or(0.0, |(_, at)| *at)
    }
}

/// Which hero layers are shown at a given step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct HeroLayers {
    /// Dust canvas and the eyebrow line.
    pub dust: bool,
    /// Impact flash overlay; only during [`BootStep::Impact`].
    pub flash: bool,
    /// Title and background lights.
    pub title: bool,
    /// Version mark.
    pub version: bool,
    /// Looping title shine.
    pub shine: bool,
    /// Subtitle and buttons.
    pub ui: bool,
}

impl From<BootStep> for HeroLayers {
    fn from(step: BootStep) -> Self {
        Self {
            dust: step >= BootStep::Atmosphere,
            flash: step == BootStep::Impact,
            title: step >= BootStep::Impact,
            version: step >= BootStep::Ignition,
            shine: step >= BootStep::Perpetual,
            ui: step >= BootStep::UiReveal,
        }
    }
}

/// Boot schedule anchored at the hero's mount time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BootSequence {
    mounted_at_ms: f64,
}

impl BootSequence {
    /// Sequence for a hero mounted at `mounted_at_ms`.
    pub fn new(mounted_at_ms: f64) -> Self {
        Self { mounted_at_ms }
    }

    /// Step reached at `now_ms`. Times before mount, and NaN, read as [`BootStep::Void`].
    pub fn step(&self, now_ms: f64) -> BootStep {
        let elapsed = now_ms - self.mounted_at_ms;
        BootStep::SCHEDULE
            .iter()
            .rev()
            .find(|(_, at)| elapsed >= *at)
            .map_or(BootStep::Void, |(step, _)| *step)
    }

    /// Layers visible at `now_ms`.
    pub fn layers(&self, now_ms: f64) -> HeroLayers {
        self.step(now_ms).into()
    }

    /// Absolute time of the next step change after `now_ms`, or `None` once fully revealed.
    pub fn next_change_ms(&self, now_ms: f64) -> Option<f64> {
        let elapsed = now_ms - self.mounted_at_ms;
        BootStep::SCHEDULE
            .iter()
            .find(|(_, at)| *at > elapsed)
            .map(|(_, at)| self.mounted_at_ms + at)
    }
}

/// Share of the pointer's distance from the button center that the button follows.
pub const MAGNETIC_PULL: f64 = 0.15;

/// Offset that draws a button at `target` toward `pointer`. Reset to zero when the pointer
/// leaves the button.
pub fn magnetic_offset(pointer: Point, target: Rect) -> Vec2 {
    (pointer - target.center()) * MAGNETIC_PULL
}

#[cfg(test)]
#[path = "../../tests/unit/effects/hero.rs"]
mod tests;
