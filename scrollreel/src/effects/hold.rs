use crate::animation::ease::Ease;
use crate::config::HoldConfig;
use crate::foundation::error::ReelResult;
use crate::foundation::math::lerp;

/// Level at which the meter unlocks.
pub const UNLOCK_LEVEL: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum HoldPhase {
    Idle,
    Filling { started_ms: f64, from: f64 },
    Decaying,
    Unlocked,
}

/// Hold-to-unlock ring.
///
/// While held the level eases out from wherever it is to [`UNLOCK_LEVEL`]; once released it
/// drains by a fixed amount per frame. Reaching full unlocks, after which input is ignored until
/// [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub struct HoldMeter {
    config: HoldConfig,
    level: f64,
    phase: HoldPhase,
}

impl HoldMeter {
    /// Empty, locked meter.
    pub fn new(config: HoldConfig) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            level: 0.0,
            phase: HoldPhase::Idle,
        })
    }

    /// Current level in `0..=100`.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Filled at least once since the last reset.
    pub fn is_unlocked(&self) -> bool {
        self.phase == HoldPhase::Unlocked
    }

    /// Currently filling.
    pub fn is_holding(&self) -> bool {
        matches!(self.phase, HoldPhase::Filling { .. })
    }

    /// Press started at `now_ms`. Ignored when unlocked or already held.
    pub fn start_hold(&mut self, now_ms: f64) {
        if self.is_unlocked() || self.is_holding() {
            return;
        }
        self.phase = HoldPhase::Filling {
            started_ms: now_ms,
            from: self.level,
        };
    }

    /// Press released. Drains one step immediately.
    pub fn release(&mut self) {
        if self.is_unlocked() {
            return;
        }
        self.phase = HoldPhase::Decaying;
        self.decay_step();
    }

    /// Advance one frame and return the new level.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        match self.phase {
            HoldPhase::Filling { started_ms, from } => {
                let linear = ((now_ms - started_ms) / self.config.fill_duration_ms).clamp(0.0, 1.0);
                self.level = lerp(from, UNLOCK_LEVEL, Ease::OutQuad.apply(linear));
                if linear >= 1.0 {
                    self.level = UNLOCK_LEVEL;
                    self.phase = HoldPhase::Unlocked;
                    tracing::debug!("hold meter unlocked");
                }
            }
            HoldPhase::Decaying => self.decay_step(),
            HoldPhase::Idle | HoldPhase::Unlocked => {}
        }
        self.level
    }

    /// Back to empty and locked.
    pub fn reset(&mut self) {
        self.level = 0.0;
        self.phase = HoldPhase::Idle;
    }

    fn decay_step(&mut self) {
        if self.level <= self.config.snap_below {
            self.level = 0.0;
            self.phase = HoldPhase::Idle;
        } else {
            self.level = (self.level - self.config.decay_per_frame).max(0.0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/hold.rs"]
mod tests;
