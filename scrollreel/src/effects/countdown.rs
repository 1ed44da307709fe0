use crate::config::CountdownConfig;
use crate::foundation::error::ReelResult;
use crate::foundation::math::lerp;

/// Display state of the loader at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CountdownFrame {
    /// Milliseconds left, never negative.
    pub remaining_ms: f64,
    /// Completion in `0..=100`.
    pub percent: f64,
    /// Whole seconds shown on the big counter (rounded up).
    pub seconds_left: u32,
    /// Index of the boot-log line currently highlighted.
    pub log_index: usize,
}

impl CountdownFrame {
    /// Frame for `remaining_ms` out of `config.total_ms`.
    ///
    /// A non-positive or non-finite total reads as already finished.
    pub fn at(remaining_ms: f64, config: &CountdownConfig) -> Self {
        let total = config.total_ms;
        if !total.is_finite() || total <= 0.0 {
            return Self {
                remaining_ms: 0.0,
                percent: 100.0,
                seconds_left: 0,
                log_index: config.log_lines.saturating_sub(1),
            };
        }
        let remaining = if remaining_ms.is_nan() {
            total
        } else {
            remaining_ms.clamp(0.0, total)
        };
        let percent = ((total - remaining) / total * 100.0).min(100.0);
        let last = config.log_lines.saturating_sub(1);
        let log_index = ((percent / 100.0 * last as f64).floor() as usize).min(last);
        Self {
            remaining_ms: remaining,
            percent,
            seconds_left: (remaining / 1000.0).ceil() as u32,
            log_index,
        }
    }
}

/// Fixed-length loader countdown. The clock starts on the first tick.
#[derive(Clone, Debug)]
pub struct Countdown {
    config: CountdownConfig,
    started_ms: Option<f64>,
    zero_at_ms: Option<f64>,
}

impl Countdown {
    /// Countdown that has not started yet. Fails if `config` does not validate.
    pub fn new(config: CountdownConfig) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            started_ms: None,
            zero_at_ms: None,
        })
    }

    /// Advance to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> CountdownFrame {
        let started = *self.started_ms.get_or_insert(now_ms);
        let remaining = (self.config.total_ms - (now_ms - started)).max(0.0);
        if remaining <= 0.0 && self.zero_at_ms.is_none() {
            self.zero_at_ms = Some(now_ms);
        }
        CountdownFrame::at(remaining, &self.config)
    }

    /// Reached zero.
    pub fn is_done(&self) -> bool {
        self.zero_at_ms.is_some()
    }

    /// Whether the completion callback should run at `now_ms`.
    pub fn completion_due(&self, now_ms: f64) -> bool {
        self.zero_at_ms
            .is_some_and(|zero| now_ms - zero >= self.config.completion_delay_ms)
    }
}

/// Looping spotlight sweep across headline text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sweep {
    started_ms: f64,
    period_ms: f64,
}

impl Sweep {
    /// Default period: 5 s.
    pub const PERIOD_MS: f64 = 5000.0;
    const FROM: f64 = -20.0;
    const TO: f64 = 120.0;

    /// Sweep starting at `started_ms` with the default period.
    pub fn new(started_ms: f64) -> Self {
        Self {
            started_ms,
            period_ms: Self::PERIOD_MS,
        }
    }

    /// Override the loop length. Non-positive periods fall back to the default.
    pub fn with_period(mut self, period_ms: f64) -> Self {
        if period_ms.is_finite() && period_ms > 0.0 {
            self.period_ms = period_ms;
        }
        self
    }

    /// Loop phase in `[0, 1)`.
    pub fn phase(&self, now_ms: f64) -> f64 {
        let elapsed = now_ms - self.started_ms;
        if !elapsed.is_finite() {
            return 0.0;
        }
        elapsed.rem_euclid(self.period_ms) / self.period_ms
    }

    /// Spotlight center as a percentage of the text width, `-20..120`.
    pub fn position(&self, now_ms: f64) -> f64 {
        lerp(Self::FROM, Self::TO, self.phase(now_ms))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/countdown.rs"]
mod tests;
