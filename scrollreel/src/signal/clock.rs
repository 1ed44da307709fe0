use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Whether a frame callback wants to keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Run again on the next frame.
    Continue,
    /// Unschedule after this frame.
    Stop,
}

/// Timing information passed to frame callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Timestamp of this frame in milliseconds.
    pub now_ms: f64,
    /// Milliseconds since the previous frame (`0` on the first frame).
    pub delta_ms: f64,
    /// 0-based frame counter.
    pub frame: u64,
}

type EffectFn = Box<dyn FnMut(FrameTick) -> Flow + Send>;

struct Slot {
    id: u64,
    cancelled: Arc<AtomicBool>,
    run: EffectFn,
}

#[derive(Default)]
struct ClockInner {
    next_id: u64,
    slots: Vec<Slot>,
    last_ms: Option<f64>,
    frame: u64,
}

/// Central per-frame driver shared by every time-based effect.
///
/// The host calls [`FrameClock::tick`] once per display frame; effects are scheduled with
/// [`FrameClock::schedule`] and stay scheduled until they return [`Flow::Stop`] or their
/// [`EffectHandle`] is cancelled or dropped.
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Arc<Mutex<ClockInner>>,
}

impl FrameClock {
    /// Create an idle clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `effect` to run from the next tick on.
    pub fn schedule<F>(&self, effect: F) -> EffectHandle
    where
        F: FnMut(FrameTick) -> Flow + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.slots.push(Slot {
            id,
            cancelled: Arc::clone(&cancelled),
            run: Box::new(effect),
        });
        tracing::debug!(id, "frame effect scheduled");
        EffectHandle {
            id,
            cancelled,
            clock: Arc::downgrade(&self.inner),
        }
    }

    /// Advance one frame at `now_ms`, running every live effect once.
    ///
    /// Effects scheduled from inside a callback first run on the following tick.
    pub fn tick(&self, now_ms: f64) -> FrameTick {
        let (tick, mut running) = {
            let mut inner = self.inner.lock();
            let delta_ms = inner
                .last_ms
                .map_or(0.0, |last| (now_ms - last).max(0.0));
            let tick = FrameTick {
                now_ms,
                delta_ms,
                frame: inner.frame,
            };
            inner.last_ms = Some(now_ms);
            inner.frame += 1;
            (tick, std::mem::take(&mut inner.slots))
        };

        running.retain_mut(|slot| {
            if slot.cancelled.load(Ordering::Acquire) {
                return false;
            }
            match (slot.run)(tick) {
                Flow::Continue => true,
                Flow::Stop => {
                    slot.cancelled.store(true, Ordering::Release);
                    false
                }
            }
        });

        // Slots dropped after the lock is released: a callback may own handles to this clock.
        let dropped: Vec<Slot> = {
            let mut inner = self.inner.lock();
            running.append(&mut inner.slots);
            let (dropped, live) = running
                .into_iter()
                .partition(|s| s.cancelled.load(Ordering::Acquire));
            inner.slots = live;
            dropped
        };
        drop(dropped);
        tick
    }

    /// Number of effects that will run on the next tick.
    pub fn active_effects(&self) -> usize {
        self.inner
            .lock()
            .slots
            .iter()
            .filter(|s| !s.cancelled.load(Ordering::Acquire))
            .count()
    }
}

/// Cancellation handle for a scheduled effect; cancels on drop.
#[must_use = "dropping an EffectHandle immediately cancels the effect"]
pub struct EffectHandle {
    id: u64,
    cancelled: Arc<AtomicBool>,
    clock: Weak<Mutex<ClockInner>>,
}

impl EffectHandle {
    /// Whether the effect is still scheduled.
    pub fn is_active(&self) -> bool {
        !self.cancelled.load(Ordering::Acquire) && self.clock.strong_count() > 0
    }

    /// Cancel now. The callback never runs again, even if a tick is in flight.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(clock) = self.clock.upgrade() {
            let removed: Vec<Slot> = {
                let mut inner = clock.lock();
                let (removed, live) = std::mem::take(&mut inner.slots)
                    .into_iter()
                    .partition(|s| s.id == self.id);
                inner.slots = live;
                removed
            };
            drop(removed);
        }
        tracing::debug!(id = self.id, "frame effect cancelled");
    }
}

impl Drop for EffectHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/clock.rs"]
mod tests;
