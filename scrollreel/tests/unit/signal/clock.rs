use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn counting(hits: &Arc<AtomicUsize>) -> impl FnMut(FrameTick) -> Flow + Send + 'static {
    let h = Arc::clone(hits);
    move |_| {
        h.fetch_add(1, Ordering::SeqCst);
        Flow::Continue
    }
}

#[test]
fn tick_runs_each_effect_once_per_frame() {
    let clock = FrameClock::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let _a = clock.schedule(counting(&hits));
    let _b = clock.schedule(counting(&hits));
    clock.tick(0.0);
    clock.tick(16.0);
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[test]
fn delta_and_frame_counter_advance() {
    let clock = FrameClock::new();
    let first = clock.tick(100.0);
    let second = clock.tick(116.5);
    assert_eq!(first.delta_ms, 0.0);
    assert_eq!(first.frame, 0);
    assert_eq!(second.delta_ms, 16.5);
    assert_eq!(second.frame, 1);
}

#[test]
fn cancelled_effect_never_runs_again() {
    let clock = FrameClock::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let handle = clock.schedule(counting(&hits));
    clock.tick(0.0);
    handle.cancel();
    assert!(!handle.is_active());
    clock.tick(16.0);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(clock.active_effects(), 0);
}

#[test]
fn dropping_handle_cancels() {
    let clock = FrameClock::new();
    let hits = Arc::new(AtomicUsize::new(0));
    {
        let _h = clock.schedule(counting(&hits));
        assert_eq!(clock.active_effects(), 1);
    }
    clock.tick(0.0);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn stop_unschedules_after_frame() {
    let clock = FrameClock::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    let handle = clock.schedule(move |tick| {
        h.fetch_add(1, Ordering::SeqCst);
        if tick.frame >= 2 { Flow::Stop } else { Flow::Continue }
    });
    for i in 0..6 {
        clock.tick(f64::from(i) * 16.0);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert!(!handle.is_active());
}

#[test]
fn effect_scheduled_during_tick_starts_next_frame() {
    let clock = FrameClock::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let inner_clock = clock.clone();
    let inner_hits = Arc::clone(&hits);
    let spawned = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let spawned_in = Arc::clone(&spawned);
    let _outer = clock.schedule(move |tick| {
        if tick.frame == 0 {
            let handle = inner_clock.schedule(counting(&inner_hits));
            spawned_in.lock().push(handle);
        }
        Flow::Continue
    });
    clock.tick(0.0);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    clock.tick(16.0);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(clock.active_effects(), 2);
}
