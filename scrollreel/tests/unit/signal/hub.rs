use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn counter() -> (Arc<AtomicUsize>, impl FnMut(&u32) + Send + 'static) {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    (hits, move |_: &u32| {
        h.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn publish_fans_out_to_all_subscribers() {
    let hub = SignalHub::<u32>::new();
    let (a_hits, a) = counter();
    let (b_hits, b) = counter();
    let _sa = hub.subscribe(a);
    let _sb = hub.subscribe(b);
    hub.publish(1);
    hub.publish(2);
    assert_eq!(a_hits.load(Ordering::SeqCst), 2);
    assert_eq!(b_hits.load(Ordering::SeqCst), 2);
}

#[test]
fn dropping_subscription_deregisters() {
    let hub = SignalHub::<u32>::new();
    let (hits, cb) = counter();
    let sub = hub.subscribe(cb);
    assert_eq!(hub.subscriber_count(), 1);
    assert!(sub.is_active());
    drop(sub);
    assert_eq!(hub.subscriber_count(), 0);
    hub.publish(5);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn remounting_views_do_not_accumulate_handlers() {
    let hub = SignalHub::<u32>::new();
    for _ in 0..10 {
        let (_, cb) = counter();
        let sub = hub.subscribe(cb);
        sub.unsubscribe();
    }
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn late_subscriber_receives_latest_value() {
    let hub = SignalHub::<u32>::new();
    hub.publish(7);
    let seen = Arc::new(AtomicUsize::new(0));
    let s = Arc::clone(&seen);
    let _sub = hub.subscribe(move |v: &u32| {
        s.store(*v as usize, Ordering::SeqCst);
    });
    assert_eq!(seen.load(Ordering::SeqCst), 7);
    assert_eq!(hub.latest(), Some(7));
}

#[test]
fn subscription_outliving_hub_is_inert() {
    let hub = SignalHub::<u32>::new();
    let (_, cb) = counter();
    let sub = hub.subscribe(cb);
    drop(hub);
    assert!(!sub.is_active());
    drop(sub);
}

#[test]
fn viewport_signal_carries_snapshots() {
    let hub = ViewportSignal::new();
    let mut vp = Viewport::new(800.0, 600.0).unwrap();
    vp.scroll_top = 120.0;
    hub.publish(vp);
    assert_eq!(hub.latest().unwrap().scroll_top, 120.0);
}

#[test]
fn callback_may_publish_to_its_own_hub() {
    let hub = SignalHub::<u32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let h2 = hub.clone();
    let s = Arc::clone(&seen);
    let _clamp = hub.subscribe(move |v: &u32| {
        s.lock().push(*v);
        if *v > 10 {
            h2.publish(10);
        }
    });
    let (other_hits, other) = counter();
    let _other = hub.subscribe(other);

    let (tx, rx) = std::sync::mpsc::channel();
    let hub2 = hub.clone();
    std::thread::spawn(move || {
        hub2.publish(42);
        tx.send(()).unwrap();
    });
    rx.recv_timeout(std::time::Duration::from_secs(5))
        .expect("publish from inside a callback must not block");

    assert_eq!(*seen.lock(), vec![42, 10]);
    assert_eq!(other_hits.load(Ordering::SeqCst), 2);
    assert_eq!(hub.latest(), Some(10));
}

#[test]
fn replayed_value_may_trigger_a_publish() {
    let hub = SignalHub::<u32>::new();
    hub.publish(3);
    let h2 = hub.clone();
    let _sub = hub.subscribe(move |v: &u32| {
        if *v == 3 {
            h2.publish(4);
        }
    });
    assert_eq!(hub.latest(), Some(4));
}

#[test]
fn panicking_callback_does_not_wedge_the_hub() {
    let hub = SignalHub::<u32>::new();
    let bomb = hub.subscribe(|v: &u32| {
        if *v == 1 {
            panic!("boom");
        }
    });
    let h = hub.clone();
    assert!(std::thread::spawn(move || h.publish(1)).join().is_err());
    drop(bomb);

    let (hits, cb) = counter();
    let _sub = hub.subscribe(cb);
    hub.publish(2);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
