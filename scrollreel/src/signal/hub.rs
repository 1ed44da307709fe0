use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::foundation::core::Viewport;

type Callback<T> = Arc<Mutex<Box<dyn FnMut(&T) + Send>>>;

struct HubInner<T> {
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
    latest: Option<T>,
    // Set while one caller is running callbacks; publishes made meanwhile wait in `pending`.
    delivering: bool,
    pending: VecDeque<T>,
}

/// Shared source for one global signal with subscriber fan-out.
///
/// One hub replaces N independent listeners on the same global event. Each subscription is a
/// scoped acquisition: dropping the returned [`Subscription`] deregisters the callback.
pub struct SignalHub<T> {
    inner: Arc<Mutex<HubInner<T>>>,
}

/// Viewport scroll/resize/pointer signal.
pub type ViewportSignal = SignalHub<Viewport>;

impl<T> Clone for SignalHub<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Default for SignalHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> SignalHub<T> {
    /// Create a hub with no subscribers and no published value.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                next_id: 0,
                subscribers: Vec::new(),
                latest: None,
                delivering: false,
                pending: VecDeque::new(),
            })),
        }
    }

    /// Register `callback`. If a value was already published it is delivered immediately, so
    /// a freshly mounted view starts from the current state.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: FnMut(&T) + Send + 'static,
    {
        let cb: Callback<T> = Arc::new(Mutex::new(Box::new(callback)));
        let (id, latest, owns_delivery) = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Arc::clone(&cb)));
            let owns = inner.latest.is_some() && !inner.delivering;
            if owns {
                inner.delivering = true;
            }
            (id, inner.latest.clone(), owns)
        };
        if let Some(v) = latest {
            let _reset = owns_delivery.then(|| DeliveryReset(&self.inner));
            (cb.lock())(&v);
            if owns_delivery && let Some(next) = self.finish_round() {
                self.deliver(next);
            }
        }
        tracing::debug!(id, "signal subscriber registered");
        Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Record `value` as the latest and deliver it to every live subscriber.
    ///
    /// Callbacks run outside the hub lock, so they may subscribe, drop subscriptions or publish
    /// again. A value published while a delivery is in progress (from a callback or another
    /// thread) is queued and delivered, in order, once the current round finishes.
    pub fn publish(&self, value: T) {
        {
            let mut inner = self.inner.lock();
            inner.latest = Some(value.clone());
            if inner.delivering {
                inner.pending.push_back(value);
                return;
            }
            inner.delivering = true;
        }
        self.deliver(value);
    }

    // Caller holds the delivery flag.
    fn deliver(&self, first: T) {
        let _reset = DeliveryReset(&self.inner);
        let mut next = Some(first);
        while let Some(value) = next {
            let targets: Vec<Callback<T>> = self
                .inner
                .lock()
                .subscribers
                .iter()
                .map(|(_, cb)| Arc::clone(cb))
                .collect();
            for cb in targets {
                (cb.lock())(&value);
            }
            next = self.finish_round();
        }
    }

    /// Next queued value, or release the delivery flag when the queue is empty.
    fn finish_round(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        let next = inner.pending.pop_front();
        if next.is_none() {
            inner.delivering = false;
        }
        next
    }

    /// Most recently published value.
    pub fn latest(&self) -> Option<T> {
        self.inner.lock().latest.clone()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}

/// Releases the delivery flag if a callback panics mid-delivery.
struct DeliveryReset<'a, T>(&'a Mutex<HubInner<T>>);

impl<T> Drop for DeliveryReset<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut inner = self.0.lock();
            inner.delivering = false;
            inner.pending.clear();
        }
    }
}

/// Registration guard returned by [`SignalHub::subscribe`]; deregisters on drop.
#[must_use = "dropping a Subscription immediately deregisters its callback"]
pub struct Subscription<T> {
    id: u64,
    hub: Weak<Mutex<HubInner<T>>>,
}

impl<T> Subscription<T> {
    /// Whether the callback is still registered with a live hub.
    pub fn is_active(&self) -> bool {
        self.hub
            .upgrade()
            .is_some_and(|h| h.lock().subscribers.iter().any(|(id, _)| *id == self.id))
    }

    /// Deregister now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            let removed: Vec<(u64, Callback<T>)> = {
                let mut inner = hub.lock();
                let (removed, live) = std::mem::take(&mut inner.subscribers)
                    .into_iter()
                    .partition(|(id, _)| *id == self.id);
                inner.subscribers = live;
                removed
            };
            drop(removed);
            tracing::debug!(id = self.id, "signal subscriber released");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/hub.rs"]
mod tests;
