//! Change notification for persisted logs
//!
//! An explicit observer-list broadcast: callbacks register against a
//! notifier, every mutation fans out the full current sequence to all of
//! them synchronously, in registration order. No reactive-streams
//! machinery; a latest-value cache covers replay-on-subscribe.
//!
//! Subscriptions unregister on drop:
//!
//! ```
//! use breadcrumb_log::notifier::{ChangeNotifier, Replay};
//! use std::sync::{Arc, Mutex};
//!
//! let notifier = ChangeNotifier::new(vec![1u32]);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//!
//! let sub = notifier.subscribe(Replay::Latest, move |items: &[u32]| {
//!     sink.lock().unwrap().push(items.to_vec());
//! });
//! notifier.broadcast(&[2, 1]);
//! drop(sub);
//! notifier.broadcast(&[3, 2, 1]); // not observed
//!
//! assert_eq!(*seen.lock().unwrap(), vec![vec![1], vec![2, 1]]);
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

/// Whether a new subscriber sees the current sequence immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replay {
    /// Emit the latest sequence to the subscriber at registration time
    Latest,
    /// Emit only sequences produced by future mutations
    UpdatesOnly,
}

type ObserverFn<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

struct Inner<T> {
    /// BTreeMap keyed by monotonic id: iteration order == registration order
    observers: Mutex<BTreeMap<u64, ObserverFn<T>>>,
    /// Latest broadcast sequence, for Replay::Latest subscribers
    latest: RwLock<Vec<T>>,
    next_id: AtomicU64,
}

/// Multicast broadcaster of the current entry sequence
///
/// Every registered observer receives every emission, in the order the
/// mutations happened. Emissions are synchronous on the mutating thread;
/// no coalescing or batching.
pub struct ChangeNotifier<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ChangeNotifier<T> {
    fn clone(&self) -> Self {
        ChangeNotifier {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone> ChangeNotifier<T> {
    /// Create a notifier seeded with the current sequence
    ///
    /// Seeding fills the latest-value cache without emitting anything;
    /// there is nobody to emit to yet.
    pub fn new(initial: Vec<T>) -> Self {
        ChangeNotifier {
            inner: Arc::new(Inner {
                observers: Mutex::new(BTreeMap::new()),
                latest: RwLock::new(initial),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register an observer callback
    ///
    /// With [`Replay::Latest`] the callback is invoked immediately with the
    /// current sequence. The returned [`Subscription`] unregisters the
    /// callback when dropped.
    pub fn subscribe<F>(&self, replay: Replay, f: F) -> Subscription<T>
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        let f: ObserverFn<T> = Arc::new(f);
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.observers.lock().insert(id, f.clone());

        if replay == Replay::Latest {
            let latest = self.inner.latest.read().clone();
            f(&latest);
        }

        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Emit `entries` to every observer and refresh the latest-value cache
    ///
    /// Callbacks run outside the observer lock, so an observer may
    /// subscribe or drop subscriptions from within its callback.
    pub fn broadcast(&self, entries: &[T]) {
        *self.inner.latest.write() = entries.to_vec();

        let observers: Vec<ObserverFn<T>> =
            self.inner.observers.lock().values().cloned().collect();
        for observer in observers {
            observer(entries);
        }
    }

    /// The most recently broadcast (or seeded) sequence
    pub fn latest(&self) -> Vec<T> {
        self.inner.latest.read().clone()
    }

    /// Number of live subscriptions
    pub fn observer_count(&self) -> usize {
        self.inner.observers.lock().len()
    }
}

/// Handle to a registered observer; unregisters on drop
pub struct Subscription<T> {
    id: u64,
    inner: Weak<Inner<T>>,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.observers.lock().remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn collector() -> (Arc<StdMutex<Vec<Vec<u32>>>>, impl Fn(&[u32]) + Send + Sync) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |items: &[u32]| {
            sink.lock().unwrap().push(items.to_vec())
        })
    }

    #[test]
    fn test_updates_only_skips_initial() {
        let notifier = ChangeNotifier::new(vec![1]);
        let (seen, cb) = collector();
        let _sub = notifier.subscribe(Replay::UpdatesOnly, cb);

        assert!(seen.lock().unwrap().is_empty());
        notifier.broadcast(&[2, 1]);
        assert_eq!(*seen.lock().unwrap(), vec![vec![2, 1]]);
    }

    #[test]
    fn test_latest_replays_on_subscribe() {
        let notifier = ChangeNotifier::new(vec![1]);
        let (seen, cb) = collector();
        let _sub = notifier.subscribe(Replay::Latest, cb);

        assert_eq!(*seen.lock().unwrap(), vec![vec![1]]);
    }

    #[test]
    fn test_every_observer_sees_every_emission() {
        let notifier = ChangeNotifier::new(Vec::new());
        let (seen_a, cb_a) = collector();
        let (seen_b, cb_b) = collector();
        let _sub_a = notifier.subscribe(Replay::UpdatesOnly, cb_a);
        let _sub_b = notifier.subscribe(Replay::UpdatesOnly, cb_b);

        notifier.broadcast(&[1]);
        notifier.broadcast(&[2, 1]);

        let expected = vec![vec![1], vec![2, 1]];
        assert_eq!(*seen_a.lock().unwrap(), expected);
        assert_eq!(*seen_b.lock().unwrap(), expected);
    }

    #[test]
    fn test_emission_order_matches_broadcast_order() {
        let notifier = ChangeNotifier::new(Vec::new());
        let (seen, cb) = collector();
        let _sub = notifier.subscribe(Replay::UpdatesOnly, cb);

        for i in 1..=5u32 {
            notifier.broadcast(&[i]);
        }
        let emissions = seen.lock().unwrap();
        assert_eq!(emissions.len(), 5);
        for (i, emission) in emissions.iter().enumerate() {
            assert_eq!(emission, &vec![i as u32 + 1]);
        }
    }

    #[test]
    fn test_drop_unsubscribes() {
        let notifier = ChangeNotifier::new(Vec::new());
        let (seen, cb) = collector();
        let sub = notifier.subscribe(Replay::UpdatesOnly, cb);
        assert_eq!(notifier.observer_count(), 1);

        notifier.broadcast(&[1]);
        drop(sub);
        assert_eq!(notifier.observer_count(), 0);

        notifier.broadcast(&[2]);
        assert_eq!(*seen.lock().unwrap(), vec![vec![1]]);
    }

    #[test]
    fn test_latest_cache_tracks_broadcasts() {
        let notifier = ChangeNotifier::new(vec![1]);
        assert_eq!(notifier.latest(), vec![1]);
        notifier.broadcast(&[2, 1]);
        assert_eq!(notifier.latest(), vec![2, 1]);
    }

    #[test]
    fn test_subscribe_from_within_callback() {
        let notifier: ChangeNotifier<u32> = ChangeNotifier::new(Vec::new());
        let notifier2 = notifier.clone();
        let held: Arc<StdMutex<Vec<Subscription<u32>>>> = Arc::new(StdMutex::new(Vec::new()));
        let held2 = held.clone();

        let _sub = notifier.subscribe(Replay::UpdatesOnly, move |_items| {
            let sub = notifier2.subscribe(Replay::UpdatesOnly, |_| {});
            held2.lock().unwrap().push(sub);
        });

        // Must not deadlock
        notifier.broadcast(&[1]);
        assert_eq!(notifier.observer_count(), 2);
    }

    #[test]
    fn test_notifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChangeNotifier<u32>>();
        assert_send_sync::<Subscription<u32>>();
    }
}
