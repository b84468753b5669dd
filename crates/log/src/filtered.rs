//! Read-boundary filtering over a persisted log
//!
//! A decorator that applies an entry predicate to everything read from or
//! emitted by the underlying log, without the log itself knowing. This is
//! how capability-gated views work (e.g. "only entries tagged with a
//! workspace when workspaces are enabled"): the filter lives at the read
//! boundary, the stored sequence stays complete.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::notifier::Subscription;
use crate::persisted_log::PersistedLog;

/// Filtering view over a shared [`PersistedLog`]
///
/// Writes pass through unchanged; reads and emissions drop entries the
/// predicate rejects. Filtered-out entries still occupy log slots and still
/// count against the bound.
pub struct FilteredLog<T> {
    inner: Arc<PersistedLog<T>>,
    filter: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> FilteredLog<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Wrap `inner` with a read-boundary predicate
    pub fn new<F>(inner: Arc<PersistedLog<T>>, filter: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        FilteredLog {
            inner,
            filter: Arc::new(filter),
        }
    }

    /// Add an entry to the underlying log, unfiltered
    pub fn add(&self, entry: T) {
        self.inner.add(entry);
    }

    /// The current sequence with rejected entries dropped
    pub fn entries(&self) -> Vec<T> {
        self.inner
            .entries()
            .into_iter()
            .filter(|e| (self.filter)(e))
            .collect()
    }

    /// Observe future sequences, filtered
    ///
    /// The subscriber still receives one emission per `add`, even when the
    /// filtered view did not change (e.g. the added entry was rejected).
    pub fn subscribe<F>(&self, f: F) -> Subscription<T>
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        let filter = self.filter.clone();
        self.inner.subscribe(move |items: &[T]| {
            let kept: Vec<T> = items.iter().filter(|e| filter(e)).cloned().collect();
            f(&kept);
        })
    }

    /// Observe the current filtered sequence immediately, then every future
    /// one
    pub fn subscribe_latest<F>(&self, f: F) -> Subscription<T>
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        let filter = self.filter.clone();
        self.inner.subscribe_latest(move |items: &[T]| {
            let kept: Vec<T> = items.iter().filter(|e| filter(e)).cloned().collect();
            f(&kept);
        })
    }

    /// The undecorated log
    pub fn inner(&self) -> &Arc<PersistedLog<T>> {
        &self.inner
    }
}
