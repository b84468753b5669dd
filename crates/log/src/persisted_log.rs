//! PersistedLog: bounded, deduplicating, persisted recency log
//!
//! ## Design Principles
//!
//! 1. **Most-recent-first**: the latest added-or-updated entry is always at
//!    index 0; the tail is the eviction end.
//!
//! 2. **One representative per identity**: an equality predicate decides
//!    whether an incoming entry replaces an existing one (moved to the
//!    front) or is inserted as new. No two stored entries are ever equal
//!    under the predicate.
//!
//! 3. **Best-effort persistence**: every mutation writes the whole sequence
//!    through to the backend; write failures are logged and swallowed. The
//!    in-memory sequence stays authoritative for the session. Absent or
//!    undecodable persisted state loads as an empty log, never an error.
//!
//! ## Concurrency
//!
//! `add` is atomic: the dedup-insert-truncate step runs under one write
//! lock, so concurrent adds never interleave mid-update. Persistence and
//! notification happen after the lock is released, against the snapshot the
//! mutation produced.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use breadcrumb_core::{Error, Limits, Result, StorageBackend, StorageKey};

use crate::notifier::{ChangeNotifier, Replay, Subscription};

/// Default bound on log length, matching the recently-accessed use case
pub const DEFAULT_MAX_LENGTH: usize = 20;

/// Equality predicate deciding entry identity
pub type EqualityFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Configuration for opening a [`PersistedLog`]
///
/// ```
/// use breadcrumb_log::LogConfig;
///
/// let config: LogConfig<String> = LogConfig::new().max_length(5);
/// ```
pub struct LogConfig<T> {
    max_length: usize,
    limits: Limits,
    is_equal: Option<EqualityFn<T>>,
}

impl<T> LogConfig<T> {
    /// Default configuration: `max_length` 20, default limits, structural
    /// equality
    pub fn new() -> Self {
        LogConfig {
            max_length: DEFAULT_MAX_LENGTH,
            limits: Limits::default(),
            is_equal: None,
        }
    }

    /// Set the maximum number of retained entries
    ///
    /// Zero is allowed: every add becomes a no-op that still notifies with
    /// the empty sequence.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Override the size limits
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Supply the deduplication predicate
    ///
    /// The recently-accessed use case passes `|a, b| a.id == b.id`: entries
    /// sharing an id are the same history item, newest fields win.
    pub fn equal_by<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.is_equal = Some(Arc::new(f));
        self
    }
}

impl<T> Default for LogConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for LogConfig<T> {
    fn clone(&self) -> Self {
        LogConfig {
            max_length: self.max_length,
            limits: self.limits.clone(),
            is_equal: self.is_equal.clone(),
        }
    }
}

/// Bounded, deduplicating, persisted log of caller-defined entries
///
/// Entries are opaque to the log beyond being serializable and comparable
/// through the equality predicate. The full sequence is mirrored to one
/// durable slot on every mutation.
///
/// # Example
///
/// ```
/// use breadcrumb_core::{DeploymentContext, StorageKey};
/// use breadcrumb_log::{LogConfig, PersistedLog};
/// use breadcrumb_storage::MemoryBackend;
/// use std::sync::Arc;
///
/// let backend = Arc::new(MemoryBackend::new());
/// let context = DeploymentContext::from_qualifier("/base");
/// let key = StorageKey::derive("recentlyAccessed", &context)?;
///
/// let log: PersistedLog<String> =
///     PersistedLog::open(backend, key, LogConfig::new().max_length(3))?;
/// log.add("dashboard-1".to_string());
/// assert_eq!(log.entries(), vec!["dashboard-1".to_string()]);
/// # Ok::<(), breadcrumb_core::Error>(())
/// ```
pub struct PersistedLog<T> {
    key: StorageKey,
    max_length: usize,
    is_equal: EqualityFn<T>,
    entries: RwLock<Vec<T>>,
    backend: Arc<dyn StorageBackend>,
    notifier: ChangeNotifier<T>,
}

impl<T> PersistedLog<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Open a log under `key`, loading any persisted state
    ///
    /// Uses the configured predicate, falling back to structural equality.
    /// Persisted state that is absent, malformed, or over-length loads as
    /// an empty (or truncated) sequence without error.
    ///
    /// # Errors
    ///
    /// Fails only on invalid configuration: `max_length` above the
    /// `max_log_entries` cap.
    pub fn open(
        backend: Arc<dyn StorageBackend>,
        key: StorageKey,
        config: LogConfig<T>,
    ) -> Result<Self>
    where
        T: PartialEq,
    {
        let is_equal = config
            .is_equal
            .clone()
            .unwrap_or_else(|| Arc::new(|a: &T, b: &T| a == b));
        Self::open_inner(backend, key, config, is_equal)
    }

    /// Open a log with an explicit predicate, for entry types without
    /// `PartialEq`
    ///
    /// # Errors
    ///
    /// Fails only on invalid configuration, as [`PersistedLog::open`].
    pub fn with_equality<F>(
        backend: Arc<dyn StorageBackend>,
        key: StorageKey,
        config: LogConfig<T>,
        is_equal: F,
    ) -> Result<Self>
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self::open_inner(backend, key, config, Arc::new(is_equal))
    }

    fn open_inner(
        backend: Arc<dyn StorageBackend>,
        key: StorageKey,
        config: LogConfig<T>,
        is_equal: EqualityFn<T>,
    ) -> Result<Self> {
        if config.max_length > config.limits.max_log_entries {
            return Err(Error::InvalidConfig(format!(
                "max_length {} exceeds cap of {} entries",
                config.max_length, config.limits.max_log_entries
            )));
        }

        let mut entries = Self::load(backend.as_ref(), &key);
        entries.truncate(config.max_length);
        tracing::debug!(key = %key, len = entries.len(), "opened persisted log");

        Ok(PersistedLog {
            key,
            max_length: config.max_length,
            is_equal,
            notifier: ChangeNotifier::new(entries.clone()),
            entries: RwLock::new(entries),
            backend,
        })
    }

    /// Read the persisted sequence, tolerating every failure mode
    fn load(backend: &dyn StorageBackend, key: &StorageKey) -> Vec<T> {
        let bytes = match backend.read(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read persisted log; starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "persisted log undecodable; starting empty");
                Vec::new()
            }
        }
    }

    /// Add an entry, moving any policy-equal existing entry to the front
    ///
    /// Removes the first entry equal to `entry` under the predicate, inserts
    /// `entry` at index 0, truncates to `max_length`, persists the whole
    /// sequence (best-effort), and notifies subscribers. Infallible by
    /// contract: persistence failures are swallowed and the in-memory
    /// sequence remains authoritative.
    ///
    /// Adding an entry equal to the current head still moves it to the head,
    /// re-persists, and re-notifies; callers refresh any timestamps inside
    /// the entry before the call.
    pub fn add(&self, entry: T) {
        let snapshot = {
            let mut entries = self.entries.write();
            if let Some(pos) = entries.iter().position(|e| (self.is_equal)(e, &entry)) {
                entries.remove(pos);
            }
            if self.max_length > 0 {
                entries.insert(0, entry);
                entries.truncate(self.max_length);
            }
            entries.clone()
        };

        self.persist(&snapshot);
        self.notifier.broadcast(&snapshot);
    }

    /// Write-through mirror of the current sequence, best-effort
    fn persist(&self, entries: &[T]) {
        let bytes = match serde_json::to_vec(entries) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to serialize log; keeping in-memory state");
                return;
            }
        };
        if let Err(e) = self.backend.write(&self.key, &bytes) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist log; keeping in-memory state");
        }
    }

    /// The current sequence, most-recent-first (defensive copy)
    ///
    /// Never touches persistence.
    pub fn entries(&self) -> Vec<T> {
        self.entries.read().clone()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the log holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// The configured bound
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The storage key this log persists under
    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    /// Observe future sequences, one emission per `add`, in call order
    pub fn subscribe<F>(&self, f: F) -> Subscription<T>
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        self.notifier.subscribe(Replay::UpdatesOnly, f)
    }

    /// Observe the current sequence immediately, then every future one
    pub fn subscribe_latest<F>(&self, f: F) -> Subscription<T>
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        self.notifier.subscribe(Replay::Latest, f)
    }
}
