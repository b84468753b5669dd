//! Breadcrumb - bounded, deduplicating, persisted recency logs
//!
//! Breadcrumb tracks "recently used" histories: an ordered,
//! most-recent-first sequence of caller-defined entries, capped at a fixed
//! length, deduplicated by a pluggable identity predicate, and mirrored to
//! a durable slot on every mutation.
//!
//! # Quick Start
//!
//! ```
//! use breadcrumb::{DeploymentContext, LogConfig, LogRegistry, MemoryBackend};
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct HistoryItem {
//!     id: String,
//!     label: String,
//! }
//!
//! // One registry per runtime context, constructed at startup
//! let backend = Arc::new(MemoryBackend::new());
//! let context = DeploymentContext::from_qualifier("/base-path");
//! let registry: LogRegistry<HistoryItem> = LogRegistry::new(backend, context);
//!
//! // Open a log deduplicated by id
//! let history = registry.get_or_open(
//!     "recentlyAccessed",
//!     LogConfig::new()
//!         .max_length(20)
//!         .equal_by(|a: &HistoryItem, b: &HistoryItem| a.id == b.id),
//! )?;
//!
//! history.add(HistoryItem { id: "1".into(), label: "Dashboard".into() });
//! assert_eq!(history.entries().len(), 1);
//! # Ok::<(), breadcrumb::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `breadcrumb-core`: keys, deployment contexts, limits, errors, and the
//!   `StorageBackend` seam
//! - `breadcrumb-storage`: memory and disk backends
//! - `breadcrumb-log`: the log primitive, change notification, filtering,
//!   and the registry
//!
//! This facade re-exports the public API of all three.

// Re-export the public API from the member crates
pub use breadcrumb_core::{
    validate_name, DeploymentContext, Error, KeyError, Limits, Result, StorageBackend,
    StorageKey, RESERVED_PREFIX,
};
pub use breadcrumb_log::{
    ChangeNotifier, EqualityFn, FilteredLog, LogConfig, LogRegistry, PersistedLog, Replay,
    Subscription, DEFAULT_MAX_LENGTH,
};
pub use breadcrumb_storage::{DiskBackend, MemoryBackend};
