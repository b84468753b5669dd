//! Persisted log primitive for breadcrumb
//!
//! Provides the bounded, deduplicating, persisted log and its surroundings:
//! - **PersistedLog**: the log store itself, parameterized by an equality
//!   predicate and mirrored to one durable slot
//! - **ChangeNotifier** / **Subscription**: synchronous observer-list
//!   multicast of the current sequence
//! - **FilteredLog**: read-boundary filtering decorator
//! - **LogRegistry**: explicit name-to-log map owned by the composing
//!   application
//!
//! ## Contract
//!
//! After any mutation: length never exceeds the configured bound, at most
//! one entry per identity survives, and index 0 holds the most recently
//! added-or-updated entry. `add` never fails; persistence is best-effort
//! and the in-memory sequence is authoritative for the session.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filtered;
pub mod notifier;
pub mod persisted_log;
pub mod registry;

pub use filtered::FilteredLog;
pub use notifier::{ChangeNotifier, Replay, Subscription};
pub use persisted_log::{EqualityFn, LogConfig, PersistedLog, DEFAULT_MAX_LENGTH};
pub use registry::LogRegistry;
