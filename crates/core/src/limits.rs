//! Size limits for keys, logs, and persisted slots
//!
//! This module defines configurable size limits enforced at construction time
//! (log length, key length) and at write time (slot size). Construction-time
//! violations fail fast; write-time violations surface as storage errors that
//! the log layer swallows per its best-effort contract.

/// Size limits for breadcrumb logs and their storage slots
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum storage key length in bytes (default: 512)
    pub max_key_bytes: usize,

    /// Maximum configurable log length in entries (default: 10,000)
    ///
    /// A cap on `max_length`, not a storage bound. A log asking for more
    /// than this is almost certainly a programmer error.
    pub max_log_entries: usize,

    /// Maximum serialized slot size in bytes (default: 5MB)
    ///
    /// Mirrors the quota of browser per-origin storage. Backends reject
    /// larger writes with a storage error.
    pub max_slot_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_key_bytes: 512,
            max_log_entries: 10_000,
            max_slot_bytes: 5 * 1024 * 1024, // 5MB
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// Useful for unit tests that exercise limit enforcement without
    /// building large values.
    pub fn with_small_limits() -> Self {
        Limits {
            max_key_bytes: 32,
            max_log_entries: 8,
            max_slot_bytes: 256,
        }
    }
}
