//! Core traits for the persistence seam
//!
//! This module defines the [`StorageBackend`] trait that enables swapping the
//! durable slot store (in-memory, on-disk, browser-origin storage behind FFI)
//! without touching the log layer.

use crate::error::Result;
use crate::key::StorageKey;

/// Durable key-value slot storage
///
/// Each log persists its whole serialized sequence under a single
/// [`StorageKey`]. Backends hold opaque bytes; serialization is the log
/// layer's concern.
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Concurrent writers to the same
/// slot across processes are not coordinated; the storage layer is
/// last-write-wins.
pub trait StorageBackend: Send + Sync {
    /// Read the bytes stored under `key`
    ///
    /// Returns `None` if the slot has never been written or was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or read.
    fn read(&self, key: &StorageKey) -> Result<Option<Vec<u8>>>;

    /// Write `bytes` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or exceeds the backend's slot
    /// size cap (the quota-exceeded case).
    fn write(&self, key: &StorageKey, bytes: &[u8]) -> Result<()>;

    /// Remove the slot under `key`
    ///
    /// Removing an absent slot is not an error. This is the seam for
    /// external "clear history" collaborators; logs never remove their
    /// own slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot complete the removal.
    fn remove(&self, key: &StorageKey) -> Result<()>;
}
