//! In-memory slot storage
//!
//! `HashMap` behind `parking_lot::RwLock`. The stand-in for browser
//! per-origin storage in tests and for purely ephemeral deployments.

use std::collections::HashMap;

use parking_lot::RwLock;

use breadcrumb_core::{Result, StorageBackend, StorageKey};

/// In-memory storage backend
///
/// Thread-safe through `parking_lot::RwLock`. Slots live as long as the
/// backend value itself; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create a new empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Whether no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Drop every slot
    ///
    /// The "clear all history" collaborator operation.
    pub fn clear(&self) {
        self.slots.write().clear();
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &StorageKey) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.read().get(key.as_str()).cloned())
    }

    fn write(&self, key: &StorageKey, bytes: &[u8]) -> Result<()> {
        self.slots
            .write()
            .insert(key.as_str().to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> Result<()> {
        self.slots.write().remove(key.as_str());
        Ok(())
    }
}
