//! Named-log registry
//!
//! An explicit map from logical name to log handle, owned by the composing
//! application and passed to consumers. Replaces the ambient
//! one-instance-per-name global that history trackers tend to grow:
//! construction happens in one place, consumers hold `Arc` handles.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use breadcrumb_core::{DeploymentContext, Result, StorageBackend, StorageKey};

use crate::persisted_log::{LogConfig, PersistedLog};

/// Registry of persisted logs sharing one backend and deployment context
///
/// Keys are derived once per logical name at first open and reused for the
/// registry's lifetime. Within one runtime context, at most one log instance
/// owns a given derived key.
pub struct LogRegistry<T> {
    backend: Arc<dyn StorageBackend>,
    context: DeploymentContext,
    logs: RwLock<HashMap<String, Arc<PersistedLog<T>>>>,
}

impl<T> LogRegistry<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a registry over `backend`, scoped to `context`
    pub fn new(backend: Arc<dyn StorageBackend>, context: DeploymentContext) -> Self {
        LogRegistry {
            backend,
            context,
            logs: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the log registered under `name`, opening it on first use
    ///
    /// `config` applies only when this call performs the open; later calls
    /// return the existing handle unchanged.
    ///
    /// # Errors
    ///
    /// Fails on an invalid logical name or invalid configuration.
    pub fn get_or_open(&self, name: &str, config: LogConfig<T>) -> Result<Arc<PersistedLog<T>>>
    where
        T: PartialEq,
    {
        if let Some(log) = self.logs.read().get(name) {
            return Ok(log.clone());
        }

        let key = StorageKey::derive(name, &self.context)?;
        let mut logs = self.logs.write();
        // Re-check under the write lock; another caller may have opened it
        if let Some(log) = logs.get(name) {
            return Ok(log.clone());
        }
        let log = Arc::new(PersistedLog::open(self.backend.clone(), key, config)?);
        logs.insert(name.to_string(), log.clone());
        Ok(log)
    }

    /// Fetch the log registered under `name`, if already open
    pub fn get(&self, name: &str) -> Option<Arc<PersistedLog<T>>> {
        self.logs.read().get(name).cloned()
    }

    /// Drop the handle for `name` and remove its persisted slot
    ///
    /// The external "clear history" collaborator. A handle still held
    /// elsewhere keeps its in-memory sequence and re-persists on its next
    /// add; the storage layer stays last-write-wins.
    ///
    /// # Errors
    ///
    /// Fails on an invalid logical name or if the backend cannot remove
    /// the slot.
    pub fn clear(&self, name: &str) -> Result<()> {
        let key = StorageKey::derive(name, &self.context)?;
        self.logs.write().remove(name);
        self.backend.remove(&key)
    }

    /// Names of all currently open logs
    pub fn names(&self) -> Vec<String> {
        self.logs.read().keys().cloned().collect()
    }

    /// The deployment context this registry derives keys from
    pub fn context(&self) -> &DeploymentContext {
        &self.context
    }
}
