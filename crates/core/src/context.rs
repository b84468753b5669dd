//! Deployment context resolution
//!
//! A [`DeploymentContext`] carries the stable identifier that namespaces
//! storage keys per deployment. It is resolved once at process/session start
//! and cached for the lifetime of every log derived from it.
//!
//! Two resolution paths:
//! - [`DeploymentContext::from_qualifier`]: deterministic hash of a natural
//!   qualifier such as the deployment's base path.
//! - [`DeploymentContext::resolve`]: deployments without a natural qualifier
//!   load (or generate and persist) a UUID under the reserved slot
//!   `_breadcrumb/deployment`.

use crate::key::StorageKey;
use crate::traits::StorageBackend;
use uuid::Uuid;
use xxhash_rust::xxh3::xxh3_64;

/// Reserved slot name holding the persisted deployment identifier
const DEPLOYMENT_SLOT: &str = "deployment";

/// Stable per-deployment identifier used by key derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentContext {
    id: String,
}

impl DeploymentContext {
    /// Build a context from a deployment qualifier (e.g. a base path)
    ///
    /// The identifier is the lowercase hex xxh3-64 of the qualifier bytes.
    /// Deterministic: the same qualifier always yields the same context.
    /// The empty qualifier is valid and hashes like any other.
    pub fn from_qualifier(qualifier: &str) -> Self {
        DeploymentContext {
            id: format!("{:016x}", xxh3_64(qualifier.as_bytes())),
        }
    }

    /// Build a context with a fresh random identifier
    ///
    /// Not persisted anywhere; keys derived from it are unreachable after
    /// the process exits. Useful for tests and throwaway sessions.
    pub fn ephemeral() -> Self {
        DeploymentContext {
            id: Uuid::new_v4().simple().to_string(),
        }
    }

    /// Resolve the deployment identifier from the backend, once
    ///
    /// Loads the UUID persisted under `_breadcrumb/deployment`. On first use
    /// (slot absent or unparsable) a fresh UUID is generated and written
    /// back. A failed write-back is logged and tolerated: the generated
    /// identifier still serves the current session, and the next session
    /// resolves again.
    pub fn resolve(backend: &dyn StorageBackend) -> Self {
        let slot = StorageKey::reserved(DEPLOYMENT_SLOT);

        let existing = match backend.read(&slot) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read deployment slot");
                None
            }
        };

        if let Some(bytes) = existing {
            if let Some(id) = parse_deployment_id(&bytes) {
                tracing::debug!(%id, "resolved persisted deployment identifier");
                return DeploymentContext { id };
            }
            tracing::warn!("persisted deployment identifier unparsable; regenerating");
        }

        let id = Uuid::new_v4().simple().to_string();
        if let Err(e) = backend.write(&slot, id.as_bytes()) {
            tracing::warn!(error = %e, "failed to persist deployment identifier");
        }
        DeploymentContext { id }
    }

    /// The stable identifier string
    pub fn id(&self) -> &str {
        &self.id
    }
}

fn parse_deployment_id(bytes: &[u8]) -> Option<String> {
    let s = std::str::from_utf8(bytes).ok()?;
    let uuid = Uuid::try_parse(s).ok()?;
    Some(uuid.simple().to_string())
}
