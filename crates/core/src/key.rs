//! Logical-name validation and storage key derivation
//!
//! A log is addressed by a logical name (chosen by the caller) qualified by a
//! deployment context, so that independent deployments sharing one storage
//! origin never collide. The derived [`StorageKey`] is computed once at log
//! construction and is stable for the lifetime of the deployment context.
//!
//! ## Contract
//!
//! Validation rules for logical names:
//! - Names must be valid UTF-8 (guaranteed by Rust's &str type)
//! - Names must not be empty
//! - Names must not contain NUL bytes (\0)
//! - Names must not start with reserved prefix `_breadcrumb/`
//! - Names must not exceed `max_key_bytes` (default: 512)
//!
//! Derivation: `"{name}:{context_id}"` where `context_id` is the lowercase
//! hex xxh3-64 of the deployment qualifier. Deterministic and synchronous.

use crate::context::DeploymentContext;
use crate::limits::Limits;
use std::fmt;
use thiserror::Error;

/// Reserved system prefix for internal slots
pub const RESERVED_PREFIX: &str = "_breadcrumb/";

/// Validate a logical log name using default limits
///
/// This is the primary validation function; it runs at log construction
/// and at registry lookups.
///
/// # Examples
///
/// ```
/// use breadcrumb_core::key::validate_name;
///
/// // Valid names
/// assert!(validate_name("recentlyAccessed").is_ok());
/// assert!(validate_name("query-history").is_ok());
///
/// // Invalid names
/// assert!(validate_name("").is_err()); // empty
/// assert!(validate_name("a\x00b").is_err()); // contains NUL
/// assert!(validate_name("_breadcrumb/internal").is_err()); // reserved prefix
/// ```
pub fn validate_name(name: &str) -> Result<(), KeyError> {
    validate_name_with_limits(name, &Limits::default())
}

/// Validate a logical log name with custom limits
pub fn validate_name_with_limits(name: &str, limits: &Limits) -> Result<(), KeyError> {
    // Rule 1: Name cannot be empty
    if name.is_empty() {
        return Err(KeyError::Empty);
    }

    // Rule 2: Name cannot contain NUL bytes
    if name.contains('\x00') {
        return Err(KeyError::ContainsNul);
    }

    // Rule 3: Name cannot use the reserved prefix
    if name.starts_with(RESERVED_PREFIX) {
        return Err(KeyError::ReservedPrefix);
    }

    // Rule 4: Name cannot exceed max length
    let len = name.len();
    if len > limits.max_key_bytes {
        return Err(KeyError::TooLong {
            actual: len,
            max: limits.max_key_bytes,
        });
    }

    Ok(())
}

/// Logical-name validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Name is empty (length 0)
    #[error("log name cannot be empty")]
    Empty,

    /// Name contains NUL byte (\0)
    #[error("log name cannot contain NUL bytes")]
    ContainsNul,

    /// Name uses reserved system prefix `_breadcrumb/`
    #[error("log name cannot use reserved prefix '{}'", RESERVED_PREFIX)]
    ReservedPrefix,

    /// Name exceeds maximum length
    #[error("log name too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual name length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}

/// A deployment-qualified storage key
///
/// Identifies the durable slot a log's serialized state lives under. Two
/// different deployments (different base paths, different sessions) derive
/// different keys for the same logical name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derive a storage key from a logical name and a deployment context
    ///
    /// Validates the name, then joins it with the context identifier:
    /// `"{name}:{context_id}"`. Pure function of its inputs.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if the logical name fails validation.
    pub fn derive(name: &str, context: &DeploymentContext) -> Result<StorageKey, KeyError> {
        Self::derive_with_limits(name, context, &Limits::default())
    }

    /// Derive a storage key with custom limits
    pub fn derive_with_limits(
        name: &str,
        context: &DeploymentContext,
        limits: &Limits,
    ) -> Result<StorageKey, KeyError> {
        validate_name_with_limits(name, limits)?;
        Ok(StorageKey(format!("{}:{}", name, context.id())))
    }

    /// Build a reserved internal key under `_breadcrumb/`
    ///
    /// Used for slots the library owns itself (e.g. the persisted deployment
    /// identifier). Not reachable through user-facing derivation, which
    /// rejects the reserved prefix.
    pub fn reserved(slot: &str) -> StorageKey {
        StorageKey(format!("{}{}", RESERVED_PREFIX, slot))
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
