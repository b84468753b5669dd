//! Core types and traits for breadcrumb
//!
//! This crate defines the foundational pieces used throughout the system:
//! - StorageKey: deployment-qualified identifier for a log's durable slot
//! - DeploymentContext: stable per-deployment identifier, resolved once
//! - StorageBackend: the persistence seam implemented by breadcrumb-storage
//! - Limits: size caps for names, log lengths, and slot payloads
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod error;
pub mod key;
pub mod limits;
pub mod traits;

// Re-export commonly used types and traits
pub use context::DeploymentContext;
pub use error::{Error, Result};
pub use key::{validate_name, KeyError, StorageKey, RESERVED_PREFIX};
pub use limits::Limits;
pub use traits::StorageBackend;
