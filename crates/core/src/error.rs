//! Error types for breadcrumb
//!
//! This module defines the error hierarchy used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Most persistence failures never reach callers: the log layer treats them
//! as best-effort and swallows them (see `breadcrumb-log`). The errors here
//! surface only at construction time or from direct backend use.

use crate::key::KeyError;
use std::io;
use thiserror::Error;

/// Result type alias for breadcrumb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for breadcrumb
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Storage backend error (quota exceeded, backend unavailable)
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid configuration supplied at construction time
    ///
    /// This is programmer error, not an environmental condition, so it is
    /// surfaced rather than swallowed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Logical name failed key validation
    #[error(transparent)]
    Key(#[from] KeyError),
}
