//! Storage layer for breadcrumb
//!
//! This crate implements the `StorageBackend` seam with:
//! - MemoryBackend: HashMap behind `parking_lot::RwLock`, for tests and
//!   ephemeral deployments
//! - DiskBackend: one file per slot with write-fsync-rename updates and a
//!   slot-size quota
//!
//! Backends store opaque bytes; serialization stays in the log layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod disk;
pub mod memory;

pub use disk::DiskBackend;
pub use memory::MemoryBackend;
