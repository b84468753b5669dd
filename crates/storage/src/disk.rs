//! On-disk slot storage
//!
//! One file per storage key inside a backing directory. Slot updates use the
//! write-fsync-rename pattern so a crash mid-write leaves either the old
//! slot or the new one, never a torn file.
//!
//! # Layout
//!
//! - Slot file: `<base64url(key)>.slot`
//! - Temp file: `.<base64url(key)>.tmp` (leftovers are overwritten on the
//!   next write to the same slot)
//!
//! Keys may contain `/` and `:`; base64url encoding keeps filenames safe on
//! every platform without a collision risk.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use breadcrumb_core::{Error, Limits, Result, StorageBackend, StorageKey};

/// Directory-backed storage backend
///
/// Enforces `Limits::max_slot_bytes` on writes, playing the role of the
/// per-origin storage quota: an oversized write fails with a storage error
/// that the log layer swallows.
#[derive(Debug)]
pub struct DiskBackend {
    dir: PathBuf,
    limits: Limits,
}

impl DiskBackend {
    /// Open a backend rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_limits(dir, Limits::default())
    }

    /// Open a backend with custom limits
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open_with_limits(dir: impl Into<PathBuf>, limits: Limits) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "opened disk backend");
        Ok(DiskBackend { dir, limits })
    }

    /// The backing directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &StorageKey) -> PathBuf {
        self.dir
            .join(format!("{}.slot", URL_SAFE_NO_PAD.encode(key.as_str())))
    }

    fn temp_path(&self, key: &StorageKey) -> PathBuf {
        self.dir
            .join(format!(".{}.tmp", URL_SAFE_NO_PAD.encode(key.as_str())))
    }
}

impl StorageBackend for DiskBackend {
    fn read(&self, key: &StorageKey) -> Result<Option<Vec<u8>>> {
        match fs::read(self.slot_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &StorageKey, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.limits.max_slot_bytes {
            return Err(Error::Storage(format!(
                "slot write of {} bytes exceeds quota of {} bytes",
                bytes.len(),
                self.limits.max_slot_bytes
            )));
        }

        let temp_path = self.temp_path(key);
        let final_path = self.slot_path(key);

        // Write-fsync-rename: either the old slot or the new one is visible
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&temp_path, &final_path)?;

        // fsync the directory so the rename itself is durable
        #[cfg(unix)]
        if let Ok(dir) = fs::File::open(&self.dir) {
            let _ = dir.sync_all();
        }

        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> Result<()> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
