//! Exclusive lock held while an import writes to the store.

use crate::errors::LockError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Guard for the import lock; the lock is released when this is dropped.
#[derive(Debug)]
pub struct ImportLock {
    file: File,
    path: PathBuf,
}

impl ImportLock {
    /// Takes the lock without waiting.
    ///
    /// # Errors
    ///
    /// Returns `LockError::ImportBusy` if another process (or another guard in
    /// this process) holds the lock, and `LockError::AcquisitionFailed` if the
    /// lock file cannot be opened or locked.
    pub fn acquire(path: &Path) -> Result<Self, LockError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.to_path_buf(),
                source,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!("Acquired import lock {:?}", path);
                Ok(ImportLock {
                    file,
                    path: path.to_path_buf(),
                })
            }
            Err(e) if is_contended(&e) => Err(LockError::ImportBusy {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(LockError::AcquisitionFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ImportLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!("Failed to release import lock {:?}: {}", self.path, e);
        }
    }
}

fn is_contended(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::WouldBlock
        || error.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
