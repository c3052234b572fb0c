//! Advisory locking of the manifest during a purge.

use std::path::{Path, PathBuf};

use fslock::LockFile;
use tracing::debug;

use super::PurgeError;
use crate::config;

/// RAII guard for manifest locking
///
/// Holds an exclusive advisory lock on `<manifest>.lock` for as long as it
/// lives. Only other purge runs honor it.
///
/// The lock file is never deleted. Every run must lock the same inode, and
/// unlinking it on release would let one run lock the old file while another
/// creates and locks a new one at the same path.
#[derive(Debug)]
pub struct ManifestLock {
    lock: LockFile,
    lock_path: PathBuf,
}

impl ManifestLock {
    /// Try to lock `manifest` without blocking. Fails with
    /// [`PurgeError::Locked`] if another run holds the lock.
    pub fn acquire(manifest: &Path) -> Result<Self, PurgeError> {
        let lock_path = config::lock_path(manifest);

        let mut lock = LockFile::open(&lock_path).map_err(|source| PurgeError::LockFailed {
            path: lock_path.clone(),
            source,
        })?;

        let acquired = lock.try_lock().map_err(|source| PurgeError::LockFailed {
            path: lock_path.clone(),
            source,
        })?;

        if !acquired {
            return Err(PurgeError::Locked {
                path: manifest.to_path_buf(),
            });
        }

        debug!(path = %lock_path.display(), "manifest locked");
        Ok(Self { lock, lock_path })
    }
}

impl Drop for ManifestLock {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
        debug!(path = %self.lock_path.display(), "manifest unlocked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_acquire_fails_while_held() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("requirements.txt");

        let first = ManifestLock::acquire(&manifest).unwrap();
        let second = ManifestLock::acquire(&manifest);
        assert!(matches!(second, Err(PurgeError::Locked { .. })));

        drop(first);
        assert!(ManifestLock::acquire(&manifest).is_ok());
    }

    #[test]
    fn test_lock_file_survives_release() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("requirements.txt");
        let lock_path = config::lock_path(&manifest);

        let guard = ManifestLock::acquire(&manifest).unwrap();
        assert!(lock_path.exists());

        drop(guard);
        assert!(lock_path.exists());
    }

    #[test]
    fn test_waiting_handle_cannot_lock_while_new_holder_exists() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("requirements.txt");
        let lock_path = config::lock_path(&manifest);

        let first = ManifestLock::acquire(&manifest).unwrap();
        let mut waiting = LockFile::open(&lock_path).unwrap();
        drop(first);

        let second = ManifestLock::acquire(&manifest).unwrap();
        assert!(!waiting.try_lock().unwrap());

        drop(second);
        assert!(waiting.try_lock().unwrap());
    }
}
