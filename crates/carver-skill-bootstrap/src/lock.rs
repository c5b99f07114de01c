//! Provisioning lock.
//!
//! Two first-time invocations would otherwise race on check-then-create of
//! the shared venv. An advisory exclusive lock file at the skill home
//! serializes provisioning; the handle is held for the whole provisioning
//! step and released on every exit path via `Drop`.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use fs4::FileExt;

const LOCK_FILE_NAME: &str = "provision.lock";

#[derive(Debug)]
pub struct ProvisionLock {
    _file: File,
}

impl ProvisionLock {
    /// Block until the exclusive lock is acquired. Waiters queue behind a
    /// concurrent provisioner instead of failing.
    pub fn acquire(skill_home: &Path) -> Result<Self> {
        fs::create_dir_all(skill_home)
            .with_context(|| format!("Failed to create {}", skill_home.display()))?;
        let path = skill_home.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", path.display()))?;
        Ok(Self { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_creates_lock_file() {
        let dir = tempfile::tempdir().unwrap();
        let lock = ProvisionLock::acquire(dir.path()).unwrap();
        assert!(dir.path().join(LOCK_FILE_NAME).exists());
        drop(lock);
        // Released lock can be re-acquired immediately.
        let _again = ProvisionLock::acquire(dir.path()).unwrap();
    }

    #[test]
    fn test_second_handle_blocks_while_held() {
        let dir = tempfile::tempdir().unwrap();
        let _held = ProvisionLock::acquire(dir.path()).unwrap();

        let path = dir.path().join(LOCK_FILE_NAME);
        let probe = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .unwrap();
        assert!(probe.try_lock_exclusive().is_err());
    }
}
