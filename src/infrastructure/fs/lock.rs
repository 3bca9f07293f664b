//! Advisory locks for shared configuration files
//!
//! One lock file per target, kept in a dedicated directory so lock files
//! never land inside directories the web server or cron scan.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Exclusive lock held until dropped
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until the lock for `target` is ours
    pub fn acquire(lock_dir: &Path, target: &Path) -> io::Result<Self> {
        fs::create_dir_all(lock_dir)?;
        let path = lock_path(lock_dir, target);
        let file = File::create(&path)?;

        if file.try_lock_exclusive().is_err() {
            tracing::info!(lock = %path.display(), "waiting for another webpanel process");
            file.lock_exclusive()?;
        }
        tracing::debug!(lock = %path.display(), "lock acquired");

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        tracing::debug!(lock = %self.path.display(), "lock released");
    }
}

/// Lock file for a target: the target path flattened into one file name
pub fn lock_path(lock_dir: &Path, target: &Path) -> PathBuf {
    let flat: String = target
        .to_string_lossy()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    lock_dir.join(format!("{}.lock", flat.trim_start_matches('_')))
}
