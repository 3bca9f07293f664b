//! Fragment Store
//!
//! Maps fragment keys to `.conf` files in one directory. Whole-file reads,
//! atomic whole-file writes, idempotent deletes. No index is kept: the
//! directory listing is the source of truth.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::entities::FragmentKey;
use crate::domain::ports::ConfigDocument;
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::fs::atomic_write;

#[derive(Debug, Clone)]
pub struct FragmentStore {
    dir: PathBuf,
}

impl FragmentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &FragmentKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    pub fn exists(&self, key: &FragmentKey) -> bool {
        self.path_for(key).is_file()
    }

    pub fn read(&self, key: &FragmentKey) -> PanelResult<String> {
        let path = self.path_for(key);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PanelError::NotFound {
                entity: key.entity(),
                name: key.domain().to_string(),
            },
            _ => PanelError::io("read", path, e),
        })
    }

    pub fn write(&self, key: &FragmentKey, text: &str) -> PanelResult<()> {
        self.document(key).store(text)
    }

    pub fn delete(&self, key: &FragmentKey) -> PanelResult<()> {
        self.document(key).erase()
    }

    /// Every fragment in the directory, sorted; a missing directory is empty
    pub fn list(&self) -> PanelResult<Vec<FragmentKey>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PanelError::io("list", &self.dir, e)),
        };

        let mut keys: Vec<FragmentKey> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| FragmentKey::from_file_name(&entry.file_name().to_string_lossy()))
            .collect();
        keys.sort();
        Ok(keys)
    }

    /// The fragment as a document the Coordinator can snapshot
    pub fn document(&self, key: &FragmentKey) -> Fragment {
        Fragment {
            key: key.clone(),
            path: self.path_for(key),
        }
    }
}

/// One fragment file
#[derive(Debug, Clone)]
pub struct Fragment {
    key: FragmentKey,
    path: PathBuf,
}

impl Fragment {
    pub fn key(&self) -> &FragmentKey {
        &self.key
    }
}

impl ConfigDocument for Fragment {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> PanelResult<Option<String>> {
        read_optional(&self.path)
    }

    fn store(&self, content: &str) -> PanelResult<()> {
        atomic_write(&self.path, content.as_bytes())
            .map_err(|e| PanelError::io("write", &self.path, e))
    }

    fn erase(&self) -> PanelResult<()> {
        remove_if_present(&self.path)
    }
}

/// Read a file, mapping absence to `None`
pub fn read_optional(path: &Path) -> PanelResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PanelError::io("read", path, e)),
    }
}

pub fn remove_if_present(path: &Path) -> PanelResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PanelError::io("delete", path, e)),
    }
}
