//! Module snippets, one file per module name in the module directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::ports::ConfigDocument;
use crate::domain::value_objects::ModuleName;
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::fs::atomic_write;

use super::fragment_store::{read_optional, remove_if_present};

#[derive(Debug, Clone)]
pub struct ModuleLibrary {
    dir: PathBuf,
}

impl ModuleLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self, name: &ModuleName) -> bool {
        self.dir.join(name.as_str()).is_file()
    }

    /// Installed module names, sorted; hidden files are skipped
    pub fn list(&self) -> PanelResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PanelError::io("list", &self.dir, e)),
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn document(&self, name: &ModuleName) -> ManagedFile {
        ManagedFile::new(self.dir.join(name.as_str()))
    }
}

/// Any single managed file outside the fragment store
#[derive(Debug, Clone)]
pub struct ManagedFile {
    path: PathBuf,
}

impl ManagedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigDocument for ManagedFile {
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
