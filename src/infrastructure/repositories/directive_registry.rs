//! Directive Registry
//!
//! The shared cron table holding every scheduled backup line. Adds are
//! exact-line idempotent; removes drop every line matching the directive's
//! field pattern, duplicates included.

use std::path::{Path, PathBuf};

use crate::domain::entities::{BackupLayout, Directive, DirectivePattern};
use crate::domain::ports::ConfigDocument;
use crate::domain::services::{append_directive, scheduled_lines, strip_directive, Edit};
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::fs::{atomic_write, FileLock};

use super::fragment_store::{read_optional, remove_if_present};

#[derive(Debug, Clone)]
pub struct DirectiveRegistry {
    path: PathBuf,
    layout: BackupLayout,
    lock_dir: PathBuf,
}

impl DirectiveRegistry {
    pub fn new(path: impl Into<PathBuf>, layout: BackupLayout, lock_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            layout,
            lock_dir: lock_dir.into(),
        }
    }

    pub fn layout(&self) -> &BackupLayout {
        &self.layout
    }

    pub fn render(&self, directive: &Directive) -> String {
        self.layout.render(directive)
    }

    pub fn pattern(&self, directive: &Directive) -> DirectivePattern {
        self.layout.pattern(directive)
    }

    /// New file content with the directive present
    pub fn plan_add(&self, current: Option<&str>, directive: &Directive) -> Edit {
        append_directive(current.unwrap_or(""), &self.render(directive))
    }

    /// New file content with every matching line gone; `None` if no file
    pub fn plan_remove(&self, current: Option<&str>, directive: &Directive) -> Option<(Edit, usize)> {
        current.map(|content| strip_directive(content, &self.pattern(directive)))
    }

    /// Register a directive; returns whether the file changed.
    ///
    /// Standalone API: takes the registry lock itself and neither validates
    /// nor reloads anything. Callers already inside `Coordinator::run` for
    /// this file must use `plan_add` instead, as the lock is not reentrant.
    pub fn add(&self, directive: &Directive) -> PanelResult<bool> {
        let _lock = self.lock()?;
        let current = self.load()?;
        let edit = self.plan_add(current.as_deref(), directive);
        if edit.changed {
            self.store(&edit.text)?;
        }
        Ok(edit.changed)
    }

    /// Drop a directive; returns how many lines went.
    ///
    /// Locked and uncoordinated like `add`; the coordinated path is `plan_remove`.
    pub fn remove(&self, directive: &Directive) -> PanelResult<usize> {
        let _lock = self.lock()?;
        let current = self.load()?;
        match self.plan_remove(current.as_deref(), directive) {
            Some((edit, removed)) if edit.changed => {
                self.store(&edit.text)?;
                Ok(removed)
            }
            _ => Ok(0),
        }
    }

    /// Scheduled lines currently in the file
    pub fn lines(&self) -> PanelResult<Vec<String>> {
        let content = self.load()?.unwrap_or_default();
        Ok(scheduled_lines(&content)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Whether the directive is currently registered
    pub fn contains(&self, directive: &Directive) -> PanelResult<bool> {
        let pattern = self.pattern(directive);
        Ok(self.lines()?.iter().any(|l| pattern.matches(l)))
    }

    fn lock(&self) -> PanelResult<FileLock> {
        FileLock::acquire(&self.lock_dir, &self.path)
            .map_err(|e| PanelError::io("lock", &self.lock_dir, e))
    }
}

impl ConfigDocument for DirectiveRegistry {
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
