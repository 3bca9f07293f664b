//! ConfigDocument port - one whole file of managed configuration
//!
//! Fragments and the schedule file are both handled as documents: read in
//! full, replaced in full, or erased. The Coordinator snapshots and restores
//! through this trait.

use std::path::Path;

use crate::error::PanelResult;

pub trait ConfigDocument {
    /// File backing the document; its lock is derived from this path
    fn path(&self) -> &Path;

    /// Current content, `None` when the file does not exist
    fn load(&self) -> PanelResult<Option<String>>;

    /// Atomically replace the content
    fn store(&self, content: &str) -> PanelResult<()>;

    /// Remove the file; succeeds when it is already gone
    fn erase(&self) -> PanelResult<()>;
}
