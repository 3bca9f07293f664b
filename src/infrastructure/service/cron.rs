//! Cron as the dependent service of the schedule file
//!
//! Validation is the in-process table check. Cron re-reads `cron.d` on its
//! own when a file changes, so reload has nothing to do.

use std::path::PathBuf;

use crate::domain::ports::{ServiceControl, ValidationResult};
use crate::domain::services::{check_cron_table, scheduled_lines};
use crate::error::PanelResult;
use crate::infrastructure::repositories::read_optional_file;

#[derive(Debug, Clone)]
pub struct CronTable {
    path: PathBuf,
}

impl CronTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ServiceControl for CronTable {
    fn name(&self) -> &str {
        "cron"
    }

    fn validate(&self) -> PanelResult<ValidationResult> {
        let content = read_optional_file(&self.path)?.unwrap_or_default();
        Ok(match check_cron_table(&content) {
            Ok(()) => ValidationResult::ok(),
            Err(problems) => ValidationResult::invalid(format!(
                "{}:\n{}",
                self.path.display(),
                problems.join("\n")
            )),
        })
    }

    fn reload(&self) -> PanelResult<()> {
        tracing::debug!(path = %self.path.display(), "cron picks up table changes itself");
        Ok(())
    }

    fn status(&self) -> PanelResult<String> {
        let content = read_optional_file(&self.path)?.unwrap_or_default();
        Ok(format!(
            "{} scheduled entries in {}",
            scheduled_lines(&content).len(),
            self.path.display()
        ))
    }
}
