//! ServiceControl port - the dependent long-running service
//!
//! Point-in-time blocking calls. Implementations bound each call with a
//! timeout so a hung service cannot hang the tool.

use serde::Serialize;

use crate::error::PanelResult;

/// Outcome of an offline configuration check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub diagnostic: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            diagnostic: String::new(),
        }
    }

    pub fn invalid(diagnostic: impl Into<String>) -> Self {
        Self {
            valid: false,
            diagnostic: diagnostic.into(),
        }
    }
}

pub trait ServiceControl {
    /// Human name used in messages ("caddy", "cron")
    fn name(&self) -> &str;

    /// Check the aggregate configuration without touching the live process.
    ///
    /// `Err` means the validator itself could not run.
    fn validate(&self) -> PanelResult<ValidationResult>;

    /// Graceful in-place reload
    fn reload(&self) -> PanelResult<()>;

    fn status(&self) -> PanelResult<String>;
}
