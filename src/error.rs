//! Error types for webpanel
//!
//! Library code returns [`PanelError`]; the binary turns it into an
//! [`Outcome`](crate::application::Outcome) and an exit code via [`ResultKind`].

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for webpanel operations
pub type PanelResult<T> = Result<T, PanelError>;

/// Main error type for webpanel operations
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("invalid domain '{value}': {reason}")]
    InvalidDomain { value: String, reason: &'static str },

    #[error("invalid identifier '{value}': only letters, digits and '_' are allowed")]
    InvalidIdentifier { value: String },

    #[error("invalid version '{value}': expected MAJOR.MINOR (for example 8.2)")]
    InvalidVersion { value: String },

    #[error("invalid module name '{value}'")]
    InvalidModuleName { value: String },

    #[error("invalid proxy target '{value}'")]
    InvalidTarget { value: String },

    #[error("invalid backup type '{value}' (expected daily or weekly)")]
    InvalidBackupKind { value: String },

    /// Target entity does not exist
    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },

    /// Fragment has no top-level block for the anchor
    #[error("no block for '{anchor}' in {path}")]
    AnchorNotFound { anchor: String, path: PathBuf },

    /// Block was found but its delimiters do not balance
    #[error("malformed block for '{anchor}': {reason}")]
    MalformedBlock { anchor: String, reason: String },

    #[error("{entity} already exists: {name}")]
    AlreadyExists { entity: &'static str, name: String },

    /// File create/read/write/delete failure
    #[error("cannot {action} {path}: {source}")]
    StoreIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Aggregate configuration rejected by the service validator
    #[error("configuration rejected, change rolled back:\n{diagnostic}")]
    Validation { diagnostic: String },

    /// Validator rejected the change and the snapshot could not be restored
    #[error("configuration rejected and rollback failed ({source}):\n{diagnostic}")]
    RollbackFailed {
        diagnostic: String,
        #[source]
        source: Box<PanelError>,
    },

    /// Installer, database client or service control invocation failed
    #[error("{tool} failed: {output}")]
    ExternalTool { tool: String, output: String },

    #[error("invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A destructive operation needs `--yes` when no terminal is attached
    #[error("confirmation required for {action}; re-run with --yes")]
    ConfirmationRequired { action: String },
}

impl PanelError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PanelError::StoreIo {
            action,
            path: path.into(),
            source,
        }
    }

    /// Machine-distinguishable kind of this failure
    pub fn kind(&self) -> ResultKind {
        match self {
            PanelError::InvalidDomain { .. }
            | PanelError::InvalidIdentifier { .. }
            | PanelError::InvalidVersion { .. }
            | PanelError::InvalidModuleName { .. }
            | PanelError::InvalidTarget { .. }
            | PanelError::InvalidBackupKind { .. }
            | PanelError::AlreadyExists { .. }
            | PanelError::Config { .. }
            | PanelError::ConfirmationRequired { .. } => ResultKind::InputError,
            PanelError::NotFound { .. } | PanelError::AnchorNotFound { .. } => {
                ResultKind::NotFound
            }
            PanelError::MalformedBlock { .. } | PanelError::Validation { .. } => {
                ResultKind::ValidationError
            }
            PanelError::StoreIo { .. } | PanelError::RollbackFailed { .. } => {
                ResultKind::IoError
            }
            PanelError::ExternalTool { .. } => ResultKind::ExternalToolError,
        }
    }
}

/// Result kinds surfaced to the operator layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultKind {
    Success,
    InputError,
    NotFound,
    IoError,
    ValidationError,
    DegradedReload,
    ExternalToolError,
    PartialSuccess,
    Cancelled,
}

impl ResultKind {
    /// Process exit status for this kind
    pub fn exit_code(self) -> i32 {
        match self {
            ResultKind::Success | ResultKind::Cancelled => 0,
            ResultKind::InputError => 2,
            ResultKind::NotFound => 3,
            ResultKind::IoError => 4,
            ResultKind::ValidationError => 5,
            ResultKind::DegradedReload => 6,
            ResultKind::ExternalToolError => 7,
            ResultKind::PartialSuccess => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResultKind::Success => "success",
            ResultKind::InputError => "input-error",
            ResultKind::NotFound => "not-found",
            ResultKind::IoError => "io-error",
            ResultKind::ValidationError => "validation-error",
            ResultKind::DegradedReload => "degraded-reload",
            ResultKind::ExternalToolError => "external-tool-error",
            ResultKind::PartialSuccess => "partial-success",
            ResultKind::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
