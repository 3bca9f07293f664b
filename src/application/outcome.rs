//! Outcome of one operator-facing operation
//!
//! Every operation ends in exactly one `Outcome`: a kind the CLI turns into
//! an exit code, one message line, and optional detail lines.

use serde::Serialize;

use crate::error::{PanelError, ResultKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub kind: ResultKind,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    /// Unified diff of a dry run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl Outcome {
    pub fn new(kind: ResultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
            diff: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ResultKind::Success, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ResultKind::Cancelled, message)
    }

    pub fn partial(message: impl Into<String>) -> Self {
        Self::new(ResultKind::PartialSuccess, message)
    }

    pub fn from_error(err: &PanelError) -> Self {
        Self::new(err.kind(), err.to_string())
    }

    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details.extend(details.into_iter().map(Into::into));
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.kind, ResultKind::Success | ResultKind::Cancelled)
    }

    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }
}

impl From<PanelError> for Outcome {
    fn from(err: PanelError) -> Self {
        Self::from_error(&err)
    }
}
