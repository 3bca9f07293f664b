//! Validation & Reload Coordinator
//!
//! One cycle per mutation, under the document's lock:
//!
//! 1. snapshot the current content
//! 2. compute and persist the mutation (`mutated`)
//! 3. run the service's offline validator (`validating`)
//! 4. reload (`applied`) or restore the snapshot (`rolled-back`)
//!
//! A failed reload after a passing validation leaves the change in place and
//! reports a degraded outcome.

use std::fmt;
use std::path::Path;

use similar::TextDiff;

use crate::domain::ports::{ConfigDocument, ServiceControl, ValidationResult};
use crate::error::{PanelError, PanelResult, ResultKind};
use crate::infrastructure::fs::FileLock;

use super::outcome::Outcome;

/// What a caller wants done to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Write(String),
    Delete,
    Unchanged,
}

impl Mutation {
    /// `Write` if the text differs from `current`, else `Unchanged`
    pub fn write_if_changed(current: Option<&str>, text: String) -> Self {
        if current == Some(text.as_str()) {
            Mutation::Unchanged
        } else {
            Mutation::Write(text)
        }
    }
}

/// Where a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Mutated,
    Validating,
    Applied,
    RolledBack,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Mutated => "mutated",
            Phase::Validating => "validating",
            Phase::Applied => "applied",
            Phase::RolledBack => "rolled-back",
        })
    }
}

/// Result of a completed cycle that did not roll back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Nothing to do; no write, no validation, no reload
    Unchanged,
    /// Persisted, validated and reloaded
    Reloaded,
    /// Persisted and valid, but the live reload failed
    Degraded { service: String, reason: String },
    /// Nothing written; the diff that would have been applied
    DryRun { diff: String },
}

impl Applied {
    /// Operator-facing outcome; `done` describes the change, `noop` the case
    /// where it was already in place
    pub fn into_outcome(self, done: impl Into<String>, noop: impl Into<String>) -> Outcome {
        let done = done.into();
        match self {
            Applied::Unchanged => Outcome::success(noop),
            Applied::Reloaded => Outcome::success(done),
            Applied::Degraded { service, reason } => Outcome::new(
                ResultKind::DegradedReload,
                format!("{}, but {} did not reload", done, service),
            )
            .with_detail(reason)
            .with_detail("the configuration is valid and saved; retry with `webpanel service reload`"),
            Applied::DryRun { diff } => {
                let mut outcome = Outcome::success(format!("dry run: {}", done));
                if diff.is_empty() {
                    outcome.message = format!("dry run: {}", noop.into());
                } else {
                    outcome.diff = Some(diff);
                }
                outcome
            }
        }
    }
}

/// Runs mutations of one dependent service's configuration
#[derive(Clone, Copy)]
pub struct Coordinator<'a> {
    service: &'a dyn ServiceControl,
    lock_dir: &'a Path,
    dry_run: bool,
}

impl<'a> Coordinator<'a> {
    pub fn new(service: &'a dyn ServiceControl, lock_dir: &'a Path) -> Self {
        Self {
            service,
            lock_dir,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Mutate `document` and bring the service onto the result.
    ///
    /// `mutate` sees the current content (`None` if absent) and may refuse
    /// with an error, in which case nothing is written. On validation failure
    /// the snapshot is restored and `PanelError::Validation` is returned; if
    /// the restore itself fails, `PanelError::RollbackFailed` carries both.
    pub fn run<F>(&self, document: &dyn ConfigDocument, mutate: F) -> PanelResult<Applied>
    where
        F: FnOnce(Option<&str>) -> PanelResult<Mutation>,
    {
        let _lock = FileLock::acquire(self.lock_dir, document.path())
            .map_err(|e| PanelError::io("lock", self.lock_dir, e))?;

        let snapshot = document.load()?;
        let next = match mutate(snapshot.as_deref())? {
            Mutation::Unchanged => return Ok(Applied::Unchanged),
            Mutation::Write(text) if snapshot.as_deref() == Some(text.as_str()) => {
                return Ok(Applied::Unchanged)
            }
            Mutation::Delete if snapshot.is_none() => return Ok(Applied::Unchanged),
            Mutation::Write(text) => Some(text),
            Mutation::Delete => None,
        };

        if self.dry_run {
            return Ok(Applied::DryRun {
                diff: unified_diff(document.path(), snapshot.as_deref(), next.as_deref()),
            });
        }

        write_state(document, next.as_deref())?;
        self.trace(document, Phase::Mutated);

        self.trace(document, Phase::Validating);
        let verdict = self.service.validate().unwrap_or_else(|e| {
            // no verdict counts as a rejection
            ValidationResult::invalid(e.to_string())
        });

        if !verdict.valid {
            if let Err(restore) = write_state(document, snapshot.as_deref()) {
                tracing::error!(
                    path = %document.path().display(),
                    error = %restore,
                    diagnostic = %verdict.diagnostic,
                    "rollback failed"
                );
                return Err(PanelError::RollbackFailed {
                    diagnostic: verdict.diagnostic,
                    source: Box::new(restore),
                });
            }
            tracing::warn!(
                path = %document.path().display(),
                phase = %Phase::RolledBack,
                service = self.service.name(),
                "validation failed, snapshot restored"
            );
            return Err(PanelError::Validation {
                diagnostic: verdict.diagnostic,
            });
        }

        match self.service.reload() {
            Ok(()) => {
                self.trace(document, Phase::Applied);
                Ok(Applied::Reloaded)
            }
            Err(e) => {
                tracing::warn!(
                    service = self.service.name(),
                    error = %e,
                    "configuration saved but reload failed"
                );
                Ok(Applied::Degraded {
                    service: self.service.name().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn trace(&self, document: &dyn ConfigDocument, phase: Phase) {
        tracing::debug!(path = %document.path().display(), %phase, service = self.service.name());
    }
}

fn write_state(document: &dyn ConfigDocument, content: Option<&str>) -> PanelResult<()> {
    match content {
        Some(text) => document.store(text),
        None => document.erase(),
    }
}

/// Unified diff between two states of a document; absence diffs as empty
pub fn unified_diff(path: &Path, before: Option<&str>, after: Option<&str>) -> String {
    let old_header = match before {
        Some(_) => format!("a{}", display_abs(path)),
        None => "/dev/null".to_string(),
    };
    let new_header = match after {
        Some(_) => format!("b{}", display_abs(path)),
        None => "/dev/null".to_string(),
    };
    TextDiff::from_lines(before.unwrap_or(""), after.unwrap_or(""))
        .unified_diff()
        .header(&old_header, &new_header)
        .to_string()
}

fn display_abs(path: &Path) -> String {
    let shown = path.display().to_string();
    if shown.starts_with('/') {
        shown
    } else {
        format!("/{}", shown)
    }
}
