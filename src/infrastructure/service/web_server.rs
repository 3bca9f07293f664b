//! Web server control through external commands
//!
//! Defaults drive Caddy: `caddy validate` for the offline check and
//! `systemctl reload caddy` for the graceful reload. Every command is
//! configurable and bounded by its own timeout.

use std::time::Duration;

use crate::domain::ports::{ServiceControl, ValidationResult};
use crate::error::{PanelError, PanelResult};

use super::process::{run_with_timeout, CommandOutput};

/// An argv plus how long it may run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub argv: Vec<String>,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new(argv: Vec<String>, timeout: Duration) -> Self {
        Self { argv, timeout }
    }

    fn run(&self, tool: &str) -> PanelResult<CommandOutput> {
        run_with_timeout(&self.argv, self.timeout).map_err(|e| PanelError::ExternalTool {
            tool: tool.to_string(),
            output: format!("cannot run '{}': {}", self.argv.join(" "), e),
        })
    }
}

#[derive(Debug, Clone)]
pub struct WebServer {
    name: String,
    validate: CommandSpec,
    reload: CommandSpec,
    status: CommandSpec,
}

impl WebServer {
    pub fn new(
        name: impl Into<String>,
        validate: CommandSpec,
        reload: CommandSpec,
        status: CommandSpec,
    ) -> Self {
        Self {
            name: name.into(),
            validate,
            reload,
            status,
        }
    }

    fn timed_out(&self, what: &str, spec: &CommandSpec) -> PanelError {
        PanelError::ExternalTool {
            tool: format!("{} {}", self.name, what),
            output: format!("no answer within {}s", spec.timeout.as_secs_f32()),
        }
    }
}

impl ServiceControl for WebServer {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> PanelResult<ValidationResult> {
        let out = self.validate.run(&self.name)?;
        if out.timed_out {
            return Err(self.timed_out("validate", &self.validate));
        }
        if out.success() {
            Ok(ValidationResult::ok())
        } else {
            Ok(ValidationResult::invalid(out.combined()))
        }
    }

    fn reload(&self) -> PanelResult<()> {
        let out = self.reload.run(&self.name)?;
        if out.timed_out {
            return Err(self.timed_out("reload", &self.reload));
        }
        if out.success() {
            Ok(())
        } else {
            Err(PanelError::ExternalTool {
                tool: format!("{} reload", self.name),
                output: out.combined(),
            })
        }
    }

    /// Status text regardless of exit code: an inactive unit is still a status
    fn status(&self) -> PanelResult<String> {
        let out = self.status.run(&self.name)?;
        if out.timed_out {
            return Err(self.timed_out("status", &self.status));
        }
        Ok(out.combined())
    }
}
