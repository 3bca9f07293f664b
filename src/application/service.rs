//! Pass-through control of a dependent service

use crate::domain::ports::ServiceControl;
use crate::error::{PanelResult, ResultKind};

use super::outcome::Outcome;

pub struct ServiceManager<'a> {
    service: &'a dyn ServiceControl,
}

impl<'a> ServiceManager<'a> {
    pub fn new(service: &'a dyn ServiceControl) -> Self {
        Self { service }
    }

    pub fn status(&self) -> PanelResult<Outcome> {
        let text = self.service.status()?;
        Ok(Outcome::success(format!("{} status", self.service.name()))
            .with_details(text.lines().map(str::to_string)))
    }

    /// Check the live configuration; changes nothing
    pub fn validate(&self) -> PanelResult<Outcome> {
        let verdict = self.service.validate()?;
        Ok(if verdict.valid {
            Outcome::success(format!("{} configuration is valid", self.service.name()))
        } else {
            Outcome::new(
                ResultKind::ValidationError,
                format!("{} configuration is invalid", self.service.name()),
            )
            .with_details(verdict.diagnostic.lines().map(str::to_string))
        })
    }

    /// Validate first; an invalid configuration is never reloaded
    pub fn reload(&self) -> PanelResult<Outcome> {
        let checked = self.validate()?;
        if checked.kind != ResultKind::Success {
            return Ok(checked);
        }
        self.service.reload()?;
        Ok(Outcome::success(format!("{} reloaded", self.service.name())))
    }
}
