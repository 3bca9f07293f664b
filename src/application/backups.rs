//! Backup manager: scheduled backup directives in the shared cron table

use std::fs;
use std::path::Path;

use crate::domain::entities::{Directive, DirectiveKind};
use crate::domain::value_objects::{DbIdentifier, DomainName};
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::DirectiveRegistry;

use super::coordinator::{Coordinator, Mutation};
use super::outcome::Outcome;

pub struct BackupManager<'a> {
    registry: &'a DirectiveRegistry,
    coordinator: Coordinator<'a>,
}

impl<'a> BackupManager<'a> {
    /// `coordinator` must drive the cron table's service, not the web server
    pub fn new(registry: &'a DirectiveRegistry, coordinator: Coordinator<'a>) -> Self {
        Self {
            registry,
            coordinator,
        }
    }

    /// Schedule a daily or weekly mirror of a site directory
    pub fn enable(&self, kind: &str, domain: &str) -> PanelResult<Outcome> {
        let kind: DirectiveKind = kind.parse()?;
        let domain = DomainName::new(domain)?;
        let directive = Directive::site_backup(kind, &domain)?;

        let site_dir = self.registry.layout().sites_root.join(domain.as_str());
        if !site_dir.is_dir() {
            return Err(PanelError::NotFound {
                entity: "site directory",
                name: site_dir.display().to_string(),
            });
        }
        self.prepare(&self.registry.layout().target_dir(&directive))?;

        self.register(&directive).map(|o| {
            o.with_detail(format!(
                "target: {}",
                self.registry.layout().target_dir(&directive).display()
            ))
        })
    }

    pub fn disable(&self, kind: &str, domain: &str) -> PanelResult<Outcome> {
        let kind: DirectiveKind = kind.parse()?;
        let domain = DomainName::new(domain)?;
        self.unregister(&Directive::site_backup(kind, &domain)?)
    }

    /// Schedule a nightly dump; the dump directory is created first
    pub fn add_database(&self, database: &str) -> PanelResult<Outcome> {
        let database = DbIdentifier::new(database)?;
        let directive = Directive::database_backup(&database);
        self.prepare(&self.registry.layout().database_dump_dir())?;
        self.register(&directive)
    }

    pub fn remove_database(&self, database: &str) -> PanelResult<Outcome> {
        let database = DbIdentifier::new(database)?;
        self.unregister(&Directive::database_backup(&database))
    }

    /// Scheduled lines as they are in the table
    pub fn list(&self) -> PanelResult<Vec<String>> {
        self.registry.lines()
    }

    fn prepare(&self, dir: &Path) -> PanelResult<()> {
        if self.coordinator.is_dry_run() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| PanelError::io("create", dir, e))
    }

    fn register(&self, directive: &Directive) -> PanelResult<Outcome> {
        let applied = self.coordinator.run(self.registry, |current| {
            let edit = self.registry.plan_add(current, directive);
            Ok(if edit.changed {
                Mutation::Write(edit.text)
            } else {
                Mutation::Unchanged
            })
        })?;
        Ok(applied.into_outcome(
            format!("{} for {} scheduled", directive.kind(), directive.subject()),
            format!("{} for {} already scheduled", directive.kind(), directive.subject()),
        ))
    }

    fn unregister(&self, directive: &Directive) -> PanelResult<Outcome> {
        let mut removed = 0;
        let applied = self.coordinator.run(self.registry, |current| {
            Ok(match self.registry.plan_remove(current, directive) {
                Some((edit, count)) if edit.changed => {
                    removed = count;
                    Mutation::Write(edit.text)
                }
                _ => Mutation::Unchanged,
            })
        })?;
        let outcome = applied.into_outcome(
            format!("{} for {} removed", directive.kind(), directive.subject()),
            format!("{} for {} was not scheduled", directive.kind(), directive.subject()),
        );
        Ok(if removed > 1 {
            outcome.with_detail(format!("{} duplicate lines cleaned up", removed - 1))
        } else {
            outcome
        })
    }
}
