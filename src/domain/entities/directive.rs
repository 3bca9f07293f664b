//! Scheduled directives
//!
//! A directive is one line of the shared cron table, derived entirely from a
//! `(kind, subject)` pair and the backup layout.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::value_objects::{DbIdentifier, DomainName};
use crate::error::PanelError;

/// Kind of recurring action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    DailyBackup,
    WeeklyBackup,
    DatabaseBackup,
}

impl DirectiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::DailyBackup => "daily-backup",
            DirectiveKind::WeeklyBackup => "weekly-backup",
            DirectiveKind::DatabaseBackup => "database-backup",
        }
    }

    /// Schedule prefix: five time fields and the user
    fn schedule(self) -> &'static str {
        match self {
            DirectiveKind::DailyBackup => "0 2 * * * root",
            DirectiveKind::WeeklyBackup => "0 3 * * 0 root",
            DirectiveKind::DatabaseBackup => "0 4 * * * root",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectiveKind {
    type Err = PanelError;

    /// Accepts the kind names and the short CLI forms `daily` / `weekly`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" | "daily-backup" => Ok(DirectiveKind::DailyBackup),
            "weekly" | "weekly-backup" => Ok(DirectiveKind::WeeklyBackup),
            "database-backup" | "db-backup" => Ok(DirectiveKind::DatabaseBackup),
            other => Err(PanelError::InvalidBackupKind {
                value: other.to_string(),
            }),
        }
    }
}

/// A `(kind, subject)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    kind: DirectiveKind,
    subject: String,
}

impl Directive {
    /// Daily or weekly mirror of a site directory
    pub fn site_backup(kind: DirectiveKind, domain: &DomainName) -> Result<Self, PanelError> {
        match kind {
            DirectiveKind::DailyBackup | DirectiveKind::WeeklyBackup => Ok(Self {
                kind,
                subject: domain.to_string(),
            }),
            DirectiveKind::DatabaseBackup => Err(PanelError::InvalidBackupKind {
                value: kind.to_string(),
            }),
        }
    }

    /// Nightly dump of one database
    pub fn database_backup(database: &DbIdentifier) -> Self {
        Self {
            kind: DirectiveKind::DatabaseBackup,
            subject: database.to_string(),
        }
    }

    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// Directory layout the directive templates point into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupLayout {
    pub sites_root: PathBuf,
    pub daily_dir: PathBuf,
    pub weekly_dir: PathBuf,
    /// Dump command up to (not including) the database name
    pub dump_command: String,
}

impl BackupLayout {
    /// Directory the directive writes into; must exist before registration
    pub fn target_dir(&self, directive: &Directive) -> PathBuf {
        match directive.kind {
            DirectiveKind::DailyBackup => self.daily_dir.join(&directive.subject),
            DirectiveKind::WeeklyBackup => self.weekly_dir.join(&directive.subject),
            DirectiveKind::DatabaseBackup => self.database_dump_dir(),
        }
    }

    pub fn database_dump_dir(&self) -> PathBuf {
        self.daily_dir.join("databases")
    }

    /// Command portion of the line, without the schedule prefix
    fn command(&self, directive: &Directive) -> String {
        let subject = &directive.subject;
        match directive.kind {
            DirectiveKind::DailyBackup | DirectiveKind::WeeklyBackup => format!(
                "rsync -a --delete {} {}",
                dir_arg(&self.sites_root.join(subject)),
                dir_arg(&self.target_dir(directive)),
            ),
            DirectiveKind::DatabaseBackup => format!(
                "{} {} > {}",
                self.dump_command,
                subject,
                self.database_dump_dir().join(format!("{subject}.sql")).display(),
            ),
        }
    }

    /// Full cron line for the directive
    pub fn render(&self, directive: &Directive) -> String {
        format!("{} {}", directive.kind.schedule(), self.command(directive))
    }

    /// Field pattern recognising the directive regardless of its schedule
    pub fn pattern(&self, directive: &Directive) -> DirectivePattern {
        DirectivePattern::new(&self.command(directive))
    }
}

/// rsync needs the trailing slash to copy directory contents
fn dir_arg(path: &Path) -> String {
    format!("{}/", path.display())
}

/// Whole-field matcher for directive lines.
///
/// A line matches when the pattern's fields appear in it as a contiguous run
/// of complete whitespace-separated fields. `shop` does not match `shop_old`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectivePattern {
    fields: Vec<String>,
}

impl DirectivePattern {
    pub fn new(command: &str) -> Self {
        Self {
            fields: command.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn as_string(&self) -> String {
        self.fields.join(" ")
    }

    /// Comment lines never match
    pub fn matches(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        if self.fields.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        fields
            .windows(self.fields.len())
            .any(|window| window.iter().zip(&self.fields).all(|(a, b)| *a == b.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BackupLayout {
        BackupLayout {
            sites_root: PathBuf::from("/apps/sites"),
            daily_dir: PathBuf::from("/backup/daily"),
            weekly_dir: PathBuf::from("/backup/weekly"),
            dump_command: "mysqldump -u root".to_string(),
        }
    }

    fn domain(s: &str) -> DomainName {
        DomainName::new(s).unwrap()
    }

    #[test]
    fn renders_daily_site_backup() {
        let d = Directive::site_backup(DirectiveKind::DailyBackup, &domain("example.com")).unwrap();
        insta::assert_snapshot!(
            layout().render(&d),
            @"0 2 * * * root rsync -a --delete /apps/sites/example.com/ /backup/daily/example.com/"
        );
    }

    #[test]
    fn renders_weekly_site_backup() {
        let d =
            Directive::site_backup(DirectiveKind::WeeklyBackup, &domain("example.com")).unwrap();
        insta::assert_snapshot!(
            layout().render(&d),
            @"0 3 * * 0 root rsync -a --delete /apps/sites/example.com/ /backup/weekly/example.com/"
        );
    }

    #[test]
    fn renders_database_backup() {
        let d = Directive::database_backup(&DbIdentifier::new("shop").unwrap());
        insta::assert_snapshot!(
            layout().render(&d),
            @"0 4 * * * root mysqldump -u root shop > /backup/daily/databases/shop.sql"
        );
        assert_eq!(
            layout().target_dir(&d),
            PathBuf::from("/backup/daily/databases")
        );
    }

    #[test]
    fn pattern_ignores_schedule_and_spacing() {
        let d = Directive::site_backup(DirectiveKind::DailyBackup, &domain("example.com")).unwrap();
        let pattern = layout().pattern(&d);
        assert!(pattern.matches(&layout().render(&d)));
        assert!(pattern.matches(
            "30  1 * * *\troot   rsync -a --delete /apps/sites/example.com/ /backup/daily/example.com/"
        ));
    }

    #[test]
    fn pattern_matches_whole_fields_only() {
        let shop = Directive::database_backup(&DbIdentifier::new("shop").unwrap());
        let shop_old = Directive::database_backup(&DbIdentifier::new("shop_old").unwrap());
        let pattern = layout().pattern(&shop);
        assert!(!pattern.matches(&layout().render(&shop_old)));
        assert!(pattern.matches(&layout().render(&shop)));
    }

    #[test]
    fn pattern_does_not_cross_domains() {
        let base = Directive::site_backup(DirectiveKind::DailyBackup, &domain("example.com")).unwrap();
        let sub =
            Directive::site_backup(DirectiveKind::DailyBackup, &domain("a.example.com")).unwrap();
        assert!(!layout().pattern(&base).matches(&layout().render(&sub)));
    }

    #[test]
    fn comments_never_match() {
        let d = Directive::site_backup(DirectiveKind::DailyBackup, &domain("example.com")).unwrap();
        let line = format!("# {}", layout().render(&d));
        assert!(!layout().pattern(&d).matches(&line));
    }

    #[test]
    fn kind_parses_cli_forms() {
        assert_eq!("daily".parse::<DirectiveKind>().unwrap(), DirectiveKind::DailyBackup);
        assert_eq!("weekly".parse::<DirectiveKind>().unwrap(), DirectiveKind::WeeklyBackup);
        assert!("hourly".parse::<DirectiveKind>().is_err());
    }

    #[test]
    fn site_backup_rejects_database_kind() {
        assert!(Directive::site_backup(DirectiveKind::DatabaseBackup, &domain("example.com")).is_err());
    }
}
