//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{BackupLayout, FRAGMENT_EXTENSION};
use crate::error::PanelResult;
use crate::infrastructure::service::process::expand;
use crate::infrastructure::{CommandSpec, CronTable, WebServer};

use super::loader::{self, ConfigWarning};

/// Filesystem layout of the managed host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Top-level Caddyfile, the validator's entry point
    pub caddyfile: PathBuf,
    /// Fragment Store directory (`*.conf`)
    pub sites_config_dir: PathBuf,
    /// Snippet directory, one file per module
    pub module_dir: PathBuf,
    /// Document roots, one directory per site
    pub sites_root: PathBuf,
    pub backup_daily_dir: PathBuf,
    pub backup_weekly_dir: PathBuf,
    /// Directive Registry
    pub cron_file: PathBuf,
    pub lock_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            caddyfile: PathBuf::from("/etc/caddy/Caddyfile"),
            sites_config_dir: PathBuf::from("/etc/caddy/sites.d"),
            module_dir: PathBuf::from("/etc/caddy/module.d"),
            sites_root: PathBuf::from("/apps/sites"),
            backup_daily_dir: PathBuf::from("/backup/daily"),
            backup_weekly_dir: PathBuf::from("/backup/weekly"),
            cron_file: PathBuf::from("/etc/cron.d/webpanel-backup"),
            lock_dir: PathBuf::from("/run/lock/webpanel"),
        }
    }
}

/// Dependent service control commands
///
/// Commands are argv arrays; `{caddyfile}` expands to `paths.caddyfile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub validate: Vec<String>,
    pub reload: Vec<String>,
    pub status: Vec<String>,
    pub validate_timeout_secs: u64,
    pub reload_timeout_secs: u64,
    /// Admin contact written into the generated Caddyfile
    pub admin_email: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "caddy".to_string(),
            validate: argv(&["caddy", "validate", "--adapter", "caddyfile", "--config", "{caddyfile}"]),
            reload: argv(&["systemctl", "reload", "caddy"]),
            status: argv(&["systemctl", "status", "caddy", "--no-pager"]),
            validate_timeout_secs: 8,
            reload_timeout_secs: 8,
            admin_email: "admin@localhost".to_string(),
        }
    }
}

/// Database server access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub client: String,
    /// Dump binary used in database backup directives
    pub dump: String,
    pub admin_user: String,
    pub timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            client: "mysql".to_string(),
            dump: "mysqldump".to_string(),
            admin_user: "root".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PanelResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PanelResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve from flag, `WEBPANEL_CONFIG`, the system file, or defaults
    pub fn resolve(explicit: Option<&Path>) -> PanelResult<(Self, Vec<ConfigWarning>)> {
        loader::resolve(explicit)
    }

    /// Apply environment variable overrides (WEBPANEL_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn backup_layout(&self) -> BackupLayout {
        BackupLayout {
            sites_root: self.paths.sites_root.clone(),
            daily_dir: self.paths.backup_daily_dir.clone(),
            weekly_dir: self.paths.backup_weekly_dir.clone(),
            dump_command: format!("{} -u {}", self.database.dump, self.database.admin_user),
        }
    }

    /// Glob the top-level Caddyfile uses to import fragments
    pub fn sites_glob(&self) -> String {
        format!(
            "{}/*.{}",
            self.paths.sites_config_dir.display(),
            FRAGMENT_EXTENSION
        )
    }

    pub fn modules_glob(&self) -> String {
        format!("{}/*", self.paths.module_dir.display())
    }

    /// Web server controller with `{caddyfile}` expanded
    pub fn web_server(&self) -> WebServer {
        let caddyfile = self.paths.caddyfile.display().to_string();
        let spec = |argv: &[String], secs: u64| {
            CommandSpec::new(expand(argv, "caddyfile", &caddyfile), Duration::from_secs(secs))
        };
        WebServer::new(
            self.service.name.clone(),
            spec(&self.service.validate, self.service.validate_timeout_secs),
            spec(&self.service.reload, self.service.reload_timeout_secs),
            spec(&self.service.status, self.service.validate_timeout_secs),
        )
    }

    pub fn cron_table(&self) -> CronTable {
        CronTable::new(&self.paths.cron_file)
    }

    pub fn database_timeout(&self) -> Duration {
        Duration::from_secs(self.database.timeout_secs)
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
