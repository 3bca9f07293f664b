//! First-time host layout: managed directories, default snippets and the
//! top-level Caddyfile. Existing files are never overwritten.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::domain::services::templates;
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::fs::atomic_write;

use super::outcome::Outcome;

pub struct SetupManager<'a> {
    config: &'a Config,
    dry_run: bool,
}

impl<'a> SetupManager<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self) -> PanelResult<Outcome> {
        let paths = &self.config.paths;
        let mut created = Vec::new();

        for dir in [
            &paths.sites_config_dir,
            &paths.module_dir,
            &paths.sites_root,
            &paths.backup_daily_dir,
            &paths.backup_weekly_dir,
            &paths.lock_dir,
        ] {
            if !dir.is_dir() {
                if !self.dry_run {
                    fs::create_dir_all(dir).map_err(|e| PanelError::io("create", dir, e))?;
                }
                created.push(format!("{}/", dir.display()));
            }
        }

        for (name, content) in templates::default_modules() {
            let path = paths.module_dir.join(name);
            if self.write_new(&path, content)? {
                created.push(path.display().to_string());
            }
        }

        let caddyfile = templates::main_caddyfile(
            &self.config.service.admin_email,
            &self.config.modules_glob(),
            &self.config.sites_glob(),
        );
        if self.write_new(&paths.caddyfile, &caddyfile)? {
            created.push(paths.caddyfile.display().to_string());
        }

        let verb = if self.dry_run { "would create" } else { "created" };
        let message = if created.is_empty() {
            "host layout already in place".to_string()
        } else {
            format!("{} {} entries", verb, created.len())
        };
        Ok(Outcome::success(message).with_details(created))
    }

    /// Write `content` unless `path` exists; returns whether it was new
    fn write_new(&self, path: &Path, content: &str) -> PanelResult<bool> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "kept existing file");
            return Ok(false);
        }
        if !self.dry_run {
            atomic_write(path, content.as_bytes()).map_err(|e| PanelError::io("write", path, e))?;
        }
        Ok(true)
    }
}
