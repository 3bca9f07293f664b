//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PanelError, PanelResult};

use super::types::Config;

/// System-wide config file consulted when nothing else is given
pub const SYSTEM_CONFIG: &str = "/etc/webpanel/config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PanelResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| PanelError::io("read", path, e))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PanelError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Pick the config source, load it, then apply env overrides
///
/// An explicitly named file (flag or `WEBPANEL_CONFIG`) must exist; the
/// system file is optional.
pub fn resolve(explicit: Option<&Path>) -> PanelResult<(Config, Vec<ConfigWarning>)> {
    let from_env = std::env::var_os("WEBPANEL_CONFIG").map(PathBuf::from);
    let chosen = explicit.map(Path::to_path_buf).or(from_env);

    let (config, warnings) = match chosen {
        Some(path) => load_with_warnings(&path)?,
        None => {
            let system = Path::new(SYSTEM_CONFIG);
            if system.exists() {
                load_with_warnings(system)?
            } else {
                tracing::debug!("no config file, using built-in defaults");
                (Config::default(), Vec::new())
            }
        }
    };

    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (WEBPANEL_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    let paths = &mut config.paths;
    for (var, slot) in [
        ("WEBPANEL_CADDYFILE", &mut paths.caddyfile),
        ("WEBPANEL_SITES_CONFIG_DIR", &mut paths.sites_config_dir),
        ("WEBPANEL_MODULE_DIR", &mut paths.module_dir),
        ("WEBPANEL_SITES_ROOT", &mut paths.sites_root),
        ("WEBPANEL_BACKUP_DAILY_DIR", &mut paths.backup_daily_dir),
        ("WEBPANEL_BACKUP_WEEKLY_DIR", &mut paths.backup_weekly_dir),
        ("WEBPANEL_CRON_FILE", &mut paths.cron_file),
        ("WEBPANEL_LOCK_DIR", &mut paths.lock_dir),
    ] {
        if let Some(value) = std::env::var_os(var) {
            *slot = PathBuf::from(value);
        }
    }

    // WEBPANEL_VALIDATE_TIMEOUT / WEBPANEL_RELOAD_TIMEOUT (seconds)
    if let Some(secs) = env_secs("WEBPANEL_VALIDATE_TIMEOUT") {
        config.service.validate_timeout_secs = secs;
    }
    if let Some(secs) = env_secs("WEBPANEL_RELOAD_TIMEOUT") {
        config.service.reload_timeout_secs = secs;
    }

    config
}

fn env_secs(var: &str) -> Option<u64> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse() {
        Ok(secs) => Some(secs),
        Err(_) => {
            tracing::warn!(var, value = %raw, "ignoring non-numeric timeout");
            None
        }
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "caddyfile",
        "sites_config_dir",
        "module_dir",
        "sites_root",
        "backup_daily_dir",
        "backup_weekly_dir",
        "cron_file",
        "lock_dir",
        "service",
        "name",
        "validate",
        "reload",
        "status",
        "validate_timeout_secs",
        "reload_timeout_secs",
        "admin_email",
        "database",
        "client",
        "dump",
        "admin_user",
        "timeout_secs",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
