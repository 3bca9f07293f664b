//! Test environment builder for isolated webpanel runs.
//!
//! Every managed path lives under one temp directory. Service commands are
//! plain shell tools (`true`, `false`, `echo`) so tests never touch a real
//! web server, cron daemon or database.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a webpanel CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Isolated host layout plus the config file describing it
pub struct TestEnv {
    pub root: TempDir,
    config_path: PathBuf,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Accepting validator and working reload
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn sites_config_dir(&self) -> PathBuf {
        self.path("etc/caddy/sites.d")
    }

    pub fn module_dir(&self) -> PathBuf {
        self.path("etc/caddy/module.d")
    }

    pub fn sites_root(&self) -> PathBuf {
        self.path("apps/sites")
    }

    pub fn cron_file(&self) -> PathBuf {
        self.path("etc/cron.d/webpanel-backup")
    }

    pub fn fragment(&self, file_name: &str) -> PathBuf {
        self.sites_config_dir().join(file_name)
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    pub fn write(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    pub fn install_module(&self, name: &str, content: &str) {
        self.write(&self.module_dir().join(name), content);
    }

    /// Run webpanel with this environment's config
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env_remove("WEBPANEL_CONFIG")
            .env_remove("WEBPANEL_LOG")
            .env_remove("WEBPANEL_CADDYFILE")
            .env_remove("WEBPANEL_SITES_CONFIG_DIR")
            .env_remove("WEBPANEL_LOCK_DIR")
            .output()
            .expect("Failed to execute webpanel");
        to_result(output)
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    validate: Vec<String>,
    reload: Vec<String>,
    status: Vec<String>,
    extra_toml: String,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            validate: vec!["true".into()],
            reload: vec!["true".into()],
            status: vec!["echo".into(), "active (running)".into()],
            extra_toml: String::new(),
        }
    }

    pub fn validate(mut self, argv: &[&str]) -> Self {
        self.validate = argv.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn reload(mut self, argv: &[&str]) -> Self {
        self.reload = argv.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Raw TOML appended to the generated config
    pub fn extra_toml(mut self, toml: &str) -> Self {
        self.extra_toml = toml.to_string();
        self
    }

    pub fn build(self) -> TestEnv {
        let root = TempDir::new().expect("Failed to create temp dir");
        let p = |rel: &str| root.path().join(rel).display().to_string();
        let config = format!(
            r#"[paths]
caddyfile = {caddyfile:?}
sites_config_dir = {sites:?}
module_dir = {modules:?}
sites_root = {sites_root:?}
backup_daily_dir = {daily:?}
backup_weekly_dir = {weekly:?}
cron_file = {cron:?}
lock_dir = {lock:?}

[service]
validate = {validate:?}
reload = {reload:?}
status = {status:?}
validate_timeout_secs = 5
reload_timeout_secs = 5
{extra}
"#,
            caddyfile = p("etc/caddy/Caddyfile"),
            sites = p("etc/caddy/sites.d"),
            modules = p("etc/caddy/module.d"),
            sites_root = p("apps/sites"),
            daily = p("backup/daily"),
            weekly = p("backup/weekly"),
            cron = p("etc/cron.d/webpanel-backup"),
            lock = p("run/lock"),
            validate = self.validate,
            reload = self.reload,
            status = self.status,
            extra = self.extra_toml,
        );
        let config_path = root.path().join("webpanel.toml");
        std::fs::write(&config_path, config).expect("Failed to write config");

        TestEnv {
            root,
            config_path,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_webpanel")),
        }
    }
}
