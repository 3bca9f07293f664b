//! In-memory stand-ins for the ports, shared by application tests

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;

use crate::domain::ports::{DatabaseClient, PackageInstaller, ServiceControl, ValidationResult};
use crate::error::{PanelError, PanelResult};

type Check = Box<dyn Fn() -> PanelResult<ValidationResult>>;

pub(crate) struct FakeService {
    check: Check,
    reload_fails: bool,
    pub validations: Cell<usize>,
    pub reloads: Cell<usize>,
}

impl FakeService {
    fn with_check(check: Check) -> Self {
        Self {
            check,
            reload_fails: false,
            validations: Cell::new(0),
            reloads: Cell::new(0),
        }
    }

    pub fn accepting() -> Self {
        Self::with_check(Box::new(|| Ok(ValidationResult::ok())))
    }

    pub fn rejecting(diagnostic: &'static str) -> Self {
        Self::with_check(Box::new(move || Ok(ValidationResult::invalid(diagnostic))))
    }

    /// Validator that cannot run at all
    pub fn broken() -> Self {
        Self::with_check(Box::new(|| {
            Err(PanelError::ExternalTool {
                tool: "caddy".to_string(),
                output: "no answer within 8s".to_string(),
            })
        }))
    }

    /// Accepts while every file in `dir` has balanced braces
    pub fn brace_checking(dir: PathBuf) -> Self {
        Self::with_check(Box::new(move || {
            let Ok(entries) = fs::read_dir(&dir) else {
                return Ok(ValidationResult::ok());
            };
            for entry in entries.flatten() {
                let text = fs::read_to_string(entry.path()).unwrap_or_default();
                let mut depth = 0i64;
                for c in text.chars() {
                    match c {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    if depth < 0 {
                        break;
                    }
                }
                if depth != 0 {
                    return Ok(ValidationResult::invalid(format!(
                        "{}: unbalanced braces",
                        entry.path().display()
                    )));
                }
            }
            Ok(ValidationResult::ok())
        }))
    }

    pub fn failing_reload(mut self) -> Self {
        self.reload_fails = true;
        self
    }
}

impl ServiceControl for FakeService {
    fn name(&self) -> &str {
        "caddy"
    }

    fn validate(&self) -> PanelResult<ValidationResult> {
        self.validations.set(self.validations.get() + 1);
        (self.check)()
    }

    fn reload(&self) -> PanelResult<()> {
        self.reloads.set(self.reloads.get() + 1);
        if self.reload_fails {
            Err(PanelError::ExternalTool {
                tool: "caddy reload".to_string(),
                output: "Job for caddy.service failed".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn status(&self) -> PanelResult<String> {
        Ok("active (running)".to_string())
    }
}

/// Records statements; fails any statement containing `fail_on`
#[derive(Default)]
pub(crate) struct FakeDatabase {
    pub statements: RefCell<Vec<String>>,
    pub fail_on: Option<&'static str>,
    pub owners: &'static str,
}

impl FakeDatabase {
    fn record(&self, sql: &str) -> PanelResult<()> {
        self.statements.borrow_mut().push(sql.to_string());
        match self.fail_on {
            Some(needle) if sql.contains(needle) => Err(PanelError::ExternalTool {
                tool: "mysql".to_string(),
                output: format!("ERROR 1396: {} failed", needle),
            }),
            _ => Ok(()),
        }
    }
}

impl DatabaseClient for FakeDatabase {
    fn execute(&self, sql: &str) -> PanelResult<()> {
        self.record(sql)
    }

    fn query(&self, sql: &str) -> PanelResult<String> {
        self.record(sql)?;
        Ok(self.owners.to_string())
    }
}

/// Pretends `installed` packages are present and `available` are indexed
#[derive(Default)]
pub(crate) struct FakeInstaller {
    pub available: &'static str,
    pub installed: RefCell<Vec<String>>,
    pub fail_install: bool,
    pub calls: RefCell<Vec<String>>,
}

impl PackageInstaller for FakeInstaller {
    fn install(&self, packages: &[String]) -> PanelResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("install {}", packages.join(" ")));
        if self.fail_install {
            return Err(PanelError::ExternalTool {
                tool: "apt-get install".to_string(),
                output: "exited with exit status: 100".to_string(),
            });
        }
        self.installed.borrow_mut().extend(packages.iter().cloned());
        Ok(())
    }

    fn remove(&self, packages: &[String]) -> PanelResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("remove {}", packages.join(" ")));
        self.installed.borrow_mut().retain(|p| {
            !packages
                .iter()
                .any(|glob| p.starts_with(glob.trim_end_matches('*')))
        });
        Ok(())
    }

    fn list_available(&self, _prefix: &str) -> PanelResult<String> {
        Ok(self.available.to_string())
    }

    fn list_installed(&self, _pattern: &str) -> PanelResult<String> {
        Ok(self.installed.borrow().join("\n"))
    }
}
