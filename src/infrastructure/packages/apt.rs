//! Debian/Ubuntu packages through apt
//!
//! Installs and removals stream to the terminal since they can take minutes
//! and may prompt for service restarts. Listings are captured.

use std::time::Duration;

use crate::domain::ports::PackageInstaller;
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::service::process::{run_streaming, run_with_timeout};

const LIST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default)]
pub struct AptInstaller;

impl AptInstaller {
    pub fn new() -> Self {
        Self
    }

    fn stream(&self, verb: &str, packages: &[String]) -> PanelResult<()> {
        let mut argv = vec!["apt-get".to_string(), verb.to_string(), "-y".to_string()];
        argv.extend(packages.iter().cloned());
        let status = run_streaming(&argv).map_err(|e| PanelError::ExternalTool {
            tool: "apt-get".to_string(),
            output: e.to_string(),
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(PanelError::ExternalTool {
                tool: format!("apt-get {}", verb),
                output: format!("exited with {}", status),
            })
        }
    }

    fn capture(&self, argv: &[&str]) -> PanelResult<String> {
        let argv: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
        let tool = argv.join(" ");
        let out = run_with_timeout(&argv, LIST_TIMEOUT).map_err(|e| PanelError::ExternalTool {
            tool: tool.clone(),
            output: e.to_string(),
        })?;
        if out.timed_out {
            return Err(PanelError::ExternalTool {
                tool,
                output: "timed out".to_string(),
            });
        }
        Ok(out.stdout)
    }
}

impl PackageInstaller for AptInstaller {
    fn install(&self, packages: &[String]) -> PanelResult<()> {
        self.stream("install", packages)
    }

    fn remove(&self, packages: &[String]) -> PanelResult<()> {
        self.stream("remove", packages)
    }

    fn list_available(&self, prefix: &str) -> PanelResult<String> {
        self.capture(&["apt-cache", "pkgnames", prefix])
    }

    /// Only packages in the "install ok installed" state; a pattern with no
    /// match yields an empty list
    fn list_installed(&self, pattern: &str) -> PanelResult<String> {
        let raw = self.capture(&["dpkg-query", "-W", "-f", "${Package} ${Status}\n", pattern])?;
        Ok(raw
            .lines()
            .filter(|l| l.ends_with("install ok installed"))
            .filter_map(|l| l.split_whitespace().next())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
